use clap::ValueEnum;
use verstamp_core::{ComponentIndex, VersionKind};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVersionKind {
    Primary,
    File,
    Informational,
}

impl From<CliVersionKind> for VersionKind {
    fn from(value: CliVersionKind) -> Self {
        match value {
            CliVersionKind::Primary => Self::Primary,
            CliVersionKind::File => Self::File,
            CliVersionKind::Informational => Self::Informational,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliComponent {
    Major,
    Minor,
    Build,
    Revision,
}

impl From<CliComponent> for ComponentIndex {
    fn from(value: CliComponent) -> Self {
        match value {
            CliComponent::Major => Self::Major,
            CliComponent::Minor => Self::Minor,
            CliComponent::Build => Self::Build,
            CliComponent::Revision => Self::Revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CliVersionKind::Primary, VersionKind::Primary)]
    #[case(CliVersionKind::File, VersionKind::File)]
    #[case(CliVersionKind::Informational, VersionKind::Informational)]
    fn test_cli_version_kind(#[case] cli: CliVersionKind, #[case] expected: VersionKind) {
        assert_eq!(VersionKind::from(cli), expected);
    }

    #[rstest]
    #[case(CliComponent::Major, ComponentIndex::Major)]
    #[case(CliComponent::Minor, ComponentIndex::Minor)]
    #[case(CliComponent::Build, ComponentIndex::Build)]
    #[case(CliComponent::Revision, ComponentIndex::Revision)]
    fn test_cli_component(#[case] cli: CliComponent, #[case] expected: ComponentIndex) {
        assert_eq!(ComponentIndex::from(cli), expected);
    }
}
