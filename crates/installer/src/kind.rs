use std::{fmt::Display, path::Path, sync::LazyLock};

use regex::Regex;
use verstamp_core::extension_of;

static DEPLOYABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*"Deployable"[ \t]*\r?$"#).expect("hardcoded regex must compile")
});

static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*"(Product|Module|CabFile)"[ \t]*\r?$"#)
        .expect("hardcoded regex must compile")
});

/// Installer project type, read once when the file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    /// MSI setup project
    Package,
    MergeModule,
    Cab,
    /// WiX include file with `<?define ?>` variables
    WixInclude,
}

impl InstallerKind {
    /// Kind of an installer file, or `None` if the content does not declare one.
    #[must_use]
    pub fn detect(path: &Path, text: &str) -> Option<Self> {
        match extension_of(path)?.as_str() {
            "vdproj" => {
                let deployable = DEPLOYABLE_PATTERN.find(text)?;
                let block = BLOCK_PATTERN.captures_at(text, deployable.end())?;
                match block.get(1)?.as_str() {
                    "Product" => Some(Self::Package),
                    "Module" => Some(Self::MergeModule),
                    "CabFile" => Some(Self::Cab),
                    _ => None,
                }
            }
            "wxi" => Some(Self::WixInclude),
            _ => None,
        }
    }

    /// Allowed number of version components.
    #[must_use]
    pub const fn component_range(self) -> (usize, usize) {
        match self {
            Self::Package => (3, 3),
            Self::MergeModule | Self::Cab => (2, 4),
            Self::WixInclude => (3, 4),
        }
    }

    /// Whether a product code is linked to the version.
    #[must_use]
    pub const fn has_product_code(self) -> bool {
        matches!(self, Self::Package | Self::WixInclude)
    }
}

impl Display for InstallerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Package => "setup project",
                Self::MergeModule => "merge module project",
                Self::Cab => "cab project",
                Self::WixInclude => "WiX include",
            }
        )
    }
}
