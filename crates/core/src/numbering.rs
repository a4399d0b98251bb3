use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Position of a component inside a four-part version number.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComponentIndex {
    Major = 0,
    Minor = 1,
    Build = 2,
    Revision = 3,
}

static ORDERED: [ComponentIndex; 4] = ComponentIndex::ALL;

impl ComponentIndex {
    pub const ALL: [Self; 4] = [Self::Major, Self::Minor, Self::Build, Self::Revision];

    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Components to the right of this one, most significant first.
    #[must_use]
    pub fn less_significant(self) -> &'static [Self] {
        &ORDERED[self.position() + 1..]
    }

    /// Components to the left of this one, most significant first.
    #[must_use]
    pub fn more_significant(self) -> &'static [Self] {
        &ORDERED[..self.position()]
    }
}

impl Display for ComponentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Major => "major",
                Self::Minor => "minor",
                Self::Build => "build",
                Self::Revision => "revision",
            }
        )
    }
}

/// Baseline that build and revision fall back to when reset.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResetTarget {
    #[default]
    Zero,
    One,
}

impl ResetTarget {
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// Which less significant components go back to their baseline when a
/// more significant one changes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPolicy {
    #[serde(default = "enabled")]
    pub minor_on_major: bool,
    #[serde(default = "enabled")]
    pub build_on_major: bool,
    #[serde(default = "enabled")]
    pub build_on_minor: bool,
    #[serde(default = "enabled")]
    pub revision_on_major: bool,
    #[serde(default = "enabled")]
    pub revision_on_minor: bool,
    #[serde(default = "enabled")]
    pub revision_on_build: bool,
}

fn enabled() -> bool {
    true
}

impl ResetPolicy {
    /// Policy that never resets anything.
    pub const NONE: Self = Self {
        minor_on_major: false,
        build_on_major: false,
        build_on_minor: false,
        revision_on_major: false,
        revision_on_minor: false,
        revision_on_build: false,
    };

    /// Returns true if a change of `changed` forces `target` back to its baseline.
    #[must_use]
    pub const fn resets(&self, changed: ComponentIndex, target: ComponentIndex) -> bool {
        use ComponentIndex::{Build, Major, Minor, Revision};
        match (changed, target) {
            (Major, Minor) => self.minor_on_major,
            (Major, Build) => self.build_on_major,
            (Minor, Build) => self.build_on_minor,
            (Major, Revision) => self.revision_on_major,
            (Minor, Revision) => self.revision_on_minor,
            (Build, Revision) => self.revision_on_build,
            _ => false,
        }
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            minor_on_major: true,
            build_on_major: true,
            build_on_minor: true,
            revision_on_major: true,
            revision_on_minor: true,
            revision_on_build: true,
        }
    }
}

/// Numbering scheme used by increments and pattern application.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NumberingOptions {
    /// Amount added by an increment (default: 1)
    #[serde(default = "default_increment_step")]
    pub increment_step: u32,

    /// Baseline for reset build and revision components (default: zero)
    #[serde(default)]
    pub reset_to: ResetTarget,

    #[serde(default)]
    pub reset: ResetPolicy,
}

fn default_increment_step() -> u32 {
    1
}

impl NumberingOptions {
    /// Value a component takes when reset. Minor always restarts at zero.
    #[must_use]
    pub const fn reset_value(&self, index: ComponentIndex) -> u32 {
        match index {
            ComponentIndex::Major | ComponentIndex::Minor => 0,
            ComponentIndex::Build | ComponentIndex::Revision => self.reset_to.value(),
        }
    }
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            increment_step: default_increment_step(),
            reset_to: ResetTarget::default(),
            reset: ResetPolicy::default(),
        }
    }
}
