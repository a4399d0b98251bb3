use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The version identities a project may carry.
///
/// A given file format only ever populates a subset of these slots: resource scripts
/// have no primary slot, installer projects only carry the informational one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VersionKind {
    /// Build identity (`AssemblyVersion`)
    Primary,
    /// File identity (`AssemblyFileVersion`, `FILEVERSION`)
    File,
    /// Product identity (`AssemblyInformationalVersion`, `PRODUCTVERSION`, `ProductVersion`)
    Informational,
}

impl VersionKind {
    pub const ALL: [Self; 3] = [Self::Primary, Self::File, Self::Informational];
}

impl Display for VersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Primary => "primary",
                Self::File => "file",
                Self::Informational => "informational",
            }
        )
    }
}
