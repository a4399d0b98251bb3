use std::path::PathBuf;

use thiserror::Error;

use crate::{ComponentIndex, TextEncoding, VersionKind};

/// Failures of the version value model. All of them are recoverable by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("{text:?} is not a valid version")]
    Format { text: String },

    #[error("{component} component overflows when incrementing {value}")]
    Overflow { component: ComponentIndex, value: u32 },

    #[error("{component} component is not a number and cannot be incremented")]
    Unresolved { component: ComponentIndex },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("character {character:?} cannot be represented in {encoding}")]
    Unencodable {
        character: char,
        encoding: TextEncoding,
    },

    #[error("content is not valid {encoding}")]
    Undecodable { encoding: TextEncoding },
}

/// Failures bound to one version-bearing file.
///
/// None of them affect other files; the caller reports and moves on.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", path.display())]
    EmptyFile { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },

    #[error("invalid {slot} version {text:?} in {}", path.display())]
    Format {
        path: PathBuf,
        slot: VersionKind,
        text: String,
        #[source]
        source: VersionError,
    },

    #[error("{slot} version can no longer be located in {}", path.display())]
    InvariantViolation { path: PathBuf, slot: VersionKind },

    #[error("{} does not carry a {slot} version", path.display())]
    UnsupportedSlot { path: PathBuf, slot: VersionKind },
}
