//! # verstamp-core
//!
//! Version model and rewriting engine shared by every verstamp format adapter.
//!
//! [`Version`] is an immutable four-component version number with wildcard (`*`) and
//! increment (`+`) placeholders, ordering, pattern application and overflow detection.
//! [`VersionSet`] groups the three version slots a project may carry. A
//! [`VersionStream`] binds one loaded file to a [`VersionFormat`] adapter and rewrites
//! version tokens in place without disturbing any other byte of the file.

pub mod config;
pub mod error;
pub mod format;
pub mod numbering;
pub mod slot_pattern;
pub mod stream;
pub mod text_buffer;
pub mod version;
pub mod version_kind;
pub mod version_set;

pub use config::Config;
pub use error::{EncodingError, StreamError, VersionError};
pub use format::{
    FormatFinder, RegeneratedIdentifier, SubstituteError, VersionFormat, extension_of,
};
pub use numbering::{ComponentIndex, NumberingOptions, ResetPolicy, ResetTarget};
pub use slot_pattern::{SlotMatch, SlotPattern, splice};
pub use stream::{StreamState, VersionStream, read_buffer};
pub use text_buffer::{TextBuffer, TextEncoding};
pub use version::{Component, FormatMode, MAX_COMPONENT, Version};
pub use version_kind::VersionKind;
pub use version_set::VersionSet;
