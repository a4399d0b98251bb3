//! # verstamp-assembly
//!
//! Assembly attribute support for verstamp.
//!
//! Locates `AssemblyVersion`, `AssemblyFileVersion` and `AssemblyInformationalVersion`
//! declarations in attribute files of several .NET source dialects. Each dialect wraps
//! the declaration in its own brackets and prefix keyword; the short attribute name is
//! tried first, then the `...Attribute` spelling.

pub mod dialect;
pub mod finder;
pub mod format;

pub use dialect::AttributeDialect;
pub use finder::AssemblyInfoFinder;
pub use format::AssemblyInfoFormat;
