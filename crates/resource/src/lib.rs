//! # verstamp-resource
//!
//! Resource script support for verstamp.
//!
//! A `VERSIONINFO` resource carries each version twice: as a numeric header statement
//! (`FILEVERSION 1,0,0,0`) and as a string table entry (`VALUE "FileVersion", "1.0.0.0\0"`).
//! Both copies are rewritten together, keeping the separators and the component count
//! each copy already uses.

pub mod finder;
pub mod format;

pub use finder::ResourceScriptFinder;
pub use format::ResourceScriptFormat;
