//! # verstamp-installer
//!
//! Installer project support for verstamp.
//!
//! Visual Studio deployment projects (`.vdproj`) come in three kinds, told apart by the
//! first block inside `"Deployable"`: an MSI package (`"Product"`), a merge module
//! (`"Module"`) or a cabinet (`"CabFile"`). WiX include files (`.wxi`) carry the version
//! as a preprocessor define. Packages link a product code to their version; it can be
//! regenerated after every version change.

pub mod finder;
pub mod format;
pub mod guid;
pub mod kind;

pub use finder::InstallerFinder;
pub use format::InstallerFormat;
pub use kind::InstallerKind;
