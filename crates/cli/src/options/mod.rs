mod format_options;
mod version_options;

pub use format_options::FormatOptions;
pub use version_options::{CliComponent, CliVersionKind};
