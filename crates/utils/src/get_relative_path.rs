use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// `absolute_path` relative to `root`.
pub fn get_relative_path(root: &Path, absolute_path: &Path) -> Result<PathBuf> {
    absolute_path
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .with_context(|| {
            format!(
                "{} is not inside {}",
                absolute_path.display(),
                root.display()
            )
        })
}
