use std::path::Path;

use anyhow::Result;
use verstamp_core::{Config, FormatFinder, VersionStream, read_buffer};

/// Load `path` with the first finder that has a format for it.
///
/// Returns `Ok(None)` if no finder claims the file, e.g. a deployment project of an
/// unknown kind.
///
/// # Errors
/// Returns error if the file cannot be read or decoded.
pub async fn open_version_file(
    path: &Path,
    finders: &[Box<dyn FormatFinder>],
    config: &Config,
) -> Result<Option<VersionStream>> {
    let buffer = read_buffer(path).await?;
    let format = finders
        .iter()
        .filter(|finder| finder.matches(path))
        .find_map(|finder| finder.format_for(path, buffer.text(), config));
    let Some(format) = format else {
        tracing::debug!(path = %path.display(), "no format for file");
        return Ok(None);
    };
    Ok(Some(VersionStream::from_buffer(
        path.to_path_buf(),
        buffer,
        format,
    )))
}
