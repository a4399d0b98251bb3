use std::path::{Path, PathBuf};

use tokio::fs::{read, write};

use crate::{
    RegeneratedIdentifier, StreamError, SubstituteError, TextBuffer, TextEncoding, Version,
    VersionFormat, VersionKind, VersionSet,
};

/// Whether the in-memory buffer has been written back since the last change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Loaded,
    Persisted,
}

/// One version-bearing file bound to the adapter that understands it.
///
/// All edits go to the in-memory buffer; nothing reaches the disk before [`flush`].
/// Instances are independent of each other, but a single instance must not be used
/// from several threads at once.
///
/// [`flush`]: VersionStream::flush
#[derive(Debug)]
pub struct VersionStream {
    path: PathBuf,
    buffer: TextBuffer,
    format: Box<dyn VersionFormat>,
    state: StreamState,
}

impl VersionStream {
    /// Read and decode `path`.
    ///
    /// # Errors
    /// Returns [`StreamError::FileAccess`] if the file cannot be read,
    /// [`StreamError::EmptyFile`] if it has no content and [`StreamError::Encoding`] if
    /// it cannot be decoded.
    pub async fn load(
        path: impl Into<PathBuf>,
        format: Box<dyn VersionFormat>,
    ) -> Result<Self, StreamError> {
        let path = path.into();
        let buffer = read_buffer(&path).await?;
        Ok(Self::from_buffer(path, buffer, format))
    }

    #[must_use]
    pub fn from_buffer(path: PathBuf, buffer: TextBuffer, format: Box<dyn VersionFormat>) -> Self {
        tracing::debug!(
            path = %path.display(),
            format = format.name(),
            encoding = %buffer.encoding(),
            "loaded version file"
        );
        Self {
            path,
            buffer,
            format,
            state: StreamState::Loaded,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.buffer.encoding()
    }

    #[must_use]
    pub const fn state(&self) -> StreamState {
        self.state
    }

    #[must_use]
    pub fn format(&self) -> &dyn VersionFormat {
        self.format.as_ref()
    }

    /// Version token of `kind` exactly as written in the file.
    #[must_use]
    pub fn raw_version(&self, kind: VersionKind) -> Option<String> {
        if !self.format.supports(kind) {
            return None;
        }
        self.format.extract(self.buffer.text(), kind)
    }

    /// Parsed version of `kind`; [`Version::EMPTY`] if the file does not carry the slot.
    ///
    /// # Errors
    /// Returns [`StreamError::Format`] if the token is not a valid version.
    pub fn version(&self, kind: VersionKind) -> Result<Version, StreamError> {
        let Some(token) = self.raw_version(kind) else {
            return Ok(Version::EMPTY);
        };
        self.format
            .parse(kind, &token)
            .map_err(|source| StreamError::Format {
                path: self.path.clone(),
                slot: kind,
                text: token,
                source,
            })
    }

    /// All slots of the file. Invalid tokens are logged and leave their slot empty.
    #[must_use]
    pub fn get_versions(&self) -> VersionSet {
        let mut versions = VersionSet::EMPTY;
        for kind in self.format.slots() {
            match self.version(*kind) {
                Ok(version) => versions[*kind] = version,
                Err(error) if self.format.requires_numeric(*kind) => {
                    tracing::warn!(%error, "ignoring invalid version");
                }
                Err(error) => {
                    tracing::debug!(%error, "free-text version left out of the version set");
                }
            }
        }
        versions
    }

    /// Like [`get_versions`](Self::get_versions) but fails on the first invalid slot that
    /// must be numeric.
    ///
    /// # Errors
    /// Returns [`StreamError::Format`] for an invalid numeric slot.
    pub fn try_get_versions(&self) -> Result<VersionSet, StreamError> {
        let mut versions = VersionSet::EMPTY;
        for kind in self.format.slots() {
            match self.version(*kind) {
                Ok(version) => versions[*kind] = version,
                Err(error) if self.format.requires_numeric(*kind) => return Err(error),
                Err(_) => {}
            }
        }
        Ok(versions)
    }

    /// Substitute the version of `kind` in the buffer without touching the disk.
    ///
    /// # Errors
    /// Returns [`StreamError::UnsupportedSlot`] if the format has no such slot,
    /// [`StreamError::InvariantViolation`] if the slot can no longer be located and
    /// [`StreamError::Format`] if `value` does not fit the slot.
    pub fn set_version(&mut self, kind: VersionKind, value: &str) -> Result<(), StreamError> {
        if !self.format.supports(kind) {
            return Err(StreamError::UnsupportedSlot {
                path: self.path.clone(),
                slot: kind,
            });
        }
        let text = self
            .format
            .substitute(self.buffer.text(), kind, value)
            .map_err(|error| match error {
                SubstituteError::NotFound => StreamError::InvariantViolation {
                    path: self.path.clone(),
                    slot: kind,
                },
                SubstituteError::Invalid(source) => StreamError::Format {
                    path: self.path.clone(),
                    slot: kind,
                    text: value.to_string(),
                    source,
                },
            })?;
        tracing::debug!(path = %self.path.display(), slot = %kind, value, "substituted version");
        self.buffer.set_text(text);
        self.state = StreamState::Loaded;
        Ok(())
    }

    /// Substitute and write the file immediately.
    ///
    /// # Errors
    /// See [`set_version`](Self::set_version) and [`flush`](Self::flush).
    pub async fn save_version(
        &mut self,
        kind: VersionKind,
        value: &str,
    ) -> Result<(), StreamError> {
        self.set_version(kind, value)?;
        self.flush().await
    }

    /// Replace the identifiers linked to the version (installer product codes). A no-op
    /// for formats without linked identifiers.
    pub fn regenerate_identifiers(&mut self) -> Vec<RegeneratedIdentifier> {
        let (text, regenerated) = self.format.regenerate_identifiers(self.buffer.text());
        if !regenerated.is_empty() {
            for identifier in &regenerated {
                tracing::debug!(
                    path = %self.path.display(),
                    name = %identifier.name,
                    old = %identifier.old,
                    new = %identifier.new,
                    "regenerated identifier"
                );
            }
            self.buffer.set_text(text);
            self.state = StreamState::Loaded;
        }
        regenerated
    }

    /// Render `version` for the slot, substitute it, optionally regenerate linked
    /// identifiers and write the file.
    ///
    /// # Errors
    /// Returns [`StreamError::Format`] if the format cannot express `version`, and any
    /// error of [`save_version`](Self::save_version).
    pub async fn update_version(
        &mut self,
        kind: VersionKind,
        version: &Version,
        regenerate: bool,
    ) -> Result<Vec<RegeneratedIdentifier>, StreamError> {
        let value = self
            .format
            .render(kind, version)
            .map_err(|source| StreamError::Format {
                path: self.path.clone(),
                slot: kind,
                text: version.to_string(),
                source,
            })?;
        self.set_version(kind, &value)?;
        let regenerated = if regenerate {
            self.regenerate_identifiers()
        } else {
            Vec::new()
        };
        self.flush().await?;
        Ok(regenerated)
    }

    /// Re-encode the buffer with its encoding and write it to disk.
    ///
    /// # Errors
    /// Returns [`StreamError::Encoding`] or [`StreamError::FileAccess`].
    pub async fn flush(&mut self) -> Result<(), StreamError> {
        let bytes = self.buffer.encode().map_err(|source| StreamError::Encoding {
            path: self.path.clone(),
            source,
        })?;
        write(&self.path, bytes)
            .await
            .map_err(|source| StreamError::FileAccess {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), "wrote version file");
        self.state = StreamState::Persisted;
        Ok(())
    }
}

/// Read and decode a file that is expected to hold text.
///
/// # Errors
/// Returns [`StreamError::FileAccess`], [`StreamError::EmptyFile`] or
/// [`StreamError::Encoding`].
pub async fn read_buffer(path: &Path) -> Result<TextBuffer, StreamError> {
    let bytes = read(path).await.map_err(|source| StreamError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(StreamError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    TextBuffer::decode(&bytes).map_err(|source| StreamError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}
