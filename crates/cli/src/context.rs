use crate::finders::get_finders;
use anyhow::Result;
use std::path::{Path, PathBuf};
use verstamp_core::{Config, FormatFinder, VersionStream};
use verstamp_utils::{find_version_files, get_relative_path, get_verstamp_config, open_version_file};

/// A discovered version file: its path relative to the root and the loaded stream, or
/// the reason it could not be loaded.
pub struct LoadedFile {
    pub relative_path: PathBuf,
    pub stream: Result<VersionStream>,
}

pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub finders: Vec<Box<dyn FormatFinder>>,
}

impl CommandContext {
    /// # Errors
    /// Returns error if the current directory or the configuration cannot be read.
    pub async fn new(path: Option<&Path>) -> Result<Self> {
        let root = match path {
            Some(path) => path.to_path_buf(),
            None => Self::current_dir()?,
        };
        let config = get_verstamp_config(&root).await?;
        Ok(Self {
            root,
            config,
            finders: get_finders(),
        })
    }

    /// # Errors
    /// Returns error if retrieving the current directory fails.
    pub fn current_dir() -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    /// Discover and load every version file. Files that fail to load are kept with their
    /// error; files no format claims are dropped.
    ///
    /// # Errors
    /// Returns error if the directory walk fails.
    pub async fn load_files(&self) -> Result<Vec<LoadedFile>> {
        let paths = find_version_files(&self.root, &self.finders, &self.config)?;
        let loaded = futures::future::join_all(paths.iter().map(async |path| {
            (
                path,
                open_version_file(path, &self.finders, &self.config).await,
            )
        }))
        .await;

        let mut files = Vec::new();
        for (path, stream) in loaded {
            let stream = match stream {
                Ok(Some(stream)) => Ok(stream),
                Ok(None) => continue,
                Err(error) => Err(error),
            };
            files.push(LoadedFile {
                relative_path: get_relative_path(&self.root, path)?,
                stream,
            });
        }
        Ok(files)
    }
}
