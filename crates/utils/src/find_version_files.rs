use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use ignore::WalkBuilder;
use verstamp_core::{Config, FormatFinder};

use crate::get_relative_path;

/// Every file under `root` that one of `finders` handles, sorted by path.
///
/// Honors `.gitignore`/`.ignore` files and skips hidden entries. Paths matching one of
/// the configured `ignore` globs (relative to `root`) are left out.
///
/// # Errors
/// Returns error if an ignore pattern is invalid or the directory walk fails.
pub fn find_version_files(
    root: &Path,
    finders: &[Box<dyn FormatFinder>],
    config: &Config,
) -> Result<Vec<PathBuf>> {
    let ignore_patterns = config
        .ignore
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {pattern}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).require_git(false).build() {
        let entry = entry.context("Failed to walk directory")?;
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }
        let path = entry.path();
        if !finders.iter().any(|finder| finder.matches(path)) {
            continue;
        }
        let relative_path = get_relative_path(root, path)?;
        if ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(&relative_path))
        {
            tracing::debug!(path = %relative_path.display(), "ignored by configuration");
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use verstamp_assembly::AssemblyInfoFinder;
    use verstamp_resource::ResourceScriptFinder;

    fn finders() -> Vec<Box<dyn FormatFinder>> {
        vec![
            Box::new(AssemblyInfoFinder::new()),
            Box::new(ResourceScriptFinder::new()),
        ]
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }

    #[test]
    fn test_find_version_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "App/Properties/AssemblyInfo.cs");
        touch(root, "App/Program.cs");
        touch(root, "Native/app.rc");
        touch(root, "README.md");

        let files = find_version_files(root, &finders(), &Config::default()).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("App/Properties/AssemblyInfo.cs"),
                root.join("Native/app.rc"),
            ]
        );
        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_version_files_respects_ignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "App/Properties/AssemblyInfo.cs");
        touch(root, "legacy/Old/AssemblyInfo.cs");
        touch(root, "build/app.rc");
        fs::write(root.join(".gitignore"), "build/\n").unwrap();

        let config = Config {
            ignore: vec!["legacy/**".to_string()],
            ..Config::default()
        };
        let files = find_version_files(root, &finders(), &config).unwrap();
        assert_eq!(files, vec![root.join("App/Properties/AssemblyInfo.cs")]);
        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_version_files_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            ignore: vec!["[".to_string()],
            ..Config::default()
        };
        assert!(find_version_files(temp_dir.path(), &finders(), &config).is_err());
        temp_dir.close().unwrap();
    }
}
