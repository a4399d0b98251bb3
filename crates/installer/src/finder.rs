use std::path::Path;

use verstamp_core::{Config, FormatFinder, VersionFormat, extension_of};

use crate::{InstallerFormat, InstallerKind};

#[derive(Debug, Default)]
pub struct InstallerFinder;

impl InstallerFinder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatFinder for InstallerFinder {
    fn name(&self) -> &'static str {
        "installer projects"
    }

    fn file_patterns(&self) -> &[&str] {
        &["*.vdproj", "*.wxi"]
    }

    fn matches(&self, path: &Path) -> bool {
        matches!(extension_of(path).as_deref(), Some("vdproj" | "wxi"))
    }

    /// Deployment projects without a recognisable `"Deployable"` block are skipped.
    fn format_for(
        &self,
        path: &Path,
        text: &str,
        _config: &Config,
    ) -> Option<Box<dyn VersionFormat>> {
        let kind = InstallerKind::detect(path, text)?;
        Some(Box::new(InstallerFormat::new(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guid::is_guid;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;
    use verstamp_core::{StreamState, Version, VersionKind, VersionStream, read_buffer};

    const SETUP_PROJECT: &str = "\"DeployProject\"\r\n{\r\n\"Deployable\"\r\n    {\r\n        \"Product\"\r\n        {\r\n        \"ProductCode\" = \"8:{5B7E2A5F-0C1D-4E2F-9A3B-1C2D3E4F5A6B}\"\r\n        \"PackageCode\" = \"8:{0A1B2C3D-4E5F-6A7B-8C9D-0E1F2A3B4C5D}\"\r\n        \"ProductVersion\" = \"8:1.0.0\"\r\n        }\r\n    }\r\n}\r\n";

    async fn open(path: &Path) -> VersionStream {
        let buffer = read_buffer(path).await.unwrap();
        let format = InstallerFinder::new()
            .format_for(path, buffer.text(), &Config::default())
            .unwrap();
        VersionStream::from_buffer(path.to_path_buf(), buffer, format)
    }

    #[rstest]
    #[case("Setup/Setup.vdproj", true)]
    #[case("Installer/Version.WXI", true)]
    #[case("Installer/Product.wxs", false)]
    fn test_matches(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(InstallerFinder::new().matches(Path::new(path)), expected);
    }

    #[test]
    fn test_format_for_unknown_project() {
        assert!(
            InstallerFinder::default()
                .format_for(Path::new("a.vdproj"), "\"DeployProject\"\n{\n}\n", &Config::default())
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_regenerates_linked_codes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Setup.vdproj");
        fs::write(&path, SETUP_PROJECT).unwrap();

        let mut stream = open(&path).await;
        let versions = stream.get_versions();
        assert_eq!(versions.informational, Version::from_numbers(1, 0, 0, 0));
        assert!(versions.primary.is_empty());
        assert!(versions.file.is_empty());

        let regenerated = stream
            .update_version(VersionKind::Informational, &Version::from_numbers(1, 1, 0, 0), true)
            .await
            .unwrap();
        assert_eq!(stream.state(), StreamState::Persisted);
        assert_eq!(regenerated.len(), 2);
        let mut expected = SETUP_PROJECT.replace("8:1.0.0", "8:1.1.0");
        for identifier in &regenerated {
            assert!(is_guid(&identifier.new));
            assert_ne!(identifier.new, identifier.old);
            expected = expected.replace(&identifier.old, &identifier.new);
        }

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, expected);
        assert!(!written.contains("{0A1B2C3D-4E5F-6A7B-8C9D-0E1F2A3B4C5D}"));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_update_without_regeneration() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Setup.vdproj");
        fs::write(&path, SETUP_PROJECT).unwrap();

        let mut stream = open(&path).await;
        let regenerated = stream
            .update_version(VersionKind::Informational, &Version::from_numbers(2, 0, 0, 0), false)
            .await
            .unwrap();
        assert!(regenerated.is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            SETUP_PROJECT.replace("8:1.0.0", "8:2.0.0")
        );

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_missing_version_key_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Version.wxi");
        fs::write(
            &path,
            "<Include>\n  <?define Manufacturer = \"Contoso\" ?>\n</Include>\n",
        )
        .unwrap();

        let stream = open(&path).await;
        assert!(stream.get_versions().is_empty());
        assert!(stream.try_get_versions().unwrap().is_empty());

        temp_dir.close().unwrap();
    }
}
