use std::path::Path;

use verstamp_core::{Config, FormatFinder, VersionFormat, extension_of};

use crate::ResourceScriptFormat;

#[derive(Debug, Default)]
pub struct ResourceScriptFinder;

impl ResourceScriptFinder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatFinder for ResourceScriptFinder {
    fn name(&self) -> &'static str {
        "resource scripts"
    }

    fn file_patterns(&self) -> &[&str] {
        &["*.rc", "*.rc2"]
    }

    fn matches(&self, path: &Path) -> bool {
        matches!(extension_of(path).as_deref(), Some("rc" | "rc2"))
    }

    /// Scripts without a `VERSIONINFO` block still get the format; their slots read as empty.
    fn format_for(
        &self,
        path: &Path,
        _text: &str,
        _config: &Config,
    ) -> Option<Box<dyn VersionFormat>> {
        self.matches(path)
            .then(|| Box::new(ResourceScriptFormat::new()) as Box<dyn VersionFormat>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;
    use verstamp_core::{TextEncoding, Version, VersionKind, VersionStream};

    const SCRIPT: &str = "VS_VERSION_INFO VERSIONINFO\r\n FILEVERSION 1,0,0,0\r\n PRODUCTVERSION 1,0,0,0\r\nBEGIN\r\n  BLOCK \"StringFileInfo\"\r\n  BEGIN\r\n    BLOCK \"040904b0\"\r\n    BEGIN\r\n      VALUE \"FileVersion\", \"1.0.0.0\\0\"\r\n      VALUE \"ProductVersion\", \"1.0\\0\"\r\n    END\r\n  END\r\nEND\r\n";

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[rstest]
    #[case("app.rc", true)]
    #[case("res/App.RC2", true)]
    #[case("resource.h", false)]
    #[case("app.rcx", false)]
    fn test_matches(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(ResourceScriptFinder::new().matches(Path::new(path)), expected);
    }

    #[test]
    fn test_format_for() {
        let finder = ResourceScriptFinder::default();
        let format = finder
            .format_for(Path::new("app.rc"), "", &Config::default())
            .unwrap();
        assert_eq!(format.slots(), &[VersionKind::File, VersionKind::Informational]);
        assert!(
            finder
                .format_for(Path::new("app.cs"), "", &Config::default())
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_utf16_script() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.rc");
        fs::write(&path, utf16le_with_bom(SCRIPT)).unwrap();

        let format = ResourceScriptFinder::new()
            .format_for(&path, "", &Config::default())
            .unwrap();
        let mut stream = VersionStream::load(&path, format).await.unwrap();
        assert_eq!(stream.encoding(), TextEncoding::Utf16Le { bom: true });

        let versions = stream.get_versions();
        assert!(versions.primary.is_empty());
        assert_eq!(versions.file, Version::from_numbers(1, 0, 0, 0));
        assert_eq!(versions.informational, Version::from_numbers(1, 0, 0, 0));

        let target = Version::from_numbers(2, 1, 3, 7);
        stream
            .update_version(VersionKind::File, &target, true)
            .await
            .unwrap();
        stream
            .update_version(VersionKind::Informational, &target, true)
            .await
            .unwrap();

        let expected = SCRIPT
            .replace("FILEVERSION 1,0,0,0", "FILEVERSION 2,1,3,7")
            .replace("PRODUCTVERSION 1,0,0,0", "PRODUCTVERSION 2,1,3,7")
            .replace("\"1.0.0.0\\0\"", "\"2.1.3.7\\0\"")
            .replace("\"1.0\\0\"", "\"2.1\\0\"");
        assert_eq!(fs::read(&path).unwrap(), utf16le_with_bom(&expected));

        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_primary_slot_is_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.rc");
        fs::write(&path, SCRIPT).unwrap();

        let format = ResourceScriptFinder::new()
            .format_for(&path, "", &Config::default())
            .unwrap();
        let mut stream = VersionStream::load(&path, format).await.unwrap();
        assert!(stream.set_version(VersionKind::Primary, "1.0.0.0").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), SCRIPT);

        temp_dir.close().unwrap();
    }
}
