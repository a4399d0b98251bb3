use std::path::Path;

use crate::{Component, Config, Version, VersionError, VersionKind};

/// Why a substitution could not be performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstituteError {
    /// The structural text of the slot is not in the buffer
    NotFound,
    /// The new value does not fit the slot's grammar
    Invalid(VersionError),
}

/// A linked identifier that was replaced after a version change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegeneratedIdentifier {
    pub name: String,
    pub old: String,
    pub new: String,
}

/// Format-specific knowledge of where a version lives in a file and how it is written.
///
/// Implementations work on text only. Loading, encoding and persistence belong to
/// [`crate::VersionStream`].
pub trait VersionFormat: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Slots this format is able to carry.
    fn slots(&self) -> &[VersionKind];

    fn supports(&self, kind: VersionKind) -> bool {
        self.slots().contains(&kind)
    }

    /// Raw version token of `kind`, or `None` if the slot is absent from `text`.
    fn extract(&self, text: &str, kind: VersionKind) -> Option<String>;

    /// Interpret an extracted token. Missing trailing components become wildcards unless
    /// the format says otherwise.
    ///
    /// # Errors
    /// Returns [`VersionError::Format`] if the token is not a version.
    fn parse(&self, _kind: VersionKind, token: &str) -> Result<Version, VersionError> {
        Version::parse(token, Component::Wildcard)
    }

    /// Whether a non-numeric token in this slot is an error or an accepted free-text value.
    fn requires_numeric(&self, _kind: VersionKind) -> bool {
        true
    }

    /// Text to write for `version` in slot `kind`.
    ///
    /// # Errors
    /// Returns an error if the format cannot express the version (e.g. wildcards where
    /// only numbers are allowed).
    fn render(&self, _kind: VersionKind, version: &Version) -> Result<String, VersionError> {
        Ok(version.to_string())
    }

    /// Replace the version token(s) of `kind` with `value`, leaving every other
    /// character of `text` untouched.
    ///
    /// # Errors
    /// Returns [`SubstituteError::NotFound`] if the slot cannot be located and
    /// [`SubstituteError::Invalid`] if `value` does not fit the slot.
    fn substitute(&self, text: &str, kind: VersionKind, value: &str)
    -> Result<String, SubstituteError>;

    /// Replace the identifiers that must change together with the version.
    fn regenerate_identifiers(&self, text: &str) -> (String, Vec<RegeneratedIdentifier>) {
        (text.to_string(), Vec::new())
    }
}

/// Recognises the files one format family is responsible for.
pub trait FormatFinder: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// File name patterns handled by this finder (for display and init).
    fn file_patterns(&self) -> &[&str];

    fn matches(&self, path: &Path) -> bool;

    /// Pick the adapter for a matching file. `text` is the decoded content, for formats
    /// whose layout depends on what the file declares.
    fn format_for(&self, path: &Path, text: &str, config: &Config)
    -> Option<Box<dyn VersionFormat>>;
}

/// Lower-cased extension of `path`.
#[must_use]
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct PlainFormat;

    impl VersionFormat for PlainFormat {
        fn name(&self) -> &'static str {
            "plain"
        }

        fn slots(&self) -> &[VersionKind] {
            &[VersionKind::File]
        }

        fn extract(&self, text: &str, _kind: VersionKind) -> Option<String> {
            text.lines().next().map(str::to_string)
        }

        fn substitute(
            &self,
            _text: &str,
            _kind: VersionKind,
            value: &str,
        ) -> Result<String, SubstituteError> {
            Ok(value.to_string())
        }
    }

    #[test]
    fn test_default_methods() {
        let format = PlainFormat;
        assert!(format.supports(VersionKind::File));
        assert!(!format.supports(VersionKind::Primary));
        assert!(format.requires_numeric(VersionKind::File));
        assert_eq!(
            format.parse(VersionKind::File, "1.0").unwrap(),
            "1.0.*".parse().unwrap()
        );
        let version: Version = "1.2.*".parse().unwrap();
        assert_eq!(format.render(VersionKind::File, &version).unwrap(), "1.2.*");
        let (text, regenerated) = format.regenerate_identifiers("keep");
        assert_eq!(text, "keep");
        assert!(regenerated.is_empty());
    }

    #[rstest]
    #[case("Properties/AssemblyInfo.CS", Some("cs"))]
    #[case("app.rc", Some("rc"))]
    #[case("Makefile", None)]
    fn test_extension_of(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_eq!(extension_of(Path::new(path)).as_deref(), expected);
    }
}
