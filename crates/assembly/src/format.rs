use std::sync::LazyLock;

use regex::Regex;
use verstamp_core::{
    Component, SlotPattern, SubstituteError, Version, VersionError, VersionFormat, VersionKind,
    splice,
};

use crate::AttributeDialect;

static QUOTED_VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(\d+(?:\.(?:\d+|\*)){1,3})""#).expect("hardcoded regex must compile")
});

const SLOTS: [VersionKind; 3] = [
    VersionKind::Primary,
    VersionKind::File,
    VersionKind::Informational,
];

fn attribute_name(kind: VersionKind) -> &'static str {
    match kind {
        VersionKind::Primary => "AssemblyVersion",
        VersionKind::File => "AssemblyFileVersion",
        VersionKind::Informational => "AssemblyInformationalVersion",
    }
}

/// Attribute-style version file such as `Properties/AssemblyInfo.cs`.
#[derive(Debug)]
pub struct AssemblyInfoFormat {
    dialect: AttributeDialect,
    informational_must_be_numeric: bool,
    /// Per slot: short attribute name first, then the `...Attribute` spelling
    patterns: [[SlotPattern; 2]; 3],
}

impl AssemblyInfoFormat {
    /// # Panics
    /// Never in practice: the generated patterns only embed escaped literals.
    #[must_use]
    pub fn new(dialect: AttributeDialect, informational_must_be_numeric: bool) -> Self {
        let patterns = SLOTS.map(|kind| {
            let short = attribute_name(kind).to_string();
            let long = format!("{short}Attribute");
            [short, long].map(|name| {
                let coarse = Regex::new(&dialect.declaration_pattern(&name))
                    .expect("generated attribute regex must compile");
                SlotPattern::numeric_or_quoted(coarse, QUOTED_VERSION_PATTERN.clone())
            })
        });
        Self {
            dialect,
            informational_must_be_numeric,
            patterns,
        }
    }

    fn patterns(&self, kind: VersionKind) -> &[SlotPattern; 2] {
        match kind {
            VersionKind::Primary => &self.patterns[0],
            VersionKind::File => &self.patterns[1],
            VersionKind::Informational => &self.patterns[2],
        }
    }

    fn locate(&self, text: &str, kind: VersionKind) -> Option<verstamp_core::SlotMatch> {
        self.patterns(kind)
            .iter()
            .find_map(|pattern| pattern.locate(text))
    }

    fn validate(&self, kind: VersionKind, value: &str) -> Result<(), VersionError> {
        if self.requires_numeric(kind) {
            let version = self.parse(kind, value)?;
            if version.has_increment() {
                return Err(VersionError::Format {
                    text: value.to_string(),
                });
            }
        } else if value.contains(['"', '\r', '\n']) {
            return Err(VersionError::Format {
                text: value.to_string(),
            });
        }
        Ok(())
    }
}

impl VersionFormat for AssemblyInfoFormat {
    fn name(&self) -> &'static str {
        self.dialect.name
    }

    fn slots(&self) -> &[VersionKind] {
        &SLOTS
    }

    fn extract(&self, text: &str, kind: VersionKind) -> Option<String> {
        self.locate(text, kind)
            .map(|found| found.token_text(text).to_string())
    }

    /// `"1.0"` means `1.0.0.0`, while `"1.0.*"` leaves build and revision to the compiler.
    fn parse(&self, _kind: VersionKind, token: &str) -> Result<Version, VersionError> {
        let pad = if token.ends_with('*') {
            Component::Wildcard
        } else {
            Component::Number(0)
        };
        Version::parse(token, pad)
    }

    fn requires_numeric(&self, kind: VersionKind) -> bool {
        kind != VersionKind::Informational || self.informational_must_be_numeric
    }

    fn render(&self, _kind: VersionKind, version: &Version) -> Result<String, VersionError> {
        if version.is_empty() || version.has_increment() {
            return Err(VersionError::Format {
                text: version.to_string(),
            });
        }
        Ok(version.to_string())
    }

    fn substitute(
        &self,
        text: &str,
        kind: VersionKind,
        value: &str,
    ) -> Result<String, SubstituteError> {
        self.validate(kind, value)
            .map_err(SubstituteError::Invalid)?;
        let found = self.locate(text, kind).ok_or(SubstituteError::NotFound)?;
        Ok(splice(text, found.token, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{CPP_CLI, CSHARP, FSHARP, JSHARP, VISUAL_BASIC};
    use rstest::rstest;

    const CSHARP_FILE: &str = r#"using System.Reflection;
using System.Runtime.InteropServices;

// General Information about an assembly is controlled through the following
// set of attributes.
[assembly: AssemblyTitle("Contoso.Core")]
[assembly: AssemblyCompany("Contoso")]

// [assembly: AssemblyVersion("9.9.9.9")]
[assembly: AssemblyVersion("1.0.*")]
[assembly: AssemblyFileVersion("1.0.3.4")]
[assembly: AssemblyInformationalVersion("1.0 Release Candidate")]
"#;

    fn csharp() -> AssemblyInfoFormat {
        AssemblyInfoFormat::new(CSHARP, false)
    }

    #[test]
    fn test_extract_csharp() {
        let format = csharp();
        assert_eq!(
            format.extract(CSHARP_FILE, VersionKind::Primary).as_deref(),
            Some("1.0.*")
        );
        assert_eq!(
            format.extract(CSHARP_FILE, VersionKind::File).as_deref(),
            Some("1.0.3.4")
        );
        assert_eq!(
            format
                .extract(CSHARP_FILE, VersionKind::Informational)
                .as_deref(),
            Some("1.0 Release Candidate")
        );
    }

    #[test]
    fn test_parse_padding() {
        let format = csharp();
        assert_eq!(
            format.parse(VersionKind::Primary, "1.0").unwrap(),
            Version::from_numbers(1, 0, 0, 0)
        );
        assert_eq!(
            format.parse(VersionKind::Primary, "1.0.*").unwrap().to_string(),
            "1.0.*"
        );
    }

    #[test]
    fn test_missing_slot_is_none() {
        let text = "[assembly: AssemblyTitle(\"x\")]\n";
        assert_eq!(csharp().extract(text, VersionKind::File), None);
    }

    #[test]
    fn test_long_attribute_name_fallback() {
        let text = "[assembly:AssemblyVersionAttribute(\"2.0.0.0\")];\n";
        let format = AssemblyInfoFormat::new(CPP_CLI, false);
        assert_eq!(
            format.extract(text, VersionKind::Primary).as_deref(),
            Some("2.0.0.0")
        );
        let updated = format
            .substitute(text, VersionKind::Primary, "2.1.0.0")
            .unwrap();
        assert_eq!(updated, "[assembly:AssemblyVersionAttribute(\"2.1.0.0\")];\n");
    }

    #[test]
    fn test_substitute_only_changes_version_characters() {
        let format = csharp();
        let updated = format
            .substitute(CSHARP_FILE, VersionKind::File, "1.0.4.0")
            .unwrap();
        assert_eq!(updated.len(), CSHARP_FILE.len());
        assert_eq!(
            updated,
            CSHARP_FILE.replace(
                "AssemblyFileVersion(\"1.0.3.4\")",
                "AssemblyFileVersion(\"1.0.4.0\")"
            )
        );
        assert!(updated.contains("// [assembly: AssemblyVersion(\"9.9.9.9\")]"));
    }

    #[test]
    fn test_substitute_longer_value_keeps_surroundings() {
        let text = "\u{feff}// header\r\n[assembly: AssemblyVersion(\"1.0\")]\r\n// footer";
        let updated = csharp()
            .substitute(text, VersionKind::Primary, "10.20.30.40")
            .unwrap();
        assert_eq!(
            updated,
            "\u{feff}// header\r\n[assembly: AssemblyVersion(\"10.20.30.40\")]\r\n// footer"
        );
    }

    #[test]
    fn test_substitute_free_text_informational() {
        let updated = csharp()
            .substitute(CSHARP_FILE, VersionKind::Informational, "1.1 Beta")
            .unwrap();
        assert!(updated.contains("AssemblyInformationalVersion(\"1.1 Beta\")"));
    }

    #[rstest]
    #[case(VersionKind::Primary, "1.x")]
    #[case(VersionKind::Primary, "1.+.0.0")]
    #[case(VersionKind::Informational, "say \"hi\"")]
    fn test_substitute_rejects_invalid_values(#[case] kind: VersionKind, #[case] value: &str) {
        assert!(matches!(
            csharp().substitute(CSHARP_FILE, kind, value),
            Err(SubstituteError::Invalid(VersionError::Format { .. }))
        ));
    }

    #[test]
    fn test_strict_informational() {
        let format = AssemblyInfoFormat::new(CSHARP, true);
        assert!(format.requires_numeric(VersionKind::Informational));
        assert!(matches!(
            format.substitute(CSHARP_FILE, VersionKind::Informational, "1.1 Beta"),
            Err(SubstituteError::Invalid(_))
        ));
        assert!(
            format
                .substitute(CSHARP_FILE, VersionKind::Informational, "1.1.0.0")
                .is_ok()
        );
    }

    #[test]
    fn test_substitute_missing_slot() {
        let text = "[assembly: AssemblyTitle(\"x\")]\n";
        assert_eq!(
            csharp().substitute(text, VersionKind::Primary, "1.0.0.0"),
            Err(SubstituteError::NotFound)
        );
    }

    #[rstest]
    #[case(VISUAL_BASIC, "Imports System.Reflection\r\n<Assembly: AssemblyVersion(\"1.0.0.0\")> \r\n", "<Assembly: AssemblyVersion(\"1.2.0.0\")> ")]
    #[case(JSHARP, "/** @assembly AssemblyVersion(\"1.0.0.0\") */\n", "/** @assembly AssemblyVersion(\"1.2.0.0\") */")]
    #[case(FSHARP, "module AssemblyInfo\n[<assembly: AssemblyVersion(\"1.0.0.0\")>]\ndo ()\n", "[<assembly: AssemblyVersion(\"1.2.0.0\")>]")]
    fn test_dialects_round_trip(
        #[case] dialect: AttributeDialect,
        #[case] text: &str,
        #[case] expected_line: &str,
    ) {
        let format = AssemblyInfoFormat::new(dialect, false);
        assert_eq!(
            format.extract(text, VersionKind::Primary).as_deref(),
            Some("1.0.0.0")
        );
        let updated = format
            .substitute(text, VersionKind::Primary, "1.2.0.0")
            .unwrap();
        assert!(updated.contains(expected_line));
        assert_eq!(updated.len(), text.len());
    }

    #[test]
    fn test_render() {
        let format = csharp();
        let version: Version = "2.0.*".parse().unwrap();
        assert_eq!(format.render(VersionKind::Primary, &version).unwrap(), "2.0.*");
        assert!(format.render(VersionKind::Primary, &Version::EMPTY).is_err());
        let pattern: Version = "2.+.0.0".parse().unwrap();
        assert!(format.render(VersionKind::Primary, &pattern).is_err());
    }
}
