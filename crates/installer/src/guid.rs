use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

/// A braced GUID as installers write it: `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
pub const GUID: &str =
    r"\{[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}\}";

static GUID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{GUID}$")).expect("hardcoded regex must compile"));

#[must_use]
pub fn is_guid(token: &str) -> bool {
    GUID_PATTERN.is_match(token)
}

/// Fresh random GUID in the braced form of `existing`. Lower-case hex is kept when
/// `existing` uses it; everything else is written upper-case.
#[must_use]
pub fn regenerate_guid(existing: &str) -> String {
    let fresh = Uuid::new_v4().hyphenated().to_string();
    let lower = existing.chars().any(|c| c.is_ascii_lowercase())
        && !existing.chars().any(|c| c.is_ascii_uppercase());
    if lower {
        format!("{{{fresh}}}")
    } else {
        format!("{{{}}}", fresh.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("{5B7E2A5F-0C1D-4E2F-9A3B-1C2D3E4F5A6B}", true)]
    #[case("{5b7e2a5f-0c1d-4e2f-9a3b-1c2d3e4f5a6b}", true)]
    #[case("5B7E2A5F-0C1D-4E2F-9A3B-1C2D3E4F5A6B", false)]
    #[case("{5B7E2A5F-0C1D-4E2F-9A3B}", false)]
    #[case("*", false)]
    fn test_is_guid(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_guid(token), expected);
    }

    #[test]
    fn test_regenerate_keeps_upper_case() {
        let existing = "{5B7E2A5F-0C1D-4E2F-9A3B-1C2D3E4F5A6B}";
        let fresh = regenerate_guid(existing);
        assert!(is_guid(&fresh));
        assert_ne!(fresh, existing);
        assert!(!fresh.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_regenerate_keeps_lower_case() {
        let fresh = regenerate_guid("{5b7e2a5f-0c1d-4e2f-9a3b-1c2d3e4f5a6b}");
        assert!(is_guid(&fresh));
        assert!(!fresh.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_regenerate_is_random() {
        let existing = "{00000000-0000-0000-0000-000000000000}";
        assert_ne!(regenerate_guid(existing), regenerate_guid(existing));
    }
}
