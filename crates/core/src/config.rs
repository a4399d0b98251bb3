use serde::{Deserialize, Serialize};

use crate::NumberingOptions;

/// Loaded from `.verstamp/config.json`, controls which files are skipped and how new
/// versions are computed and written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns for files to ignore (e.g., "tests/**")
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Increment step and reset rules
    #[serde(default)]
    pub numbering: NumberingOptions,

    /// Replace installer product codes whenever their version changes (default: true)
    #[serde(default = "default_regenerate_product_code")]
    pub regenerate_product_code: bool,

    /// Reject informational versions that are not dotted numbers (default: false)
    #[serde(default)]
    pub informational_must_be_numeric: bool,
}

fn default_regenerate_product_code() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            numbering: NumberingOptions::default(),
            regenerate_product_code: default_regenerate_product_code(),
            informational_must_be_numeric: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResetTarget;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignore.is_empty());
        assert!(config.regenerate_product_code);
        assert!(!config.informational_must_be_numeric);
        assert_eq!(config.numbering, NumberingOptions::default());
    }

    #[test]
    fn test_deserialize_empty_object() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: Config = serde_json::from_str(
            r#"{
                "ignore": ["legacy/**"],
                "numbering": {"incrementStep": 2, "resetTo": "one"},
                "regenerateProductCode": false,
                "informationalMustBeNumeric": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.ignore, vec!["legacy/**".to_string()]);
        assert_eq!(config.numbering.increment_step, 2);
        assert_eq!(config.numbering.reset_to, ResetTarget::One);
        assert!(!config.regenerate_product_code);
        assert!(config.informational_must_be_numeric);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("regenerateProductCode"));
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
