//! Rendering options.

use msgstyle_core::StylingError;
use serde::{Deserialize, Serialize};

/// Options controlling a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Whether styling directives are interpreted at all.
    /// When disabled the body is only escaped.
    #[serde(alias = "enableStyling")]
    pub enable_styling: bool,
    /// Whether the assembled markup goes through the allow-list sanitizer.
    pub sanitize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_styling: true,
            sanitize: true,
        }
    }
}

impl Options {
    /// Parses options from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, StylingError> {
        serde_json::from_str(json).map_err(|e| StylingError::invalid_config(e.to_string()))
    }

    /// Options with styling turned off.
    pub fn plain() -> Self {
        Self {
            enable_styling: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let options = Options::default();
        assert!(options.enable_styling);
        assert!(options.sanitize);
    }

    #[test]
    fn parses_camel_case_aliases() {
        let options = Options::from_json(r#"{"enableStyling": false}"#).unwrap();
        assert_eq!(options, Options::plain());
    }

    #[test]
    fn missing_fields_use_defaults() {
        assert_eq!(Options::from_json("{}").unwrap(), Options::default());
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = Options::from_json("{\"sanitize\": 3}").unwrap_err();
        assert!(matches!(err, StylingError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("Invalid styling options"));
    }
}
