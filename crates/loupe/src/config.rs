//! Controller configuration
//!
//! Options arrive from the page as a plain object. Every field is optional;
//! missing fields take the defaults below and unknown fields are ignored, so
//! the same object can also carry the `onShow` / `onHide` callbacks.

use serde::{Deserialize, Serialize};

use crate::error::{ZoomError, ZoomResult};

/// Text shown while the zoom image loads
pub const DEFAULT_LOADING_NOTICE: &str = "Loading image";

/// Text shown when the zoom image fails to load
pub const DEFAULT_ERROR_NOTICE: &str = "The image could not be loaded";

/// Milliseconds the error notice stays visible
pub const DEFAULT_ERROR_DURATION_MS: u32 = 2500;

/// Zoom controller options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    /// Notice text while the zoom image loads
    pub loading_notice: String,
    /// Notice text if the zoom image fails to load
    pub error_notice: String,
    /// Milliseconds before the error notice hides itself
    pub error_duration: u32,
    /// Suppress navigation when the zoom link is clicked
    pub prevent_clicks: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            loading_notice: DEFAULT_LOADING_NOTICE.to_string(),
            error_notice: DEFAULT_ERROR_NOTICE.to_string(),
            error_duration: DEFAULT_ERROR_DURATION_MS,
            prevent_clicks: true,
        }
    }
}

impl ZoomConfig {
    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> ZoomResult<Self> {
        serde_json::from_str(json).map_err(|e| ZoomError::InvalidConfig(e.to_string()))
    }

    /// Serialize to a JSON object
    pub fn to_json(&self) -> ZoomResult<String> {
        serde_json::to_string(self).map_err(|e| ZoomError::InvalidConfig(e.to_string()))
    }

    /// Builder-style loading text
    pub fn with_loading_notice(mut self, text: impl Into<String>) -> Self {
        self.loading_notice = text.into();
        self
    }

    /// Builder-style error text
    pub fn with_error_notice(mut self, text: impl Into<String>) -> Self {
        self.error_notice = text.into();
        self
    }

    /// Builder-style error duration
    pub fn with_error_duration(mut self, ms: u32) -> Self {
        self.error_duration = ms;
        self
    }

    /// Builder-style click suppression
    pub fn with_prevent_clicks(mut self, prevent: bool) -> Self {
        self.prevent_clicks = prevent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZoomConfig::default();
        assert_eq!(config.loading_notice, "Loading image");
        assert_eq!(config.error_notice, "The image could not be loaded");
        assert_eq!(config.error_duration, 2500);
        assert!(config.prevent_clicks);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ZoomConfig::from_json(r#"{"errorDuration": 500, "preventClicks": false}"#)
            .unwrap();
        assert_eq!(config.error_duration, 500);
        assert!(!config.prevent_clicks);
        assert_eq!(config.loading_notice, DEFAULT_LOADING_NOTICE);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = ZoomConfig::from_json(r#"{"loadingNotice": "Wait", "onShow": null}"#).unwrap();
        assert_eq!(config.loading_notice, "Wait");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ZoomConfig::from_json(r#"{"errorDuration": "soon"}"#).unwrap_err();
        assert!(matches!(err, ZoomError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let json = ZoomConfig::default().with_error_duration(10).to_json().unwrap();
        assert!(json.contains("\"errorDuration\":10"));
        assert!(json.contains("\"preventClicks\":true"));
    }
}
