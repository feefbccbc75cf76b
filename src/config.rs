// Summary model configuration
// Defaults, display formats and AI response limits, optionally loaded from JSON

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable the sidecar reads the config file path from
pub const CONFIG_ENV_VAR: &str = "NOTEBUDDY_CONFIG";

/// Tunables for normalization and derived views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Characters kept by the preview before the ellipsis is appended
    pub preview_max_len: usize,
    pub preview_placeholder: String,
    pub default_title: String,
    /// Prefix of the generated title for legacy records without one
    pub legacy_title_prefix: String,
    pub default_duration: String,
    pub default_meeting_type: String,
    pub default_assignee: String,
    /// chrono format string for display dates
    pub display_date_format: String,
    /// chrono format string for display times
    pub display_time_format: String,
    pub max_action_items: usize,
    pub max_key_points: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            preview_max_len: 150,
            preview_placeholder: "No content available".to_string(),
            default_title: "Untitled Meeting".to_string(),
            legacy_title_prefix: "Meeting Summary - ".to_string(),
            default_duration: "00:00".to_string(),
            default_meeting_type: "General".to_string(),
            default_assignee: "TBD".to_string(),
            display_date_format: "%m/%d/%Y".to_string(),
            display_time_format: "%I:%M %p".to_string(),
            max_action_items: 3,
            max_key_points: 4,
        }
    }
}

impl SummaryConfig {
    /// Parse a config from JSON; missing keys keep their defaults
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse summary config")
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No summary config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary config {:?}", path))?;
        let config = Self::from_json_str(&content)?;
        log::info!("Loaded summary config from {:?}", path);
        Ok(config)
    }

    /// Load from the path in `NOTEBUDDY_CONFIG`, or defaults if unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SummaryConfig::from_json_str(r#"{"preview_max_len": 80}"#).unwrap();
        assert_eq!(config.preview_max_len, 80);
        assert_eq!(config.default_title, "Untitled Meeting");
        assert_eq!(config.max_action_items, 3);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = SummaryConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SummaryConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let contents = r#"{"default_meeting_type": "Standup", "max_key_points": 2}"#;
        std::fs::write(&path, contents).unwrap();

        let config = SummaryConfig::load(&path).unwrap();
        assert_eq!(config.default_meeting_type, "Standup");
        assert_eq!(config.max_key_points, 2);
        assert_eq!(config.preview_placeholder, "No content available");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SummaryConfig::from_json_str("{not json").is_err());
    }
}
