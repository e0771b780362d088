//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default export format when neither CLI nor config file names one
pub const DEFAULT_FORMAT: &str = "wav";

/// Configuration loaded from file and merged with CLI arguments.
/// All fields optional; `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input device id; `None` selects the system default device
    pub device: Option<String>,
    /// Advisory capture sample rate in Hz (the device's rate wins)
    pub sample_rate: Option<u32>,
    /// Export format: "wav" or "flac"
    pub format: Option<String>,
    /// Directory artifacts are written into
    pub output_dir: Option<String>,
}

impl AppConfig {
    /// Empty config (nothing set)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge another config underneath this one: fields already set here
    /// win, unset fields are filled from `other`.
    pub fn merged_over(self, other: AppConfig) -> Self {
        Self {
            device: self.device.or(other.device),
            sample_rate: self.sample_rate.or(other.sample_rate),
            format: self.format.or(other.format),
            output_dir: self.output_dir.or(other.output_dir),
        }
    }

    /// Export format with default applied
    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_nothing_set() {
        let config = AppConfig::empty();
        assert_eq!(config.device, None);
        assert_eq!(config.sample_rate, None);
        assert_eq!(config.format_or_default(), "wav");
    }

    #[test]
    fn merge_prefers_upper_layer() {
        let cli = AppConfig {
            device: Some("hw:1".to_string()),
            sample_rate: None,
            format: None,
            output_dir: None,
        };
        let file = AppConfig {
            device: Some("hw:0".to_string()),
            sample_rate: Some(48000),
            format: Some("flac".to_string()),
            output_dir: None,
        };

        let merged = cli.merged_over(file);
        assert_eq!(merged.device.as_deref(), Some("hw:1"));
        assert_eq!(merged.sample_rate, Some(48000));
        assert_eq!(merged.format_or_default(), "flac");
    }
}
