//! Optional TOML configuration for the dashboard.
//!
//! Everything has a built-in default; a config file overrides the
//! defaults and CLI flags override the file. Settings come from the file
//! alone - no environment lookup.
//!
//! ```toml
//! [api]
//! base_url = "https://api.thingspeak.com"
//! channel = 2725512
//!
//! [poll]
//! refresh_secs = 10
//! ```

use std::path::Path;

use anyhow::Result;
use config::{Config, File};
use serde::Deserialize;

use crate::source::DEFAULT_BASE_URL;

/// Default channel id (the water-quality demo channel).
pub const DEFAULT_CHANNEL: u64 = 2725512;

/// Default live-view polling period, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 10;

/// Top-level settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

/// Feed API endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_channel")]
    pub channel: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            channel: default_channel(),
        }
    }
}

/// Live polling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_channel() -> u64 {
    DEFAULT_CHANNEL
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

/// Load settings from an optional TOML file.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let settings = Config::builder().add_source(File::from(path)).build()?;
    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.channel, DEFAULT_CHANNEL);
        assert_eq!(settings.poll.refresh_secs, DEFAULT_REFRESH_SECS);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[api]\nbase_url = \"http://localhost:8000\"\nchannel = 42\n\n[poll]\nrefresh_secs = 5\n"
        )
        .unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.channel, 42);
        assert_eq!(settings.poll.refresh_secs, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[api]\nchannel = 42\n").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.channel, 42);
        assert_eq!(settings.poll.refresh_secs, DEFAULT_REFRESH_SECS);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_settings(Some(Path::new("/nonexistent/aquawatch.toml"))).is_err());
    }
}
