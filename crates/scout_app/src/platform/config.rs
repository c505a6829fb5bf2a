use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use scout_engine::{ApiSettings, PollSettings, HISTORY_FILENAME};
use scout_logging::scout_info;
use serde::{Deserialize, Serialize};

use super::cli::Args;
use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "recipe_scout.ron";

/// Settings read from `recipe_scout.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub history_path: PathBuf,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            api_prefix: api.api_prefix,
            poll_interval_ms: PollSettings::default().interval.as_millis() as u64,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            history_path: PathBuf::from(HISTORY_FILENAME),
            log: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file yields defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {:?}", path));
            }
        };
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        scout_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads the file named by `--config`, or the default file if present,
    /// then applies command-line overrides.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path, true)?,
            None => Self::load(Path::new(CONFIG_FILENAME), false)?,
        };
        config.apply_overrides(args);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(history) = &args.history {
            self.history_path = history.clone();
        }
        if let Some(log) = args.log {
            self.log = log;
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            api_prefix: self.api_prefix.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// A zero interval would spin; it is clamped to one millisecond.
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_match_engine_settings() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.poll_interval_ms, 3000);
        assert_eq!(config.poll_settings().interval, Duration::from_secs(3));
        assert_eq!(config.history_path, PathBuf::from("recipe_history.json"));
        assert_eq!(config.log, LogDestination::File);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(base_url: "https://recipes.example.com", poll_interval_ms: 500, log: both)"#,
        )
        .unwrap();

        let config = AppConfig::load(&path, true).unwrap();
        assert_eq!(config.base_url, "https://recipes.example.com");
        assert_eq!(config.poll_settings().interval, Duration::from_millis(500));
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn missing_file_is_only_an_error_when_required() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.ron");
        assert_eq!(AppConfig::load(&path, false).unwrap(), AppConfig::default());
        assert!(AppConfig::load(&path, true).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(base_url: ").unwrap();
        assert!(AppConfig::load(&path, false).is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let args = Args::try_parse_from([
            "recipe_scout",
            "--base-url",
            "http://127.0.0.1:8000",
            "--log",
            "off",
        ])
        .unwrap();
        let mut config = AppConfig {
            base_url: "https://recipes.example.com".to_string(),
            ..AppConfig::default()
        };
        config.apply_overrides(&args);

        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.log, LogDestination::Off);
        assert_eq!(config.api_settings().base_url, "http://127.0.0.1:8000");
    }
}
