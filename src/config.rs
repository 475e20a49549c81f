use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::report::View;
use crate::system::sampler::SamplerOptions;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Sampling period.
    pub refresh_rate_ms: u64,
    /// Period of the report printed by the CLI.
    pub report_interval_ms: u64,
    pub view: View,
    pub top_processes: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 1000,
            report_interval_ms: 1000,
            view: View::Summary,
            top_processes: 8,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub interface: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Config {
    pub fn sampler_options(&self) -> SamplerOptions {
        SamplerOptions {
            preferred_interface: self.network.interface.clone(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostpulse").join("config.toml"))
}

/// Config file that exists but could not be used. Loading falls back to
/// defaults; the caller decides how to report it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Ok(Config::default()),
    }
}

/// A missing file yields defaults. Anything else that goes wrong is an error.
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Falls back to defaults, keeping the error so it can be logged once the
/// subscriber is installed.
pub fn or_default(loaded: Result<Config, ConfigError>) -> (Config, Option<ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(error) => (Config::default(), Some(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.report_interval_ms, 1000);
        assert_eq!(config.general.view, View::Summary);
        assert_eq!(config.general.top_processes, 8);
        assert_eq!(config.network.interface, None);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.top_processes, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 2000
report_interval_ms = 5000
view = "top"
top_processes = 12

[network]
interface = "enp3s0"

[logging]
level = "hostpulse=debug"
json = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.report_interval_ms, 5000);
        assert_eq!(config.general.view, View::Top);
        assert_eq!(config.general.top_processes, 12);
        assert_eq!(config.network.interface.as_deref(), Some("enp3s0"));
        assert_eq!(config.logging.level, "hostpulse=debug");
        assert!(config.logging.json);
        assert_eq!(
            config.sampler_options().preferred_interface.as_deref(),
            Some("enp3s0")
        );
    }

    #[test]
    fn missing_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_from_path(path).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 1000);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let temp = std::env::temp_dir().join("hostpulse_test_invalid.toml");
        std::fs::write(&temp, "general = [not valid").unwrap();
        let err = load_config_from_path(&temp).unwrap_err();
        let _ = std::fs::remove_file(&temp);

        assert!(matches!(err, ConfigError::Parse { ref path, .. } if *path == temp));
        assert!(err.to_string().contains("hostpulse_test_invalid.toml"));
    }

    #[test]
    fn invalid_file_falls_back_with_error() {
        let temp = std::env::temp_dir().join("hostpulse_test_fallback.toml");
        std::fs::write(&temp, "[general]\nview = 5\n").unwrap();
        let (config, error) = or_default(load_config_from_path(&temp));
        let _ = std::fs::remove_file(&temp);

        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert!(matches!(error, Some(ConfigError::Parse { .. })));

        let (_, error) = or_default(Ok(Config::default()));
        assert!(error.is_none());
    }

    #[test]
    fn unknown_view_is_a_parse_error() {
        let temp = std::env::temp_dir().join("hostpulse_test_bad_view.toml");
        std::fs::write(&temp, "[general]\nview = \"treemap\"\n").unwrap();
        let result = load_config_from_path(&temp);
        let _ = std::fs::remove_file(&temp);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
