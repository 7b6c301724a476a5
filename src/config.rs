//! Configuration management for the fraud scoring service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub scaler: ScalerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote model server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Scoring endpoint URL (overridable via FRAUD_MODEL_URL)
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// Timeout for the outbound scoring call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fraud decision configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Probability cutoff above which a transaction is flagged
    /// (overridable via FRAUD_THRESHOLD)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Normalization parameters artifact location
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerConfig {
    /// Path of the JSON artifact holding per-feature mean/scale values
    #[serde(default = "default_params_path")]
    pub params_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_endpoint_url() -> String {
    "https://fraud-predictor-bionda.apps.okd-01.ocp.pillon.org/v2/models/fraud/infer".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_threshold() -> f64 {
    0.95
}

fn default_params_path() -> String {
    "config/scaler.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            params_path: default_params_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific file.
    ///
    /// FRAUD_MODEL_URL and FRAUD_THRESHOLD override the file values
    /// when set in the environment.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let endpoint_override = env::var("FRAUD_MODEL_URL").ok();
        let threshold_override = env::var("FRAUD_THRESHOLD")
            .ok()
            .map(|raw| {
                raw.parse::<f64>()
                    .with_context(|| format!("FRAUD_THRESHOLD is not a number: {}", raw))
            })
            .transpose()?;

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .set_override_option("inference.endpoint_url", endpoint_override)?
            .set_override_option("detection.threshold", threshold_override)?
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.detection.threshold, 0.95);
        assert_eq!(config.inference.timeout_secs, 10);
        assert_eq!(config.scaler.params_path, "config/scaler.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_shipped_config() {
        let config = AppConfig::load_from_path("config/config.toml").unwrap();
        assert_eq!(config.detection.threshold, 0.95);
        assert!(config.inference.endpoint_url.ends_with("/infer"));
        assert_eq!(config.inference.timeout_secs, 10);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AppConfig::load_from_path("config/does_not_exist.toml").is_err());
    }
}
