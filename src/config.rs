//! Configuration management for servo-panel
//!
//! Handles loading and validating the YAML configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub serial: SerialConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Serial link configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerialConfig {
    /// Port name, e.g. "/dev/ttyUSB0" or "COM3"
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Status polling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl AppConfig {
    /// Load and validate a configuration file
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            anyhow::bail!("serial.port cannot be empty");
        }
        if self.serial.baud_rate == 0 {
            anyhow::bail!("serial.baud_rate must be non-zero");
        }
        if self.sync.poll_interval_ms == 0 {
            anyhow::bail!("sync.poll_interval_ms must be non-zero");
        }
        Ok(())
    }

    pub fn serial_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.sync.poll_interval_ms)
    }
}

// Default value functions
fn default_baud_rate() -> u32 { 9600 }
fn default_timeout() -> u64 { 1000 }
fn default_poll_interval() -> u64 { 500 }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_with_defaults() {
        let config: AppConfig = serde_yaml::from_str("serial:\n  port: /dev/ttyUSB0\n").unwrap();
        assert_eq!(config.serial.port, "/dev/ttyUSB0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.timeout_ms, 1000);
        assert_eq!(config.sync.poll_interval_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full() {
        let yaml = "serial:\n  port: COM3\n  baud_rate: 115200\n  timeout_ms: 250\nsync:\n  poll_interval_ms: 100\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.serial_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_rejects_empty_port() {
        let config: AppConfig = serde_yaml::from_str("serial:\n  port: \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let yaml = "serial:\n  port: COM3\nsync:\n  poll_interval_ms: 0\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "serial:\n  port: /dev/ttyACM0").unwrap();

        let config = AppConfig::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM0");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        assert!(AppConfig::load("/nonexistent/config.yaml").await.is_err());
    }
}
