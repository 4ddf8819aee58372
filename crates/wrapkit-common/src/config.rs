//! ---
//! wk_section: "01-shared-primitives"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Shared primitives and utilities for the wrapper crates."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

/// Primary configuration object for hosts embedding the wrapper crates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WrapkitConfig {
    /// Logging sink settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Worker pool sizing.
    #[serde(default)]
    pub pool: PoolConfig,
}

/// Metadata describing where a [`WrapkitConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedWrapkitConfig {
    /// The parsed configuration.
    pub config: WrapkitConfig,
    /// Path the configuration was read from, or `<defaults>`.
    pub source: PathBuf,
}

impl WrapkitConfig {
    /// Environment variable overriding the configuration file path.
    pub const ENV_CONFIG_PATH: &str = "WRAPKIT_CONFIG";

    /// Load configuration from disk, respecting the `WRAPKIT_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedWrapkitConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            let path = PathBuf::from(env_path);
            let config = Self::read_file(&path)?;
            return Ok(LoadedWrapkitConfig {
                config,
                source: path,
            });
        }
        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::read_file(path)?;
                return Ok(LoadedWrapkitConfig {
                    config,
                    source: path.to_path_buf(),
                });
            }
        }
        debug!("no configuration file found; using built-in defaults");
        Ok(LoadedWrapkitConfig {
            config: Self::default(),
            source: PathBuf::from("<defaults>"),
        })
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        content.parse()
    }

    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.pool.worker_threads == Some(0) {
            return Err(anyhow!("pool.worker_threads must be at least 1 when set"));
        }
        Ok(())
    }
}

impl std::str::FromStr for WrapkitConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: WrapkitConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Logging sink configuration consumed by [`crate::logging::init_tracing`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory receiving the rolling log files.
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    /// Stdout log format.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Log file name prefix; `None` uses the service name.
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

/// Sizing for the default worker pool.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of worker threads; `None` lets the pool pick its own default.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: WrapkitConfig = "".parse().unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("target/logs"));
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert!(config.pool.worker_threads.is_none());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: WrapkitConfig = r#"
            [logging]
            directory = "/tmp/wrapkit"
            format = "pretty"
            file_prefix = "svc"

            [pool]
            worker_threads = 4
        "#
        .parse()
        .unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/tmp/wrapkit"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.file_prefix.as_deref(), Some("svc"));
        assert_eq!(config.pool.worker_threads, Some(4));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = "[pool]\nworker_threads = 0"
            .parse::<WrapkitConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("worker_threads"));
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let loaded = WrapkitConfig::load_with_source(&["does/not/exist.toml"]).unwrap();
        assert_eq!(loaded.source, PathBuf::from("<defaults>"));
    }
}
