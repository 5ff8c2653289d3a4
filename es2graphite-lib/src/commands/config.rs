use crate::Result;
use crate::sink::Protocol;
use crate::source::{HealthLevel, StatsLevel};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the working directory when no configuration path is given
pub const DEFAULT_CONFIG_FILE: &str = "es2graphite.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Cluster hosts, polled round-robin
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    /// Prefix prepended to every metric path
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_graphite_host")]
    pub graphite_host: String,

    #[serde(default = "default_graphite_port")]
    pub graphite_port: u16,

    #[serde(default = "default_protocol")]
    pub protocol: Protocol,

    /// Seconds between cycle starts
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    #[serde(default = "default_health_level")]
    pub health_level: HealthLevel,

    /// Index statistics level; follows `health_level` when unset
    #[serde(default)]
    pub stats_level: Option<StatsLevel>,

    /// Collect segment metrics
    #[serde(default)]
    pub segments: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_hosts() -> Vec<String> {
    vec!["localhost:9200".to_string()]
}

fn default_prefix() -> String {
    "es".to_string()
}

fn default_graphite_host() -> String {
    "localhost".to_string()
}

const fn default_graphite_port() -> u16 {
    2004
}

const fn default_protocol() -> Protocol {
    Protocol::Pickle
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_health_level() -> HealthLevel {
    HealthLevel::Indices
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `es2graphite.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading es2graphite configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading es2graphite configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if self.hosts.iter().all(|h| h.trim().is_empty()) {
            return Err(app_err!("at least one cluster host must be configured"));
        }

        if self.prefix.trim().is_empty() {
            return Err(app_err!("prefix must not be empty"));
        }

        if self.graphite_port == 0 {
            return Err(app_err!("graphite_port must be between 1 and 65535"));
        }

        if self.interval_secs == 0 {
            return Err(app_err!("interval_secs must be at least 1"));
        }

        if self.request_timeout_secs == 0 {
            return Err(app_err!("request_timeout_secs must be at least 1"));
        }

        Ok(())
    }

    /// The index statistics level in effect
    #[must_use]
    pub fn effective_stats_level(&self) -> StatsLevel {
        self.stats_level.unwrap_or_else(|| self.health_level.into())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
