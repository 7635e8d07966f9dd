use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;

use super::errors::ConfigError;
use super::keys;
use super::logging::{LogFormat, LoggingConfig};
use super::server::ServerConfig;
use super::upstream::{UpstreamConfig, UpstreamTarget, DEFAULT_UPSTREAM_TIMEOUT_SECS};

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Main configuration structure for the proxy
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Listener configuration (bind address, UDP switch, TCP idle timeout)
    pub server: ServerConfig,

    /// DNS-over-TLS upstream
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an env file and the process environment
    ///
    /// Values already present in the process environment win over the file.
    /// An explicitly given file must exist; a missing default `.env` is
    /// tolerated so the proxy can be configured from the environment alone.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file_values = match path {
            Some(path) => Self::read_env_file(path)?,
            None if Path::new(DEFAULT_ENV_FILE).exists() => {
                Self::read_env_file(DEFAULT_ENV_FILE)?
            }
            None => HashMap::new(),
        };

        let config = Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })?;
        config.validate()?;
        Ok(config)
    }

    fn read_env_file(path: &str) -> Result<HashMap<String, String>, ConfigError> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        iter.map(|item| item.map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string())))
            .collect()
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let host_value = required(keys::HOST)?;
        let host: IpAddr = host_value
            .parse()
            .map_err(|e| ConfigError::invalid(keys::HOST, &host_value, e))?;

        let port_value = required(keys::PORT)?;
        let port: u16 = port_value
            .parse()
            .map_err(|e| ConfigError::invalid(keys::PORT, &port_value, e))?;

        let target_value = required(keys::TARGET_SERVER_ADDRESS)?;
        let target: UpstreamTarget = target_value
            .parse()
            .map_err(|e: String| ConfigError::invalid(keys::TARGET_SERVER_ADDRESS, &target_value, e))?;

        let udp_value = required(keys::UDP_SERVER_ENABLED)?;
        let udp_enabled = parse_bool(&udp_value).ok_or_else(|| {
            ConfigError::invalid(keys::UDP_SERVER_ENABLED, &udp_value, "expected a boolean")
        })?;

        let timeout_value = required(keys::TCP_SERVER_TIMEOUT)?;
        let tcp_timeout_secs: u64 = timeout_value
            .parse()
            .map_err(|e| ConfigError::invalid(keys::TCP_SERVER_TIMEOUT, &timeout_value, e))?;

        let upstream_timeout_secs = match lookup(keys::UPSTREAM_TIMEOUT) {
            Some(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(keys::UPSTREAM_TIMEOUT, &value, e))?,
            _ => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let mut logging = LoggingConfig::default();
        if let Some(level) = lookup(keys::LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            logging.level = level.trim().to_string();
        }
        if let Some(format) = lookup(keys::LOG_FORMAT).filter(|v| !v.trim().is_empty()) {
            logging.format = format
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(keys::LOG_FORMAT, &format, e))?;
        }

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                udp_enabled,
                tcp_timeout_secs,
            },
            upstream: UpstreamConfig {
                target,
                timeout_secs: upstream_timeout_secs,
            },
            logging,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("PORT cannot be 0".to_string()));
        }

        if self.server.tcp_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "TCP_SERVER_TIMEOUT must be at least 1 second".to_string(),
            ));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "UPSTREAM_TIMEOUT must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

/// Accepts `1/0`, `t/f` and the three common casings of `true/false`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
