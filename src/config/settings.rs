//! Runtime settings resolved from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

const CONFIG_DIR_VAR: &str = "REFUND_ENGINE_CONFIG_DIR";
const BIND_ADDR_VAR: &str = "REFUND_ENGINE_BIND_ADDR";
const LOG_FORMAT_VAR: &str = "REFUND_ENGINE_LOG_FORMAT";

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human-readable output.
    Compact,
    /// One JSON object per line.
    Json,
}

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory containing `policies/`.
    pub config_dir: PathBuf,
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = lookup(CONFIG_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());

        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| EngineError::ConfigParseError {
                path: BIND_ADDR_VAR.to_string(),
                message: format!("'{}': {}", bind_raw, e),
            })?;

        let log_format = match lookup(LOG_FORMAT_VAR)
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(EngineError::ConfigParseError {
                    path: LOG_FORMAT_VAR.to_string(),
                    message: format!("must be 'compact' or 'json' (got '{}')", other),
                });
            }
        };

        Ok(Self {
            config_dir: PathBuf::from(config_dir),
            bind_addr,
            log_format,
        })
    }
}
