//! Start-up configuration read from the environment.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tictactoe_core::BoardSize;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TICTACTOE_SIZE must be one of 2-10, got {0:?}")]
    InvalidSize(String),

    #[error("TICTACTOE_OUTPUT must be \"text\" or \"json\", got {0:?}")]
    InvalidOutput(String),
}

/// How replies are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable board and status text
    #[default]
    Text,
    /// One JSON reply per line; input lines are JSON commands
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            _ => Err(ConfigError::InvalidOutput(s.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Text => write!(f, "text"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Board size to start on; `None` opens size selection
    pub initial_size: Option<BoardSize>,
    pub output: OutputMode,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Config {
    /// Read `TICTACTOE_SIZE`, `TICTACTOE_OUTPUT` and `RUST_LOG`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let initial_size = lookup("TICTACTOE_SIZE")
            .map(|value| {
                value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(|size| BoardSize::new(size).ok())
                    .ok_or(ConfigError::InvalidSize(value))
            })
            .transpose()?;

        let output = lookup("TICTACTOE_OUTPUT")
            .map(|value| value.parse::<OutputMode>())
            .transpose()?
            .unwrap_or_default();

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Self {
            initial_size,
            output,
            log_filter,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_size: None,
            output: OutputMode::Text,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}
