//! # Config Errors

use nexus_core::CoreError;
use thiserror::Error;

/// Errors from loading, validating or saving the pricing config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Config file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has wrong field types.
    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value parsed but is outside what the engine accepts.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// No explicit path was given and the platform has no config dir.
    #[error("No config path available")]
    NoConfigPath,

    /// The resulting policy or catalog was rejected by the core.
    #[error("Invalid pricing policy: {0}")]
    Policy(#[from] CoreError),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
