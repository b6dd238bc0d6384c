//! Domain error types

use thiserror::Error;

/// Error when a recording file name is not a bare name inside the recordings directory
#[derive(Debug, Clone, Error)]
#[error("Invalid recording file name: \"{input}\". Expected a bare file name such as 1700000000000.flac")]
pub struct InvalidFileNameError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
