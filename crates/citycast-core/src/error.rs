//! Top-level error types for the Citycast process.
//!
//! Component crates carry their own error enums; this module holds the
//! errors that surface while starting the service, plus a user-facing
//! message for each.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a short, operator-facing message.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Database(_) => "The city cache database could not be opened.",
            AppError::Server(_) => "The HTTP server could not be started.",
            AppError::Io(_) => "A file or socket operation failed.",
            AppError::Other(_) => "An unexpected error occurred.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No configuration directory available")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "Configuration file could not be read.",
            ConfigError::Write { .. } => "Default configuration could not be written.",
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Serialize(_) => "Configuration could not be serialized.",
            ConfigError::NoConfigDir => "Set CITYCAST_CONFIG to a configuration file path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
