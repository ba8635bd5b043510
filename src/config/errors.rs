/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for conversion config loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a conversion config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config has neither a 'unit_cell' nor a 'charges' section")]
    MissingSections,
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
