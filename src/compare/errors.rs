/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for structure comparison

use crate::io::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a comparison from running
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("bin size must be a positive finite number, got {0}")]
    InvalidBinSize(f64),

    #[error("coordinate {value} cannot be binned with bin size {bin_size}")]
    BinOverflow { value: f64, bin_size: f64 },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
