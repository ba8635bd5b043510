/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for structure and canonical-file I/O

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing structure files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse {format} data at line {line}: {details}")]
    Parse {
        format: &'static str,
        line: usize,
        details: String,
    },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl IoError {
    pub fn parse(format: &'static str, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}

/// Result type for I/O operations
pub type Result<T> = std::result::Result<T, IoError>;
