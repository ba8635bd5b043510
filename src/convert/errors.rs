/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for structure conversion

use crate::cell::LatticeError;
use crate::io::IoError;
use thiserror::Error;

/// Errors that abort the conversion of one structure
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    InvalidLattice(#[from] LatticeError),

    #[error("cannot read structure: {0}")]
    Read(#[from] IoError),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
