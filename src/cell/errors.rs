/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the cell module

use thiserror::Error;

/// Errors raised while validating unit-cell parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("Invalid cell parameters: a={a}, b={b}, c={c}. All dimensions must be positive.")]
    NonPositiveLength { a: f64, b: f64, c: f64 },
}

/// Result type for cell operations
pub type Result<T> = std::result::Result<T, LatticeError>;
