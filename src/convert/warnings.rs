/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Non-fatal conversion warnings

use crate::validation::ValidationIssue;
use serde::Serialize;
use std::fmt;

/// Something odd about the input that conversion recovered from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConversionWarning {
    /// Coordinate outside [-0.1, 1.1]; it was wrapped into [0, 1)
    CoordinateOutOfRange {
        atom: usize,
        axis: char,
        value: f64,
        wrapped: f64,
    },
    /// NaN or infinite coordinate; replaced with 0.0
    NonFiniteCoordinate { atom: usize, axis: char },
    /// Config missing, unreadable or incomplete; fell back to native/default charges
    ConfigRead(String),
    /// Only some atoms carried native charges, so none were used
    PartialNativeCharges { with_charge: usize, total: usize },
    /// Composition check failed
    Validation(ValidationIssue),
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::CoordinateOutOfRange {
                atom,
                axis,
                value,
                wrapped,
            } => write!(
                f,
                "potentially invalid fractional coordinate at atom {atom}: {axis}={value} (wrapped to {wrapped})"
            ),
            ConversionWarning::NonFiniteCoordinate { atom, axis } => {
                write!(f, "non-finite fractional coordinate at atom {atom}: {axis} set to 0.0")
            }
            ConversionWarning::ConfigRead(detail) => {
                write!(f, "config ignored ({detail}); using structure or default charges")
            }
            ConversionWarning::PartialNativeCharges { with_charge, total } => write!(
                f,
                "only {with_charge} of {total} atoms carry charges in the structure; native charges ignored"
            ),
            ConversionWarning::Validation(issue) => write!(f, "{issue}"),
        }
    }
}
