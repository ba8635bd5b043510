/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit-cell parameters and lattice-setting classification

use super::errors::{LatticeError, Result};
use serde::Serialize;
use std::fmt;

/// Tolerance used when comparing edge lengths and angles
pub const SETTING_TOLERANCE: f64 = 1e-6;

/// Coarse classification of the unit-cell shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeSetting {
    /// a = b = c, all angles 90°
    Cubic,
    /// At least one edge differs, all angles 90°
    Orthorhombic,
    /// At least one angle differs from 90°
    Triclinic,
}

impl LatticeSetting {
    /// Label written to the unit-cell file
    pub fn as_str(&self) -> &'static str {
        match self {
            LatticeSetting::Cubic => "cubic",
            LatticeSetting::Orthorhombic => "orthorhombic",
            LatticeSetting::Triclinic => "triclinic",
        }
    }

    /// Parse a label as written by [`LatticeSetting::as_str`]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "cubic" => Some(LatticeSetting::Cubic),
            "orthorhombic" => Some(LatticeSetting::Orthorhombic),
            "triclinic" => Some(LatticeSetting::Triclinic),
            _ => None,
        }
    }
}

impl fmt::Display for LatticeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a cell from its six parameters.
///
/// Length inequality escalates to orthorhombic; any angle away from 90°
/// escalates to triclinic regardless of the lengths. No validation is done
/// here, see [`LatticeParameters::validate`].
pub fn classify(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> LatticeSetting {
    let mut setting = LatticeSetting::Cubic;

    if (a - b).abs() > SETTING_TOLERANCE
        || (a - c).abs() > SETTING_TOLERANCE
        || (b - c).abs() > SETTING_TOLERANCE
    {
        setting = LatticeSetting::Orthorhombic;
    }

    if [alpha, beta, gamma]
        .iter()
        .any(|angle| (angle - 90.0).abs() > SETTING_TOLERANCE)
    {
        setting = LatticeSetting::Triclinic;
    }

    setting
}

/// Unit-cell edge lengths (Å) and angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    /// Create a new parameter set. Call [`validate`](Self::validate) before use.
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Cubic cell with edge `a`
    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// Check that every edge length is strictly positive
    pub fn validate(&self) -> Result<()> {
        // NaN fails the comparison and is rejected too
        let positive = |v: f64| v > 0.0;
        if positive(self.a) && positive(self.b) && positive(self.c) {
            Ok(())
        } else {
            Err(LatticeError::NonPositiveLength {
                a: self.a,
                b: self.b,
                c: self.c,
            })
        }
    }

    /// Derived lattice setting, recomputed on every call
    pub fn setting(&self) -> LatticeSetting {
        classify(self.a, self.b, self.c, self.alpha, self.beta, self.gamma)
    }

    /// Cell volume in Å³
    pub fn volume(&self) -> f64 {
        let to_rad = std::f64::consts::PI / 180.0;
        let (ca, cb, cg) = (
            (self.alpha * to_rad).cos(),
            (self.beta * to_rad).cos(),
            (self.gamma * to_rad).cos(),
        );
        let factor = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
        self.a * self.b * self.c * factor.max(0.0).sqrt()
    }
}

impl fmt::Display for LatticeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={:.4}, b={:.4}, c={:.4}, α={}°, β={}°, γ={}°",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )
    }
}
