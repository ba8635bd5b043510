/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Fractional position type

use serde::Serialize;
use std::fmt;
use std::ops::{Add, Sub};

/// A position expressed in fractions of the unit-cell basis vectors
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    /// Fraction along a
    pub x: f64,
    /// Fraction along b
    pub y: f64,
    /// Fraction along c
    pub z: f64,
}

impl Position {
    /// Create a new fractional position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position at the cell origin
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Components as an array in x, y, z order
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Build a position from an x, y, z array
    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Apply `f` to every component
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// True if all three components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Largest per-component distance to `other`, honouring periodic images
    pub fn periodic_max_distance(&self, other: &Self) -> f64 {
        let d = *self - *other;
        d.to_array()
            .iter()
            .map(|v| {
                let r = v.abs().rem_euclid(1.0);
                r.min(1.0 - r)
            })
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
