/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Conversion config (YAML)
//!
//! ```yaml
//! unit_cell:
//!   a: 11.919
//!   gamma: 90.0
//! charges:
//!   Si: 2.05
//!   O: -1.025
//! ```
//!
//! Both sections are optional, but a file with neither is rejected. Other
//! keys (e.g. `masses`) are ignored.

pub mod errors;

pub use errors::{ConfigError, Result};

use crate::cell::LatticeParameters;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-parameter overrides for the unit cell read from the structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UnitCellOverrides {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
}

impl UnitCellOverrides {
    /// Return `lattice` with every overridden parameter replaced
    pub fn apply(&self, lattice: &LatticeParameters) -> LatticeParameters {
        LatticeParameters {
            a: self.a.unwrap_or(lattice.a),
            b: self.b.unwrap_or(lattice.b),
            c: self.c.unwrap_or(lattice.c),
            alpha: self.alpha.unwrap_or(lattice.alpha),
            beta: self.beta.unwrap_or(lattice.beta),
            gamma: self.gamma.unwrap_or(lattice.gamma),
        }
    }

    /// True if no parameter is overridden
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// User-supplied conversion settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub unit_cell: Option<UnitCellOverrides>,
    #[serde(default)]
    pub charges: Option<BTreeMap<String, f64>>,
}

impl ConversionConfig {
    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ConversionConfig = serde_yaml::from_str(yaml)?;
        if config.unit_cell.is_none() && config.charges.is_none() {
            return Err(ConfigError::MissingSections);
        }
        Ok(config)
    }

    /// Read and parse a YAML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Config charges, empty when the section is absent
    pub fn charge_map(&self) -> BTreeMap<String, f64> {
        self.charges.clone().unwrap_or_default()
    }

    /// Apply the unit-cell overrides, if any
    pub fn apply_unit_cell(&self, lattice: &LatticeParameters) -> LatticeParameters {
        match &self.unit_cell {
            Some(overrides) => overrides.apply(lattice),
            None => *lattice,
        }
    }
}
