/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit-cell parameters and lattice classification

pub mod errors;
pub mod lattice;

pub use errors::{LatticeError, Result};
pub use lattice::{classify, LatticeParameters, LatticeSetting, SETTING_TOLERANCE};
