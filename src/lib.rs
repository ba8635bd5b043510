/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # zeoran-prep
//!
//! Structure preparation for the zeoran Al-substitution generator.
//!
//! Crystal structures are converted into two canonical text files: a
//! unit-cell table (lattice, setting, per-element charges) and an atom-sites
//! list with fractional coordinates wrapped into [0, 1). A histogram-based
//! comparator checks two atom-sites files against each other.

pub mod atoms;
pub mod cell;
pub mod charges;
pub mod cli;
pub mod compare;
pub mod config;
pub mod convert;
pub mod io;
pub mod validation;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use atoms::{AtomRecord, Position, SourceAtom, StructureSnapshot};
pub use cell::{classify, LatticeParameters, LatticeSetting};
pub use compare::{compare, compare_files, ComparisonReport};
pub use convert::{build, BuildOptions, Conversion};
