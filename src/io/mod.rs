/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Structure readers and canonical zeoran file formats
//!
//! The canonical files are what zeoran reads at start-up:
//! `unit_cell/<name>.txt` (cell metadata and charges) and
//! `atom_sites/<name>.txt` (one fixed-width line per atom).

pub mod atom_sites;
pub mod cif;
pub mod errors;
pub mod unit_cell;

pub use atom_sites::{load_atom_sites, read_atom_sites, write_atom_sites, AtomSites, MalformedLine};
pub use cif::CifReader;
pub use errors::{IoError, Result};
pub use unit_cell::{read_unit_cell, write_unit_cell, UnitCellFile};

use crate::atoms::StructureSnapshot;
use std::path::Path;

/// Capability to turn a structure file into a lattice and atom list.
///
/// The conversion pipeline only depends on this trait, so any file format
/// can be plugged in.
pub trait StructureReader {
    fn read_structure(&self, path: &Path) -> Result<StructureSnapshot>;
}
