/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Immutable snapshot of a parsed crystal structure

use super::atom::SourceAtom;
use crate::cell::LatticeParameters;
use std::collections::BTreeMap;

/// Lattice plus ordered atom list, as produced by a structure reader.
///
/// A snapshot is never modified after construction; conversion produces new
/// records instead.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSnapshot {
    lattice: LatticeParameters,
    atoms: Vec<SourceAtom>,
}

impl StructureSnapshot {
    /// Create a snapshot from a lattice and its atoms
    pub fn new(lattice: LatticeParameters, atoms: Vec<SourceAtom>) -> Self {
        Self { lattice, atoms }
    }

    /// Unit-cell parameters as read from the source
    pub fn lattice(&self) -> &LatticeParameters {
        &self.lattice
    }

    /// Atoms in source order
    pub fn atoms(&self) -> &[SourceAtom] {
        &self.atoms
    }

    /// Number of atoms
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// True if at least one atom carried a native charge
    pub fn has_native_charges(&self) -> bool {
        self.atoms.iter().any(|atom| atom.charge.is_some())
    }

    /// True if every atom carried a native charge
    pub fn native_charges_complete(&self) -> bool {
        !self.atoms.is_empty() && self.atoms.iter().all(|atom| atom.charge.is_some())
    }

    /// Number of atoms of each symbol
    pub fn composition(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.symbol.clone()).or_insert(0) += 1;
        }
        counts
    }
}
