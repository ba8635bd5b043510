/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Canonical record builder
//!
//! Turns a parsed structure into the unit-cell table and atom-site records
//! consumed by zeoran: applies config overrides, validates the lattice,
//! wraps fractional coordinates into [0, 1) and resolves every charge.

use super::errors::Result;
use super::options::BuildOptions;
use super::table::{charges_by_symbol, UnitCellTable};
use super::warnings::ConversionWarning;
use crate::atoms::{AtomRecord, Position, StructureSnapshot};
use crate::charges::ChargeResolver;
use crate::io::StructureReader;
use crate::validation::validate_composition;
use log::{debug, info, warn};
use std::path::Path;

/// Coordinates outside this band are reported before wrapping
pub const COORDINATE_TOLERANCE_BAND: (f64, f64) = (-0.1, 1.1);

/// Result of converting one structure
#[derive(Debug, Clone)]
pub struct Conversion {
    pub unit_cell: UnitCellTable,
    pub atoms: Vec<AtomRecord>,
    pub warnings: Vec<ConversionWarning>,
}

/// Wrap a fractional coordinate into [0, 1). Non-finite values map to 0.0.
pub fn wrap_coordinate(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(1.0);
    // tiny negative inputs round up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

fn canonical_position(
    index: usize,
    raw: &Position,
    warnings: &mut Vec<ConversionWarning>,
) -> Position {
    let mut out = [0.0; 3];
    for ((axis, value), slot) in ['x', 'y', 'z']
        .into_iter()
        .zip(raw.to_array())
        .zip(out.iter_mut())
    {
        if !value.is_finite() {
            warn!("Non-finite fractional coordinate at atom {}: {}", index, raw);
            warnings.push(ConversionWarning::NonFiniteCoordinate { atom: index, axis });
            *slot = 0.0;
            continue;
        }

        let wrapped = wrap_coordinate(value);
        if value < COORDINATE_TOLERANCE_BAND.0 || value > COORDINATE_TOLERANCE_BAND.1 {
            warn!(
                "Potentially invalid fractional coordinate at atom {}: {}",
                index, raw
            );
            warnings.push(ConversionWarning::CoordinateOutOfRange {
                atom: index,
                axis,
                value,
                wrapped,
            });
        }
        *slot = wrapped;
    }
    Position::from_array(out)
}

/// Build the canonical tables for `structure`.
///
/// Fails only when the (possibly overridden) lattice has a non-positive edge
/// length; everything else is recovered and reported in `warnings`.
pub fn build(structure: &StructureSnapshot, options: &BuildOptions) -> Result<Conversion> {
    let mut warnings: Vec<ConversionWarning> = options
        .config_warnings
        .iter()
        .cloned()
        .map(ConversionWarning::ConfigRead)
        .collect();

    let lattice = match &options.config {
        Some(config) => config.apply_unit_cell(structure.lattice()),
        None => *structure.lattice(),
    };
    lattice.validate()?;

    let native_complete = structure.native_charges_complete();
    if structure.has_native_charges() && !native_complete {
        let with_charge = structure
            .atoms()
            .iter()
            .filter(|atom| atom.charge.is_some())
            .count();
        warn!(
            "Only {} of {} atoms carry native charges; ignoring them",
            with_charge,
            structure.atom_count()
        );
        warnings.push(ConversionWarning::PartialNativeCharges {
            with_charge,
            total: structure.atom_count(),
        });
    }

    let resolver = ChargeResolver::new(
        options
            .config
            .as_ref()
            .map(|config| config.charge_map())
            .unwrap_or_default(),
        options.default_charges.clone(),
        options.charge_policy,
    );

    let mut atoms = Vec::with_capacity(structure.atom_count());
    let mut sources = Vec::with_capacity(structure.atom_count());
    for (index, source) in structure.atoms().iter().enumerate() {
        let position = canonical_position(index, &source.position, &mut warnings);
        let charge = resolver.resolve(&source.symbol, source.charge, native_complete);
        debug!(
            "atom {} {} -> {} q={} ({})",
            index, source.symbol, position, charge.value, charge.source
        );
        atoms.push(AtomRecord::new(&source.symbol, position, charge.value));
        sources.push(charge.source);
    }

    let t_atom_count = atoms
        .iter()
        .filter(|atom| atom.symbol() == options.t_atom)
        .count();

    for issue in validate_composition(&atoms, &options.t_atom) {
        warn!("{}", issue);
        warnings.push(ConversionWarning::Validation(issue));
    }

    let setting = lattice.setting();
    info!(
        "Converted {} atoms ({} T-atoms), cell {}, setting {}",
        atoms.len(),
        t_atom_count,
        lattice,
        setting
    );

    let unit_cell = UnitCellTable {
        atom_count: atoms.len(),
        t_atom_count,
        lattice,
        setting,
        output_formats: options.output_formats.clone(),
        charges: charges_by_symbol(&atoms, &sources),
    };

    Ok(Conversion {
        unit_cell,
        atoms,
        warnings,
    })
}

/// Read `path` with `reader` and build its canonical tables
pub fn convert_file<R, P>(reader: &R, path: P, options: &BuildOptions) -> Result<Conversion>
where
    R: StructureReader + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Reading structure file: {}", path.display());
    let structure = reader.read_structure(path)?;
    build(&structure, options)
}
