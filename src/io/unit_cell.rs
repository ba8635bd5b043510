/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit-cell file: tab-separated `key: value` lines plus a charges block

use super::errors::{IoError, Result};
use crate::cell::{LatticeParameters, LatticeSetting};
use crate::convert::{SymbolCharge, UnitCellTable};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

const FORMAT: &str = "unit-cell";

/// Write the unit-cell table.
///
/// Lengths carry four decimals; angles are written unrounded.
pub fn write_unit_cell<W: Write>(mut writer: W, table: &UnitCellTable) -> Result<()> {
    let cell = &table.lattice;

    writeln!(writer, "Number of atoms:\t{}", table.atom_count)?;
    writeln!(writer, "Number of T-atoms:\t{}", table.t_atom_count)?;
    writeln!(writer, "a:\t\t\t{:.4}", cell.a)?;
    writeln!(writer, "b:\t\t\t{:.4}", cell.b)?;
    writeln!(writer, "c:\t\t\t{:.4}", cell.c)?;
    // Debug formatting keeps the shortest round-trip form and a trailing ".0"
    writeln!(writer, "alpha:\t\t{:?}", cell.alpha)?;
    writeln!(writer, "beta:\t\t{:?}", cell.beta)?;
    writeln!(writer, "gamma:\t\t{:?}", cell.gamma)?;
    writeln!(writer, "setting:\t\t{}", table.setting)?;
    if !table.output_formats.is_empty() {
        writeln!(writer, "output_formats:\t{}", table.output_formats.join(" "))?;
    }

    writeln!(writer)?;
    writeln!(writer, "# Atomic charges")?;
    for (symbol, entry) in &table.charges {
        match entry {
            SymbolCharge::Resolved(charge) => {
                writeln!(writer, "charge_{}: {:.6}", symbol, charge.value)?
            }
            SymbolCharge::Unavailable { reason } => {
                writeln!(writer, "# charge_{}: unavailable ({})", symbol, reason)?
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Contents of a unit-cell file as read back from disk.
///
/// Charge provenance is not stored in the file, so charges are plain values;
/// placeholder lines read back as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellFile {
    pub atom_count: usize,
    pub t_atom_count: usize,
    pub lattice: LatticeParameters,
    pub setting: LatticeSetting,
    pub output_formats: Vec<String>,
    pub charges: BTreeMap<String, Option<f64>>,
}

fn number<T: std::str::FromStr>(line: usize, key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| IoError::parse(FORMAT, line, format!("invalid value '{}' for {}", value, key)))
}

/// Read a unit-cell file. The charges block is optional.
pub fn read_unit_cell<R: BufRead>(reader: R) -> Result<UnitCellFile> {
    let mut atom_count = None;
    let mut t_atom_count = None;
    let mut params: [Option<f64>; 6] = [None; 6];
    let mut setting = None;
    let mut output_formats = Vec::new();
    let mut charges = BTreeMap::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let n = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some((key, _)) = comment.trim().split_once(':') {
                if let Some(symbol) = key.trim().strip_prefix("charge_") {
                    charges.insert(symbol.to_string(), None);
                }
            }
            continue;
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| IoError::parse(FORMAT, n, format!("expected 'key: value', got '{}'", trimmed)))?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "Number of atoms" => atom_count = Some(number(n, key, value)?),
            "Number of T-atoms" => t_atom_count = Some(number(n, key, value)?),
            "a" => params[0] = Some(number(n, key, value)?),
            "b" => params[1] = Some(number(n, key, value)?),
            "c" => params[2] = Some(number(n, key, value)?),
            "alpha" => params[3] = Some(number(n, key, value)?),
            "beta" => params[4] = Some(number(n, key, value)?),
            "gamma" => params[5] = Some(number(n, key, value)?),
            "setting" => {
                setting = Some(LatticeSetting::from_label(value).ok_or_else(|| {
                    IoError::parse(FORMAT, n, format!("unknown setting '{}'", value))
                })?)
            }
            "output_formats" => {
                output_formats = value.split_whitespace().map(str::to_string).collect()
            }
            _ => match key.strip_prefix("charge_") {
                Some(symbol) => {
                    charges.insert(symbol.to_string(), Some(number(n, key, value)?));
                }
                None => log::debug!("Ignoring unknown unit-cell key '{}'", key),
            },
        }
    }

    let missing = |name: &str| IoError::InvalidStructure(format!("unit-cell file lacks '{}'", name));
    let names = ["a", "b", "c", "alpha", "beta", "gamma"];
    let mut values = [0.0; 6];
    for ((slot, param), name) in values.iter_mut().zip(params).zip(names) {
        *slot = param.ok_or_else(|| missing(name))?;
    }

    Ok(UnitCellFile {
        atom_count: atom_count.ok_or_else(|| missing("Number of atoms"))?,
        t_atom_count: t_atom_count.ok_or_else(|| missing("Number of T-atoms"))?,
        lattice: LatticeParameters::new(values[0], values[1], values[2], values[3], values[4], values[5]),
        setting: setting.ok_or_else(|| missing("setting"))?,
        output_formats,
        charges,
    })
}
