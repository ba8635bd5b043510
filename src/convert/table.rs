/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit-cell metadata table

use crate::atoms::AtomRecord;
use crate::cell::{LatticeParameters, LatticeSetting};
use crate::charges::{ChargeSource, ResolvedCharge};
use serde::Serialize;
use std::collections::BTreeMap;

/// Charge entry for one symbol in the unit-cell file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SymbolCharge {
    /// Every site of the symbol shares this charge
    Resolved(ResolvedCharge),
    /// No single value can be written for the symbol
    Unavailable { reason: String },
}

impl SymbolCharge {
    /// Charge value, if available
    pub fn value(&self) -> Option<f64> {
        match self {
            SymbolCharge::Resolved(charge) => Some(charge.value),
            SymbolCharge::Unavailable { .. } => None,
        }
    }
}

/// Unit-cell metadata for the downstream engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitCellTable {
    pub atom_count: usize,
    pub t_atom_count: usize,
    pub lattice: LatticeParameters,
    pub setting: LatticeSetting,
    pub output_formats: Vec<String>,
    pub charges: BTreeMap<String, SymbolCharge>,
}

/// Collapse per-atom charges into one entry per symbol
pub(crate) fn charges_by_symbol(
    atoms: &[AtomRecord],
    sources: &[ChargeSource],
) -> BTreeMap<String, SymbolCharge> {
    let mut seen: BTreeMap<String, Vec<ResolvedCharge>> = BTreeMap::new();
    for (atom, source) in atoms.iter().zip(sources) {
        seen.entry(atom.symbol().to_string())
            .or_default()
            .push(ResolvedCharge::new(atom.charge(), *source));
    }

    seen.into_iter()
        .map(|(symbol, charges)| {
            let first = charges[0];
            let entry = if charges.iter().any(|c| c.source == ChargeSource::Unresolved) {
                SymbolCharge::Unavailable {
                    reason: "unresolved".to_string(),
                }
            } else if charges
                .iter()
                .any(|c| (c.value - first.value).abs() > 1e-9 || c.source != first.source)
            {
                SymbolCharge::Unavailable {
                    reason: "varies by site".to_string(),
                }
            } else {
                SymbolCharge::Resolved(first)
            };
            (symbol, entry)
        })
        .collect()
}
