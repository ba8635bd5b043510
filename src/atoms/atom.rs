/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atom representations before and after canonicalization

use super::vector::Position;
use serde::Serialize;
use std::fmt;

/// An atom as delivered by a structure reader
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAtom {
    /// Element symbol (case-sensitive)
    pub symbol: String,
    /// Raw fractional position, possibly outside [0, 1)
    pub position: Position,
    /// Charge carried by the source file, if any
    pub charge: Option<f64>,
}

impl SourceAtom {
    /// Create an atom without a native charge
    pub fn new(symbol: &str, position: Position) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
            charge: None,
        }
    }

    /// Create an atom carrying a native charge
    pub fn with_charge(symbol: &str, position: Position, charge: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
            charge: Some(charge),
        }
    }
}

/// A canonical atom-site record: symbol, wrapped position and resolved charge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomRecord {
    symbol: String,
    position: Position,
    charge: f64,
}

impl AtomRecord {
    /// Create a new record
    pub fn new(symbol: &str, position: Position, charge: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            position,
            charge,
        }
    }

    /// Element symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fractional position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Resolved charge
    pub fn charge(&self) -> f64 {
        self.charge
    }
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} (q={:.6})", self.symbol, self.position, self.charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let record = AtomRecord::new("Si", Position::new(0.25, 0.5, 0.75), 1.5);

        assert_eq!(record.symbol(), "Si");
        assert_eq!(record.position(), &Position::new(0.25, 0.5, 0.75));
        assert_eq!(record.charge(), 1.5);
    }

    #[test]
    fn test_source_atom_charge() {
        let plain = SourceAtom::new("O", Position::origin());
        let charged = SourceAtom::with_charge("O", Position::origin(), -0.75);

        assert_eq!(plain.charge, None);
        assert_eq!(charged.charge, Some(-0.75));
    }
}
