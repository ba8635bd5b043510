/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Binned coordinate histograms

use super::errors::{CompareError, Result};
use crate::atoms::{AtomRecord, Position};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Default comparison tolerance in fractional units
pub const DEFAULT_BIN_SIZE: f64 = 0.01;

/// Rounded quotient `value / bin_size`.
///
/// Held as an integer-valued `f64` so indices beyond the `i64` range stay
/// distinct. Equality, hashing and ordering go through the bit pattern with
/// `-0.0` folded into `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct BinIndex(f64);

impl BinIndex {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for BinIndex {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for BinIndex {}

impl Hash for BinIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for BinIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Histogram key: atom type and the bin index along each axis.
///
/// The binned coordinate is `index * bin_size`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HistogramKey {
    pub symbol: String,
    pub bins: [BinIndex; 3],
}

impl HistogramKey {
    /// Binned coordinates for a given bin size
    pub fn binned_position(&self, bin_size: f64) -> Position {
        Position::from_array(self.bins.map(|b| b.value() * bin_size))
    }
}

/// Index of the bin nearest to `value`, ties rounding to even.
///
/// `None` when the quotient overflows to infinity or `value` is not finite.
pub fn bin_index(value: f64, bin_size: f64) -> Option<BinIndex> {
    let index = (value / bin_size).round_ties_even();
    // Adding 0.0 turns -0.0 into 0.0
    index.is_finite().then_some(BinIndex(index + 0.0))
}

pub(crate) fn check_bin_size(bin_size: f64) -> Result<()> {
    if bin_size.is_finite() && bin_size > 0.0 {
        Ok(())
    } else {
        Err(CompareError::InvalidBinSize(bin_size))
    }
}

/// Multiset of binned atom positions
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateHistogram {
    bin_size: f64,
    counts: HashMap<HistogramKey, usize>,
}

impl CoordinateHistogram {
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Count for `key`, 0 when absent
    pub fn get(&self, key: &HistogramKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &HistogramKey> {
        self.counts.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HistogramKey, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Number of distinct bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of atoms counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Group atoms by symbol and binned position
pub fn build_histogram(atoms: &[AtomRecord], bin_size: f64) -> Result<CoordinateHistogram> {
    check_bin_size(bin_size)?;

    let mut counts = HashMap::new();
    for atom in atoms {
        let mut bins = [BinIndex(0.0); 3];
        for (bin, value) in bins.iter_mut().zip(atom.position().to_array()) {
            *bin = bin_index(value, bin_size)
                .ok_or(CompareError::BinOverflow { value, bin_size })?;
        }
        let key = HistogramKey {
            symbol: atom.symbol().to_string(),
            bins,
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    Ok(CoordinateHistogram { bin_size, counts })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(symbol: &str, x: f64, y: f64, z: f64) -> AtomRecord {
        AtomRecord::new(symbol, Position::new(x, y, z), 0.0)
    }

    #[test]
    fn test_binning_sensitivity() {
        let atoms = vec![atom("O", 0.1000, 0.2, 0.3), atom("O", 0.1049, 0.2, 0.3)];

        let coarse = build_histogram(&atoms, 0.01).unwrap();
        assert_eq!(coarse.len(), 1);
        assert_eq!(coarse.total(), 2);

        let fine = build_histogram(&atoms, 0.001).unwrap();
        assert_eq!(fine.len(), 2);
    }

    #[test]
    fn test_symbols_are_separate() {
        let atoms = vec![atom("Si", 0.5, 0.5, 0.5), atom("Al", 0.5, 0.5, 0.5)];
        assert_eq!(build_histogram(&atoms, 0.01).unwrap().len(), 2);
    }

    #[test]
    fn test_order_independent() {
        let atoms = vec![
            atom("Si", 0.1, 0.2, 0.3),
            atom("O", 0.4, 0.5, 0.6),
            atom("O", 0.4, 0.5, 0.6),
        ];
        let mut reversed = atoms.clone();
        reversed.reverse();

        assert_eq!(
            build_histogram(&atoms, 0.01).unwrap(),
            build_histogram(&reversed, 0.01).unwrap()
        );
    }

    #[test]
    fn test_binned_position() {
        let h = build_histogram(&[atom("Si", 0.123, 0.5, 0.987)], 0.01).unwrap();
        let key = h.keys().next().unwrap();
        assert_eq!(key.bins.map(BinIndex::value), [12.0, 50.0, 99.0]);
        let p = key.binned_position(h.bin_size());
        assert!((p.x - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_bin_size() {
        assert!(build_histogram(&[], 0.0).is_err());
        assert!(build_histogram(&[], -0.01).is_err());
        assert!(build_histogram(&[], f64::NAN).is_err());
    }

    #[test]
    fn test_indices_beyond_i64_stay_distinct() {
        // 0.1 / 1e-20 and 0.7 / 1e-20 both exceed i64::MAX
        let atoms = vec![atom("O", 0.1, 0.2, 0.3), atom("O", 0.7, 0.8, 0.9)];
        assert_eq!(build_histogram(&atoms, 1e-20).unwrap().len(), 2);

        let far = vec![atom("O", 1e17, 0.0, 0.0), atom("O", 5e17, 0.0, 0.0)];
        assert_eq!(build_histogram(&far, 0.01).unwrap().len(), 2);
    }

    #[test]
    fn test_negative_zero_bin() {
        let atoms = vec![atom("O", -0.001, 0.0, 0.0), atom("O", 0.001, 0.0, 0.0)];
        assert_eq!(build_histogram(&atoms, 0.01).unwrap().len(), 1);
    }

    #[test]
    fn test_overflowing_quotient() {
        let atoms = vec![atom("O", 1e300, 0.0, 0.0)];
        assert!(matches!(
            build_histogram(&atoms, 1e-300),
            Err(CompareError::BinOverflow { .. })
        ));
    }
}
