/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Histogram comparison of two atom lists

use super::errors::{CompareError, Result};
use super::histogram::{build_histogram, check_bin_size, HistogramKey};
use crate::atoms::AtomRecord;
use crate::io::load_atom_sites;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

/// A bin whose counts differ between the two inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramDifference {
    pub symbol: String,
    /// Binned fractional coordinates
    pub position: [f64; 3],
    pub count_file1: usize,
    pub count_file2: usize,
}

/// Outcome of comparing two structures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub bin_size: f64,
    pub total_atoms_file1: usize,
    pub total_atoms_file2: usize,
    pub type_counts_file1: BTreeMap<String, usize>,
    pub type_counts_file2: BTreeMap<String, usize>,
    pub type_counts_match: bool,
    /// Sorted by atom type, then bin
    pub differences: Vec<HistogramDifference>,
    /// Summed absolute count deltas per atom type
    pub differences_by_type: BTreeMap<String, usize>,
    /// Σ min(count1, count2) over all bins
    pub common_positions: usize,
    pub overall_similarity_percent: f64,
    pub direct_match_count: usize,
    pub direct_match_percent: f64,
    /// Lines skipped while reading each input
    pub malformed_lines_file1: usize,
    pub malformed_lines_file2: usize,
}

impl ComparisonReport {
    /// True when the similarity is exactly 100%
    pub fn is_identical(&self) -> bool {
        self.overall_similarity_percent == 100.0
    }
}

fn type_counts(atoms: &[AtomRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for atom in atoms {
        *counts.entry(atom.symbol().to_string()).or_insert(0) += 1;
    }
    counts
}

// Exact coordinates as hashable bits; -0.0 and 0.0 compare equal
fn exact_key(atom: &AtomRecord) -> (&str, [u64; 3]) {
    let bits = atom.position().to_array().map(|v| (v + 0.0).to_bits());
    (atom.symbol(), bits)
}

/// Compare two atom lists with the given bin size.
///
/// Similarity is the number of atoms the two histograms have in common,
/// relative to the size of the first list. Direct matches count atoms of the
/// second list whose exact symbol and coordinates occur in the first.
pub fn compare(atoms1: &[AtomRecord], atoms2: &[AtomRecord], bin_size: f64) -> Result<ComparisonReport> {
    check_bin_size(bin_size)?;

    let type_counts_file1 = type_counts(atoms1);
    let type_counts_file2 = type_counts(atoms2);
    let type_counts_match = type_counts_file1 == type_counts_file2;
    if !type_counts_match {
        warn!(
            "Atom type counts differ: {:?} vs {:?}",
            type_counts_file1, type_counts_file2
        );
    }

    let hist1 = build_histogram(atoms1, bin_size)?;
    let hist2 = build_histogram(atoms2, bin_size)?;

    let all_keys: BTreeSet<&HistogramKey> = hist1.keys().chain(hist2.keys()).collect();
    let mut differences = Vec::new();
    let mut differences_by_type = BTreeMap::new();
    let mut common_positions = 0;
    for key in &all_keys {
        let (count1, count2) = (hist1.get(key), hist2.get(key));
        common_positions += count1.min(count2);
        if count1 != count2 {
            *differences_by_type.entry(key.symbol.clone()).or_insert(0) += count1.abs_diff(count2);
            differences.push(HistogramDifference {
                symbol: key.symbol.clone(),
                position: key.binned_position(bin_size).to_array(),
                count_file1: count1,
                count_file2: count2,
            });
        }
    }

    let percent_of_first = |count: usize| {
        if atoms1.is_empty() {
            0.0
        } else {
            count as f64 / atoms1.len() as f64 * 100.0
        }
    };
    let overall_similarity_percent = percent_of_first(common_positions);

    // Exact duplicates in the first list collapse to one entry
    let exact1: HashSet<_> = atoms1.iter().map(exact_key).collect();
    let direct_match_count = atoms2
        .iter()
        .filter(|atom| exact1.contains(&exact_key(atom)))
        .count();
    let direct_match_percent = percent_of_first(direct_match_count);

    debug!(
        "Compared {} bins: {} differ, {} direct matches",
        all_keys.len(),
        differences.len(),
        direct_match_count
    );

    Ok(ComparisonReport {
        bin_size,
        total_atoms_file1: atoms1.len(),
        total_atoms_file2: atoms2.len(),
        type_counts_file1,
        type_counts_file2,
        type_counts_match,
        differences,
        differences_by_type,
        common_positions,
        overall_similarity_percent,
        direct_match_count,
        direct_match_percent,
        malformed_lines_file1: 0,
        malformed_lines_file2: 0,
    })
}

/// Read two atom-sites files and compare them.
///
/// Malformed lines are skipped and counted in the report.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    path1: P,
    path2: Q,
    bin_size: f64,
) -> Result<ComparisonReport> {
    let read = |path: &Path| {
        load_atom_sites(path).map_err(|source| CompareError::Read {
            path: path.to_path_buf(),
            source,
        })
    };
    let sites1 = read(path1.as_ref())?;
    let sites2 = read(path2.as_ref())?;

    let mut report = compare(&sites1.records, &sites2.records, bin_size)?;
    report.malformed_lines_file1 = sites1.malformed.len();
    report.malformed_lines_file2 = sites2.malformed.len();

    info!(
        "Compared {} and {}: {:.2}% similar",
        path1.as_ref().display(),
        path2.as_ref().display(),
        report.overall_similarity_percent
    );
    Ok(report)
}
