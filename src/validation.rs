/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Sanity checks on converted zeolite structures
//!
//! None of these checks are fatal. They catch inputs that would make the
//! downstream Al-substitution run misbehave: no substitutable T-atoms, a
//! framework without oxygen, an implausible O:T ratio, or aluminium that is
//! already present.

use crate::atoms::AtomRecord;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Acceptable range for the number of O atoms per T-atom
pub const OXYGEN_RATIO_RANGE: (f64, f64) = (1.5, 2.5);

/// Output files smaller than this are reported as suspicious
pub const MIN_OUTPUT_BYTES: u64 = 50;

/// A potential problem with a converted structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationIssue {
    /// No atom matches the T-atom symbol
    NoTAtoms { symbol: String },
    /// No oxygen atoms at all
    NoOxygen,
    /// O:T ratio outside [`OXYGEN_RATIO_RANGE`]
    UnusualOxygenRatio { ratio: f64 },
    /// Aluminium is already part of the framework
    PreexistingAluminium { count: usize },
    /// A written file is unexpectedly small
    SmallOutputFile { path: PathBuf, bytes: u64 },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoTAtoms { symbol } => write!(
                f,
                "no T-atoms ({symbol}) found; zeoran needs them to substitute with Al"
            ),
            ValidationIssue::NoOxygen => {
                write!(f, "no oxygen (O) atoms found; this does not look like a zeolite")
            }
            ValidationIssue::UnusualOxygenRatio { ratio } => write!(
                f,
                "unusual T:O ratio (1:{ratio:.2}), expected around 1:2 for zeolites"
            ),
            ValidationIssue::PreexistingAluminium { count } => write!(
                f,
                "structure already contains {count} aluminium atoms; zeoran may behave unexpectedly"
            ),
            ValidationIssue::SmallOutputFile { path, bytes } => {
                write!(f, "{} is unusually small ({bytes} bytes)", path.display())
            }
        }
    }
}

/// Check the composition of a converted structure
pub fn validate_composition(atoms: &[AtomRecord], t_atom: &str) -> Vec<ValidationIssue> {
    let count = |symbol: &str| atoms.iter().filter(|a| a.symbol() == symbol).count();
    let t_count = count(t_atom);
    let o_count = count("O");
    let al_count = if t_atom == "Al" { 0 } else { count("Al") };

    let mut issues = Vec::new();

    if t_count == 0 {
        issues.push(ValidationIssue::NoTAtoms {
            symbol: t_atom.to_string(),
        });
    }

    if o_count == 0 {
        issues.push(ValidationIssue::NoOxygen);
    }

    if t_count > 0 && o_count > 0 {
        let ratio = o_count as f64 / t_count as f64;
        if ratio < OXYGEN_RATIO_RANGE.0 || ratio > OXYGEN_RATIO_RANGE.1 {
            issues.push(ValidationIssue::UnusualOxygenRatio { ratio });
        }
    }

    if al_count > 0 {
        issues.push(ValidationIssue::PreexistingAluminium { count: al_count });
    }

    issues
}

/// Flag a written file smaller than [`MIN_OUTPUT_BYTES`]
pub fn check_output_size<P: AsRef<Path>>(path: P) -> io::Result<Option<ValidationIssue>> {
    let path = path.as_ref();
    let bytes = fs::metadata(path)?.len();
    if bytes < MIN_OUTPUT_BYTES {
        Ok(Some(ValidationIssue::SmallOutputFile {
            path: path.to_path_buf(),
            bytes,
        }))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::Position;

    fn atoms(si: usize, o: usize, al: usize) -> Vec<AtomRecord> {
        let mut out = Vec::new();
        for (symbol, n) in [("Si", si), ("O", o), ("Al", al)] {
            for i in 0..n {
                out.push(AtomRecord::new(
                    symbol,
                    Position::new(i as f64 * 0.01, 0.0, 0.0),
                    0.0,
                ));
            }
        }
        out
    }

    #[test]
    fn test_clean_framework() {
        assert!(validate_composition(&atoms(24, 48, 0), "Si").is_empty());
    }

    #[test]
    fn test_missing_species() {
        let issues = validate_composition(&atoms(0, 0, 0), "Si");
        assert_eq!(
            issues,
            vec![
                ValidationIssue::NoTAtoms {
                    symbol: "Si".to_string()
                },
                ValidationIssue::NoOxygen
            ]
        );
    }

    #[test]
    fn test_ratio_and_aluminium() {
        let issues = validate_composition(&atoms(10, 10, 2), "Si");
        assert!(matches!(
            issues[0],
            ValidationIssue::UnusualOxygenRatio { ratio } if (ratio - 1.0).abs() < 1e-12
        ));
        assert_eq!(issues[1], ValidationIssue::PreexistingAluminium { count: 2 });
    }

    #[test]
    fn test_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.txt");
        fs::write(&path, "Si Si 0 0 0 0\n").unwrap();
        assert!(matches!(
            check_output_size(&path).unwrap(),
            Some(ValidationIssue::SmallOutputFile { bytes: 14, .. })
        ));
    }
}
