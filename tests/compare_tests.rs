/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use rstest::rstest;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tempfile::tempdir;
use zeoran_prep::atoms::{AtomRecord, Position};
use zeoran_prep::compare::{compare, compare_files, CompareError, DEFAULT_BIN_SIZE};
use zeoran_prep::io::write_atom_sites;

/// Ten Si and twenty O on well separated grid points
fn framework() -> Vec<AtomRecord> {
    let mut atoms = Vec::new();
    for i in 0..10 {
        atoms.push(AtomRecord::new("Si", Position::new(0.05 + i as f64 * 0.09, 0.1, 0.1), 1.5));
    }
    for i in 0..20 {
        atoms.push(AtomRecord::new(
            "O",
            Position::new(0.02 + i as f64 * 0.04, 0.6, 0.7),
            -0.75,
        ));
    }
    atoms
}

fn write_sites(dir: &tempfile::TempDir, name: &str, atoms: &[AtomRecord]) -> PathBuf {
    let path = dir.path().join(name);
    write_atom_sites(BufWriter::new(File::create(&path).unwrap()), atoms).unwrap();
    path
}

#[rstest]
#[case(0.1)]
#[case(0.01)]
#[case(0.001)]
#[case(1e-6)]
fn test_file_against_copy(#[case] bin_size: f64) {
    let dir = tempdir().unwrap();
    let first = write_sites(&dir, "a.txt", &framework());
    let copy = dir.path().join("b.txt");
    std::fs::copy(&first, &copy).unwrap();

    let report = compare_files(&first, &copy, bin_size).unwrap();
    assert!(report.is_identical());
    assert_eq!(report.overall_similarity_percent, 100.0);
    assert!(report.differences.is_empty());
    assert_eq!(report.direct_match_count, 30);
}

#[test]
fn test_one_oxygen_moved() {
    let a = framework();
    let mut b = framework();
    b[12] = AtomRecord::new("O", Position::new(0.5, 0.95, 0.95), -0.75);

    let report = compare(&a, &b, DEFAULT_BIN_SIZE).unwrap();

    assert!(report.type_counts_match);
    assert_eq!(report.differences_by_type.len(), 1);
    assert_eq!(report.differences_by_type.get("O"), Some(&2));
    assert_eq!(report.differences.len(), 2);
    assert!(report.overall_similarity_percent < 100.0);
    assert_relative_eq!(report.overall_similarity_percent, 29.0 / 30.0 * 100.0);
    assert_eq!(report.direct_match_count, 29);
    assert!(!report.is_identical());
}

#[test]
fn test_one_oxygen_missing() {
    let a = framework();
    let mut b = framework();
    b.remove(15);

    let report = compare(&a, &b, DEFAULT_BIN_SIZE).unwrap();

    assert!(!report.type_counts_match);
    assert_eq!(report.type_counts_file2.get("O"), Some(&19));
    assert_eq!(report.differences_by_type.get("O"), Some(&1));
    assert_eq!(report.total_atoms_file2, 29);
}

#[test]
fn test_small_shift_within_bin() {
    let a = framework();
    let b: Vec<AtomRecord> = a
        .iter()
        .map(|atom| {
            let p = *atom.position() + Position::new(0.001, 0.0, 0.0);
            AtomRecord::new(atom.symbol(), p, atom.charge())
        })
        .collect();

    let coarse = compare(&a, &b, 0.01).unwrap();
    assert!(coarse.is_identical());
    assert_eq!(coarse.direct_match_count, 0);

    let fine = compare(&a, &b, 0.0001).unwrap();
    assert!(!fine.is_identical());
}

#[test]
fn test_empty_inputs() {
    let report = compare(&[], &[], DEFAULT_BIN_SIZE).unwrap();
    assert_eq!(report.overall_similarity_percent, 0.0);
    assert!(report.differences.is_empty());
}

#[test]
fn test_malformed_lines_are_counted() {
    let dir = tempdir().unwrap();
    let first = write_sites(&dir, "a.txt", &framework());
    let second = dir.path().join("b.txt");
    let mut text = std::fs::read_to_string(&first).unwrap();
    text.push_str("O O 0.5 oops 0.5 -0.75\ntruncated line\n");
    std::fs::write(&second, text).unwrap();

    let report = compare_files(&first, &second, DEFAULT_BIN_SIZE).unwrap();
    assert_eq!(report.malformed_lines_file2, 2);
    assert!(report.is_identical());
}

#[test]
fn test_non_utf8_line_is_skipped() {
    let dir = tempdir().unwrap();
    let first = write_sites(&dir, "a.txt", &framework());
    let second = dir.path().join("b.txt");
    let mut bytes = std::fs::read(&first).unwrap();
    bytes.extend_from_slice(b"# comment \xff\xfe\n");
    std::fs::write(&second, bytes).unwrap();

    let report = compare_files(&first, &second, DEFAULT_BIN_SIZE).unwrap();
    assert_eq!(report.malformed_lines_file2, 1);
    assert!(report.is_identical());
}

#[rstest]
#[case(1e-20, [0.1, 0.2, 0.3], [0.7, 0.8, 0.9])]
#[case(0.01, [1e17, 0.0, 0.0], [5e17, 0.0, 0.0])]
fn test_distant_bins_are_not_merged(
    #[case] bin_size: f64,
    #[case] a: [f64; 3],
    #[case] b: [f64; 3],
) {
    let first = [AtomRecord::new("O", Position::from_array(a), 0.0)];
    let second = [AtomRecord::new("O", Position::from_array(b), 0.0)];

    let report = compare(&first, &second, bin_size).unwrap();
    assert!(!report.is_identical());
    assert_eq!(report.overall_similarity_percent, 0.0);
    assert_eq!(report.differences.len(), 2);
}

#[test]
fn test_unreadable_file() {
    let dir = tempdir().unwrap();
    let first = write_sites(&dir, "a.txt", &framework());

    let result = compare_files(&first, dir.path().join("missing.txt"), DEFAULT_BIN_SIZE);
    assert!(matches!(result, Err(CompareError::Read { .. })));
}

#[test]
fn test_json_report() {
    let report = compare(&framework(), &framework(), DEFAULT_BIN_SIZE).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_atoms_file1"], 30);
    assert_eq!(json["type_counts_file1"]["O"], 20);
    assert_eq!(json["overall_similarity_percent"], 100.0);
}
