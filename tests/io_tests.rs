/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tempfile::tempdir;
use zeoran_prep::atoms::{AtomRecord, Position};
use zeoran_prep::cell::LatticeSetting;
use zeoran_prep::convert::{build, BuildOptions};
use zeoran_prep::io::{
    load_atom_sites, read_unit_cell, write_atom_sites, write_unit_cell, CifReader,
};

fn sample_records() -> Vec<AtomRecord> {
    vec![
        AtomRecord::new("Si", Position::new(0.0, 0.184_312_345_6, 0.371_3), 2.05),
        AtomRecord::new("O", Position::new(0.999_999_9, 0.226_5, 0.5), -1.025),
        AtomRecord::new("O", Position::new(1.0 / 3.0, 2.0 / 3.0, 0.293_1), -1.025),
        AtomRecord::new("Na", Position::new(0.5, 0.5, 0.5), 1.0),
    ]
}

#[test]
fn test_atom_sites_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("atom_sites.txt");
    let records = sample_records();

    write_atom_sites(BufWriter::new(File::create(&path).unwrap()), &records).unwrap();
    let sites = load_atom_sites(&path).unwrap();

    assert!(sites.malformed.is_empty());
    assert_eq!(sites.records.len(), records.len());
    for (read, written) in sites.records.iter().zip(&records) {
        assert_eq!(read.symbol(), written.symbol());
        for (a, b) in read.position().to_array().iter().zip(written.position().to_array()) {
            assert_relative_eq!(*a, b, epsilon = 1e-6);
        }
        assert_relative_eq!(read.charge(), written.charge(), epsilon = 1e-6);
    }
}

#[test]
fn test_unit_cell_round_trip() {
    let cif = "\
data_MFI
_cell_length_a 20.090
_cell_length_b 19.738
_cell_length_c 13.142
_cell_angle_alpha 90.0
_cell_angle_beta 90.0
_cell_angle_gamma 90.0
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 0.4224 0.0565 -0.3340
O1 0.3726 0.0534 -0.2442
O2 0.3084 0.0587 0.0789
";
    let structure = CifReader::new().parse(cif.as_bytes()).unwrap();
    let conversion = build(&structure, &BuildOptions::default()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("MFI.txt");
    write_unit_cell(BufWriter::new(File::create(&path).unwrap()), &conversion.unit_cell).unwrap();

    let file = read_unit_cell(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(file.atom_count, 3);
    assert_eq!(file.t_atom_count, 1);
    assert_eq!(file.setting, LatticeSetting::Orthorhombic);
    assert_relative_eq!(file.lattice.b, 19.738, epsilon = 1e-4);
    assert_eq!(file.lattice.alpha, 90.0);
    assert_eq!(file.charges.get("Si"), Some(&Some(1.5)));
    assert_eq!(file.charges.get("O"), Some(&Some(-0.75)));
}

#[test]
fn test_cif_labels_without_type_symbol() {
    let cif = "\
data_x
_cell_length_a 10
_cell_length_b 10
_cell_length_c 10
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si12 0.1 0.1 0.1
O7a 0.2 0.2 0.2
";
    let structure = CifReader::new().parse(cif.as_bytes()).unwrap();
    let symbols: Vec<&str> = structure.atoms().iter().map(|a| a.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["Si", "O"]);
}

#[test]
fn test_cif_without_cell_is_rejected() {
    let cif = "\
data_x
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 0.1 0.1 0.1
";
    assert!(CifReader::new().parse(cif.as_bytes()).is_err());
}
