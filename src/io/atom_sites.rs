/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atom-sites file: `label type x y z charge`, one atom per line

use super::errors::Result;
use crate::atoms::{AtomRecord, Position};
use log::{debug, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A line the reader skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Parsed atom-sites file
#[derive(Debug, Clone, Default)]
pub struct AtomSites {
    pub records: Vec<AtomRecord>,
    pub malformed: Vec<MalformedLine>,
}

/// Coordinates are written with this many decimals
const COORDINATE_DECIMALS: usize = 12;

/// Map values just below 1 that would print as `1.000000000000` onto 0,
/// their periodic image, so written coordinates stay in [0, 1).
fn printable_coordinate(value: f64) -> f64 {
    let rounds_up = value > 0.999
        && value < 1.0
        && format!("{:.*}", COORDINATE_DECIMALS, value).starts_with('1');
    if rounds_up {
        0.0
    } else {
        value
    }
}

/// Write one fixed-width line per record
pub fn write_atom_sites<W: Write>(mut writer: W, records: &[AtomRecord]) -> Result<()> {
    for record in records {
        let [x, y, z] = record.position().to_array().map(printable_coordinate);
        writeln!(
            writer,
            "{:<8} {:<6} {:.*} {:.*} {:.*} {:<10.6}",
            record.symbol(),
            record.symbol(),
            COORDINATE_DECIMALS,
            x,
            COORDINATE_DECIMALS,
            y,
            COORDINATE_DECIMALS,
            z,
            record.charge()
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_line(line: &str) -> std::result::Result<AtomRecord, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(format!("expected at least 5 fields, found {}", parts.len()));
    }

    let mut coords = [0.0; 3];
    for (slot, token) in coords.iter_mut().zip(&parts[2..5]) {
        let value: f64 = token
            .parse()
            .map_err(|_| format!("non-numeric coordinate '{}'", token))?;
        if !value.is_finite() {
            return Err(format!("non-finite coordinate '{}'", token));
        }
        *slot = value;
    }

    let charge = parts
        .get(5)
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(AtomRecord::new(parts[0], Position::from_array(coords), charge))
}

/// Read atom-sites lines, skipping malformed ones.
///
/// Only I/O failures are errors; unparsable lines, including lines that are
/// not valid UTF-8, are collected in [`AtomSites::malformed`]. The atom type
/// is taken from the first column.
pub fn read_atom_sites<R: BufRead>(mut reader: R) -> Result<AtomSites> {
    let mut sites = AtomSites::default();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let parsed = match std::str::from_utf8(&buffer) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                parse_line(trimmed).map_err(|reason| (trimmed.to_string(), reason))
            }
            Err(e) => Err((
                String::from_utf8_lossy(&buffer).trim().to_string(),
                format!("invalid UTF-8: {}", e),
            )),
        };

        match parsed {
            Ok(record) => sites.records.push(record),
            Err((content, reason)) => {
                warn!("Skipping malformed line {}: {} ({})", line_number, content, reason);
                sites.malformed.push(MalformedLine {
                    line_number,
                    content,
                    reason,
                });
            }
        }
    }

    debug!(
        "Read {} atom sites ({} malformed lines)",
        sites.records.len(),
        sites.malformed.len()
    );
    Ok(sites)
}

/// Open and read an atom-sites file
pub fn load_atom_sites<P: AsRef<Path>>(path: P) -> Result<AtomSites> {
    let file = File::open(path.as_ref())?;
    read_atom_sites(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layout() {
        let mut buffer = Vec::new();
        let records = vec![AtomRecord::new(
            "Si",
            Position::new(0.94608, 0.1253, 0.03589),
            2.05,
        )];
        write_atom_sites(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "Si       Si     0.946080000000 0.125300000000 0.035890000000 2.050000  \n"
        );
    }

    #[test]
    fn test_negative_charge_layout() {
        let mut buffer = Vec::new();
        write_atom_sites(
            &mut buffer,
            &[AtomRecord::new("O", Position::new(0.5, 0.0, 0.25), -0.75)],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "O        O      0.500000000000 0.000000000000 0.250000000000 -0.750000 \n"
        );
    }

    #[test]
    fn test_skips_malformed_lines() {
        let input = "\
Si Si 0.1 0.2 0.3 1.5
# comment line
O O 0.1 abc 0.3 -0.75

O O 0.4 0.5 0.6
Al Al 0.1 0.2 NaN 1.75
";
        let sites = read_atom_sites(input.as_bytes()).unwrap();

        assert_eq!(sites.records.len(), 2);
        assert_eq!(sites.records[0].charge(), 1.5);
        // charge column absent
        assert_eq!(sites.records[1].charge(), 0.0);

        let lines: Vec<usize> = sites.malformed.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, vec![2, 3, 6]);
    }

    #[test]
    fn test_coordinate_rounding_to_one_wraps() {
        let mut buffer = Vec::new();
        write_atom_sites(
            &mut buffer,
            &[AtomRecord::new(
                "O",
                Position::new(0.9999999999999, 0.999999999999, 0.5),
                0.0,
            )],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("O        O      0.000000000000 0.999999999999 0.500000000000 "));
        assert!(!text.contains("1.000000000000"));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"Si Si 0.1 0.2 0.3 1.5\n# comment \xff\xfe\nO O 0.4 0.5 0.6 -0.75\n";
        let sites = read_atom_sites(input).unwrap();

        assert_eq!(sites.records.len(), 2);
        assert_eq!(sites.malformed.len(), 1);
        assert_eq!(sites.malformed[0].line_number, 2);
        assert!(sites.malformed[0].reason.starts_with("invalid UTF-8"));
    }
}
