/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Minimal CIF reader
//!
//! Reads the cell parameters, the `_atom_site_*` loop and the symmetry
//! operations of the first data block. Asymmetric-unit sites are expanded
//! with the symmetry operations and images closer than
//! [`CifReader::duplicate_tolerance`] are merged. Files whose only operation
//! is the identity keep their raw coordinates, so out-of-cell positions can
//! still be reported during conversion.

use super::errors::{IoError, Result};
use super::StructureReader;
use crate::atoms::{Position, SourceAtom, StructureSnapshot};
use crate::cell::LatticeParameters;
use crate::convert::wrap_coordinate;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FORMAT: &str = "CIF";

/// Affine symmetry operation acting on fractional coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
struct SymmetryOp {
    rotation: [[f64; 3]; 3],
    translation: [f64; 3],
}

impl SymmetryOp {
    fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0; 3],
        }
    }

    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Parse an operation such as `-x+1/2, y, z-0.25`
    fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 3 {
            return None;
        }
        let mut op = Self::identity();
        for (row, part) in parts.iter().enumerate() {
            let (coeffs, shift) = parse_component(part)?;
            op.rotation[row] = coeffs;
            op.translation[row] = shift;
        }
        Some(op)
    }

    fn apply(&self, p: &Position) -> Position {
        let v = p.to_array();
        let mut out = self.translation;
        for (row, slot) in out.iter_mut().enumerate() {
            *slot += (0..3).map(|k| self.rotation[row][k] * v[k]).sum::<f64>();
        }
        Position::from_array(out)
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    match text.split_once('/') {
        Some((num, den)) => {
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            Some(num.parse::<f64>().ok()? / den)
        }
        None => text.parse().ok(),
    }
}

/// One row of an operation: coefficients of x, y, z and a constant shift
fn parse_component(expr: &str) -> Option<([f64; 3], f64)> {
    let cleaned: String = expr
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let mut chars = cleaned.chars().peekable();
    let mut coeffs = [0.0; 3];
    let mut shift = 0.0;

    while chars.peek().is_some() {
        let mut sign = 1.0;
        while let Some(&c) = chars.peek() {
            match c {
                '+' => {}
                '-' => sign = -sign,
                _ => break,
            }
            chars.next();
        }

        let mut number = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() || c == '.' || c == '/' {
                number.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if chars.peek() == Some(&'*') {
            chars.next();
        }

        let magnitude = if number.is_empty() {
            1.0
        } else {
            parse_fraction(&number)?
        };

        match chars.peek() {
            Some(&axis @ ('x' | 'y' | 'z')) => {
                chars.next();
                coeffs[(axis as u8 - b'x') as usize] += sign * magnitude;
            }
            None | Some(&'+') | Some(&'-') if !number.is_empty() => shift += sign * magnitude,
            _ => return None,
        }
    }

    Some((coeffs, shift))
}

/// Split a CIF data line into tokens, keeping quoted strings together
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '\'' || c == '"' {
            chars.next();
            let token: String = chars.by_ref().take_while(|&ch| ch != c).collect();
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }
    tokens
}

/// Numeric CIF value with the standard uncertainty stripped: `11.919(2)`
fn parse_number(token: &str) -> Option<f64> {
    let value = token.split('(').next().unwrap_or(token);
    match value {
        "?" | "." | "" => None,
        v => v.parse().ok(),
    }
}

/// Element symbol from a type symbol or label: `Si4+` → `Si`, `O12` → `O`
fn element_symbol(token: &str) -> String {
    token.chars().take_while(|c| c.is_ascii_alphabetic()).collect()
}

#[derive(Debug, Default)]
struct Loop {
    headers: Vec<String>,
    values: Vec<String>,
    start_line: usize,
}

impl Loop {
    fn column(&self, names: &[&str]) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    }

    fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.values.chunks(self.headers.len().max(1))
    }
}

/// CIF implementation of [`StructureReader`]
#[derive(Debug, Clone)]
pub struct CifReader {
    /// Maximum per-axis fractional distance for two images to be merged
    pub duplicate_tolerance: f64,
}

impl Default for CifReader {
    fn default() -> Self {
        Self {
            duplicate_tolerance: 1e-3,
        }
    }
}

impl CifReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CIF text from any buffered reader
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<StructureSnapshot> {
        let mut cell: [Option<f64>; 6] = [None, None, None, Some(90.0), Some(90.0), Some(90.0)];
        let cell_tags = [
            "_cell_length_a",
            "_cell_length_b",
            "_cell_length_c",
            "_cell_angle_alpha",
            "_cell_angle_beta",
            "_cell_angle_gamma",
        ];

        let mut loops: Vec<Loop> = Vec::new();
        let mut current: Option<Loop> = None;
        let mut in_text_field = false;
        let mut seen_block = false;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let n = i + 1;

            if line.starts_with(';') {
                in_text_field = !in_text_field;
                continue;
            }
            if in_text_field {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.starts_with("data_") {
                if seen_block {
                    debug!("Ignoring additional data block at line {}", n);
                    break;
                }
                seen_block = true;
                continue;
            }

            if trimmed.starts_with("loop_") {
                loops.extend(current.take());
                current = Some(Loop {
                    start_line: n,
                    ..Loop::default()
                });
                continue;
            }

            if trimmed.starts_with('_') {
                let tokens = tokenize(trimmed);
                let is_header =
                    tokens.len() == 1 && matches!(&current, Some(lp) if lp.values.is_empty());
                if is_header {
                    if let Some(lp) = current.as_mut() {
                        lp.headers.push(tokens[0].clone());
                    }
                    continue;
                }
                loops.extend(current.take());

                if let Some(idx) = cell_tags.iter().position(|t| tokens[0].eq_ignore_ascii_case(t)) {
                    let value = tokens.get(1).and_then(|v| parse_number(v)).ok_or_else(|| {
                        IoError::parse(FORMAT, n, format!("missing value for {}", tokens[0]))
                    })?;
                    cell[idx] = Some(value);
                }
                continue;
            }

            if let Some(lp) = current.as_mut() {
                lp.values.extend(tokenize(trimmed));
            }
        }
        loops.extend(current.take());

        let mut params = [0.0; 6];
        for ((slot, value), tag) in params.iter_mut().zip(cell).zip(cell_tags) {
            *slot = value.ok_or_else(|| IoError::InvalidStructure(format!("missing {}", tag)))?;
        }
        let lattice =
            LatticeParameters::new(params[0], params[1], params[2], params[3], params[4], params[5]);

        let ops = symmetry_ops(&loops);
        let sites = asymmetric_sites(&loops)?;
        let atoms = self.expand(&sites, &ops);

        debug!(
            "CIF: {} sites, {} symmetry operations, {} atoms",
            sites.len(),
            ops.len(),
            atoms.len()
        );
        Ok(StructureSnapshot::new(lattice, atoms))
    }

    fn expand(&self, sites: &[SourceAtom], ops: &[SymmetryOp]) -> Vec<SourceAtom> {
        if ops.iter().all(SymmetryOp::is_identity) {
            return sites.to_vec();
        }

        let mut atoms: Vec<SourceAtom> = Vec::new();
        for site in sites {
            if !site.position.is_finite() {
                // Images of an unreadable site would wrap to 0; keep it as read
                warn!(
                    "Site {} has non-finite coordinates {}; not applying symmetry",
                    site.symbol, site.position
                );
                atoms.push(site.clone());
                continue;
            }
            for op in ops {
                let position = op.apply(&site.position).map(wrap_coordinate);
                let duplicate = atoms.iter().any(|existing| {
                    existing.symbol == site.symbol
                        && existing.position.periodic_max_distance(&position)
                            < self.duplicate_tolerance
                });
                if !duplicate {
                    atoms.push(SourceAtom {
                        symbol: site.symbol.clone(),
                        position,
                        charge: site.charge,
                    });
                }
            }
        }
        atoms
    }
}

fn symmetry_ops(loops: &[Loop]) -> Vec<SymmetryOp> {
    let mut ops = Vec::new();
    for lp in loops {
        let Some(col) = lp.column(&[
            "_symmetry_equiv_pos_as_xyz",
            "_space_group_symop_operation_xyz",
        ]) else {
            continue;
        };
        for row in lp.rows() {
            match row.get(col).and_then(|text| SymmetryOp::parse(text)) {
                Some(op) => ops.push(op),
                None => warn!("Skipping unreadable symmetry operation {:?}", row.get(col)),
            }
        }
    }
    if ops.is_empty() {
        ops.push(SymmetryOp::identity());
    }
    ops
}

fn asymmetric_sites(loops: &[Loop]) -> Result<Vec<SourceAtom>> {
    let lp = loops
        .iter()
        .find(|lp| lp.column(&["_atom_site_fract_x"]).is_some())
        .ok_or_else(|| IoError::InvalidStructure("no _atom_site_fract_x loop".to_string()))?;

    let width = lp.headers.len();
    if lp.values.len() % width != 0 {
        return Err(IoError::parse(
            FORMAT,
            lp.start_line,
            format!(
                "atom_site loop has {} values for {} columns",
                lp.values.len(),
                width
            ),
        ));
    }

    let symbol_col = lp
        .column(&["_atom_site_type_symbol"])
        .or_else(|| lp.column(&["_atom_site_label"]))
        .ok_or_else(|| IoError::InvalidStructure("atom_site loop has no symbol or label".to_string()))?;
    let axes = [
        lp.column(&["_atom_site_fract_x"]),
        lp.column(&["_atom_site_fract_y"]),
        lp.column(&["_atom_site_fract_z"]),
    ];
    let charge_col = lp.column(&["_atom_site_charge"]);

    let mut sites = Vec::new();
    for (index, row) in lp.rows().enumerate() {
        let mut coords = [0.0; 3];
        for (slot, col) in coords.iter_mut().zip(axes) {
            let col = col.ok_or_else(|| {
                IoError::InvalidStructure("atom_site loop lacks a fractional coordinate".to_string())
            })?;
            // unreadable coordinates become NaN and are reported during conversion
            *slot = parse_number(&row[col]).unwrap_or(f64::NAN);
        }

        let symbol = element_symbol(&row[symbol_col]);
        if symbol.is_empty() {
            return Err(IoError::parse(
                FORMAT,
                lp.start_line,
                format!("site {} has no element symbol ('{}')", index, row[symbol_col]),
            ));
        }

        sites.push(SourceAtom {
            symbol,
            position: Position::from_array(coords),
            charge: charge_col.and_then(|col| parse_number(&row[col])),
        });
    }
    Ok(sites)
}

impl StructureReader for CifReader {
    fn read_structure(&self, path: &Path) -> Result<StructureSnapshot> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const P1_CIF: &str = "\
data_LTA
_cell_length_a    11.9190(5)
_cell_length_b    11.9190
_cell_length_c    11.9190
_cell_angle_alpha 90.0
_cell_angle_beta  90.0
_cell_angle_gamma 90.0
_symmetry_space_group_name_H-M  'P 1'

loop_
_symmetry_equiv_pos_as_xyz
'x,y,z'

loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
_atom_site_charge
Si1 Si 0.0000 0.1843 0.3713 2.05
O1  O  0.0000 0.2265 0.5000 -1.025
O2  O  1.0500 0.2931 0.2931 -1.025
";

    #[test]
    fn test_parse_p1() {
        let structure = CifReader::new().parse(P1_CIF.as_bytes()).unwrap();

        assert_relative_eq!(structure.lattice().a, 11.919, epsilon = 1e-9);
        assert_eq!(structure.atom_count(), 3);
        assert!(structure.native_charges_complete());
        assert_eq!(structure.atoms()[0].symbol, "Si");
        assert_eq!(structure.atoms()[1].charge, Some(-1.025));
        // identity only: raw coordinates are kept
        assert_relative_eq!(structure.atoms()[2].position.x, 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry_expansion() {
        let cif = "\
data_test
_cell_length_a 5.0
_cell_length_b 5.0
_cell_length_c 5.0
loop_
_space_group_symop_operation_xyz
'x, y, z'
'-x, -y, -z'
'x+1/2, y+1/2, z+1/2'
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 0.1 0.2 0.3
O1 0.0 0.0 0.0
";
        let structure = CifReader::new().parse(cif.as_bytes()).unwrap();
        let composition = structure.composition();

        assert_eq!(composition.get("Si"), Some(&3));
        // -x maps the origin onto itself
        assert_eq!(composition.get("O"), Some(&2));
        assert!(!structure.has_native_charges());

        let image = &structure.atoms()[1].position;
        assert_relative_eq!(image.x, 0.9, epsilon = 1e-12);
        assert_relative_eq!(image.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_unreadable_site_is_not_expanded() {
        let cif = "\
data_test
_cell_length_a 5.0
_cell_length_b 5.0
_cell_length_c 5.0
loop_
_space_group_symop_operation_xyz
'x, y, z'
'-x, -y, -z'
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 0.1 0.2 0.3
O1 ? 0.2 0.3
";
        let structure = CifReader::new().parse(cif.as_bytes()).unwrap();
        let composition = structure.composition();

        assert_eq!(composition.get("Si"), Some(&2));
        assert_eq!(composition.get("O"), Some(&1));
        let oxygen = &structure.atoms()[2].position;
        assert!(oxygen.x.is_nan());
        assert_relative_eq!(oxygen.y, 0.2);
    }

    #[test]
    fn test_parse_component() {
        let (coeffs, shift) = parse_component("-x+1/2").unwrap();
        assert_eq!(coeffs, [-1.0, 0.0, 0.0]);
        assert_relative_eq!(shift, 0.5);

        let (coeffs, shift) = parse_component("0.25 + y - z").unwrap();
        assert_eq!(coeffs, [0.0, 1.0, -1.0]);
        assert_relative_eq!(shift, 0.25);

        assert!(parse_component("x+q").is_none());
    }

    #[test]
    fn test_missing_cell_length() {
        let cif = "data_x\n_cell_length_a 5.0\nloop_\n_atom_site_label\n_atom_site_fract_x\n_atom_site_fract_y\n_atom_site_fract_z\nSi 0 0 0\n";
        assert!(matches!(
            CifReader::new().parse(cif.as_bytes()),
            Err(IoError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(element_symbol("Si4+"), "Si");
        assert_eq!(element_symbol("O12"), "O");
        assert_eq!(parse_number("0.1843(4)"), Some(0.1843));
        assert_eq!(parse_number("?"), None);
        assert_eq!(tokenize("1 'x, y, z'"), vec!["1", "x, y, z"]);
    }
}
