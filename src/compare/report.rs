/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Human-readable comparison report

use super::comparator::ComparisonReport;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Number of sample differences shown in verbose mode
pub const SAMPLE_DIFFERENCES: usize = 5;

fn write_counts(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    total: usize,
    counts: &BTreeMap<String, usize>,
) -> fmt::Result {
    writeln!(f, "{}", label)?;
    writeln!(f, "Total atoms: {}", total)?;
    for (symbol, count) in counts {
        writeln!(f, "  {}: {}", symbol, count)?;
    }
    Ok(())
}

/// Text rendering of a [`ComparisonReport`], see [`ComparisonReport::text`]
#[derive(Debug, Clone, Copy)]
pub struct ReportText<'a> {
    report: &'a ComparisonReport,
    file1: &'a str,
    file2: &'a str,
    verbose: bool,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        write_counts(
            f,
            &format!("File 1: {}", self.file1),
            report.total_atoms_file1,
            &report.type_counts_file1,
        )?;
        writeln!(f)?;
        write_counts(
            f,
            &format!("File 2: {}", self.file2),
            report.total_atoms_file2,
            &report.type_counts_file2,
        )?;

        if report.malformed_lines_file1 + report.malformed_lines_file2 > 0 {
            writeln!(
                f,
                "\nSkipped malformed lines: {} in file 1, {} in file 2",
                report.malformed_lines_file1, report.malformed_lines_file2
            )?;
        }

        if !report.type_counts_match {
            writeln!(f, "\nWARNING: Atom type counts do not match between files!")?;
        }

        writeln!(f, "\nCoordinate histogram bin size: {}", report.bin_size)?;

        if report.differences.is_empty() {
            writeln!(f, "\nThe coordinate distributions are identical!")?;
        } else {
            writeln!(f, "\nDifferences found in coordinate distributions:")?;
            writeln!(f, "Atom Type | Coordinate Differences")?;
            writeln!(f, "{}", "-".repeat(40))?;
            for (symbol, delta) in &report.differences_by_type {
                writeln!(f, "{:8} | {}", symbol, delta)?;
            }

            if self.verbose {
                writeln!(f, "\nSample differences (up to {}):", SAMPLE_DIFFERENCES)?;
                for diff in report.differences.iter().take(SAMPLE_DIFFERENCES) {
                    let [x, y, z] = diff.position;
                    writeln!(
                        f,
                        "{} at ({:.4}, {:.4}, {:.4}): {} vs {}",
                        diff.symbol, x, y, z, diff.count_file1, diff.count_file2
                    )?;
                }
            }
        }

        writeln!(
            f,
            "\nOverall structural similarity: {:.2}%",
            report.overall_similarity_percent
        )?;
        writeln!(
            f,
            "Direct coordinate matches: {}/{} ({:.2}%)",
            report.direct_match_count, report.total_atoms_file1, report.direct_match_percent
        )
    }
}

impl ComparisonReport {
    /// Human-readable rendering.
    ///
    /// `file1` and `file2` are the labels printed for each input.
    pub fn text<'a>(&'a self, file1: &'a str, file2: &'a str, verbose: bool) -> ReportText<'a> {
        ReportText {
            report: self,
            file1,
            file2,
            verbose,
        }
    }

    /// Write the text rendering to `writer`
    pub fn write_text<W: Write>(
        &self,
        mut writer: W,
        file1: &str,
        file2: &str,
        verbose: bool,
    ) -> io::Result<()> {
        write!(writer, "{}", self.text(file1, file2, verbose))
    }

    /// Render the report into a string
    pub fn to_text(&self, file1: &str, file2: &str, verbose: bool) -> String {
        self.text(file1, file2, verbose).to_string()
    }
}
