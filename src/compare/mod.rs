/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Structure comparison
//!
//! Two atom lists are binned into coordinate histograms keyed by atom type
//! and rounded fractional position. The comparator reports bins whose counts
//! differ, an overall similarity percentage and the number of exact matches.

pub mod comparator;
pub mod errors;
pub mod histogram;
pub mod report;

pub use comparator::{compare, compare_files, ComparisonReport, HistogramDifference};
pub use errors::{CompareError, Result};
pub use histogram::{
    bin_index, build_histogram, BinIndex, CoordinateHistogram, HistogramKey, DEFAULT_BIN_SIZE,
};
pub use report::{ReportText, SAMPLE_DIFFERENCES};
