/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Structure → canonical zeoran tables

pub mod builder;
pub mod errors;
pub mod options;
pub mod table;
pub mod warnings;

pub use builder::{build, convert_file, wrap_coordinate, Conversion, COORDINATE_TOLERANCE_BAND};
pub use errors::{ConvertError, Result};
pub use options::{BuildOptions, DEFAULT_T_ATOM};
pub use table::{SymbolCharge, UnitCellTable};
pub use warnings::ConversionWarning;
