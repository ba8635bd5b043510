/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atom and structure data model
//!
//! Source atoms come from a structure reader and may carry raw coordinates
//! and optional charges; [`AtomRecord`] is the canonical, resolved form.

pub mod atom;
pub mod structure;
pub mod vector;

pub use atom::{AtomRecord, SourceAtom};
pub use structure::StructureSnapshot;
pub use vector::Position;
