//! Intrinsic table format.
//!
//! This crate holds the data contract between the intrinsic compiler and the
//! consumers of its output:
//! - `lut` - deduplicating lookup tables used to pack repeated sequences
//! - `rows` - the row types and the finished [`IntrinsicTable`]
//! - `dump` - human-readable rendering of a table

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod dump;
pub mod lut;
pub mod rows;

#[cfg(test)]
mod dump_tests;

pub use dump::dump;
pub use lut::{CompactLut, Lut, LutKey};
pub use rows::{
    IntrinsicRow, IntrinsicTable, MatcherIndex, MatcherSlot, OverloadKind, OverloadRow,
    ParameterRow, StageUses, TemplateNumberRow, TemplateTypeRow,
};
