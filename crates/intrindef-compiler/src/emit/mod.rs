//! Intrinsic table construction.
//!
//! Flattens the semantic model into the arrays of an
//! [`IntrinsicTable`](intrindef_table::IntrinsicTable):
//! - Matcher slots, with the template slots first
//! - Deduplicated runs of matcher indices, template rows, parameters and overloads
//! - Intrinsic rows grouped by family

mod matchers;
mod table_builder;

#[cfg(test)]
mod matchers_tests;

pub use matchers::Matchers;
pub use table_builder::{TableBuilder, build_intrinsic_table};
