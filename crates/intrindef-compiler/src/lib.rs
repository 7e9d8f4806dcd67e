//! Intrinsic declaration compiler.
//!
//! This crate provides the pipeline from a declaration file to the
//! intrinsic table:
//! - `parser` - lexer and AST construction
//! - `analyze` - name resolution and structural checks, producing `sem`
//! - `sem` - the resolved semantic model
//! - `permute` - expansion of templated overloads into concrete ones
//! - `emit` - the deduplicating table builder
//! - `session` - caller-owned cache for one generation run
//!
//! # Example
//!
//! ```
//! use intrindef_compiler::Session;
//!
//! let session = Session::new("type f32 @must_use fn f() -> f32", "example.def").unwrap();
//! let table = session.intrinsic_table().unwrap();
//! assert_eq!(table.builtins[0].name, "f");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod emit;
pub mod parser;
pub mod permute;
pub mod sem;
pub mod session;

#[cfg(test)]
mod session_tests;
#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{GenerationError, Location, ParseError, ResolveError};
pub use emit::build_intrinsic_table;
pub use permute::{Permutation, PermuteOptions, permute};
pub use sem::Sem;
pub use session::Session;

/// Errors that abort a generation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl Error {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Error::Parse(e) => Some(&e.location),
            Error::Resolve(e) => Some(&e.location),
            Error::Generation(e) => e.location.as_ref(),
        }
    }

    /// Render against the source the error came from.
    pub fn render(&self, source: &str, colored: bool) -> String {
        match self {
            Error::Parse(e) => e.render(source, colored),
            Error::Resolve(e) => e.render(source, colored),
            Error::Generation(e) => e.render(source, colored),
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse and resolve a declaration file.
pub fn resolve(source: &str, origin: &str) -> Result<Sem> {
    let ast = parser::parse(source, origin)?;
    Ok(analyze::resolve(&ast)?)
}
