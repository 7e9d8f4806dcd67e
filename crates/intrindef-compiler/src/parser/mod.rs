//! Parser infrastructure for the declaration language.
//!
//! # Architecture
//!
//! - [`lexer`]: logos-based tokenizer, trivia kept in the stream
//! - [`core`]: token cursor and error construction
//! - [`grammar`]: recursive-descent productions
//! - [`ast`]: owned tree with canonical `Display`
//!
//! There is no error recovery: [`parse`] returns the first error it meets.

pub mod ast;
mod core;
mod grammar;
pub mod lexer;


pub use ast::Ast;
pub use lexer::{Token, TokenKind, lex, token_text};

use crate::diagnostics::ParseError;

/// Parse a declaration file. `origin` labels positions in errors.
pub fn parse(source: &str, origin: &str) -> Result<Ast, ParseError> {
    let tokens = lex(source);
    let ast = core::Parser::new(source, origin, tokens).parse_file()?;
    tracing::debug!(
        origin,
        enums = ast.enums.len(),
        types = ast.types.len(),
        matchers = ast.matchers.len(),
        intrinsics = ast.intrinsics().count(),
        "parsed declarations"
    );
    Ok(ast)
}
