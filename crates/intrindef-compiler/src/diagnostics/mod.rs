//! Source positions and fatal errors.
//!
//! Every stage stops at its first error. Errors carry a [`Location`] that
//! prints as `origin:line:column` and can be rendered against the source
//! with [`annotate_snippets`].

mod error;
mod printer;


use std::fmt;
use std::sync::Arc;

use rowan::{TextRange, TextSize};

pub use error::{GenerationError, ParseError, ResolveError};

/// A resolved source position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub origin: Arc<str>,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
    /// Byte range in the source.
    pub range: TextRange,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.origin, self.line, self.column)
    }
}

/// One declaration source with a line index for offset-to-position lookups.
#[derive(Clone, Debug)]
pub struct SourceMap {
    origin: Arc<str>,
    text: Arc<str>,
    line_starts: Vec<TextSize>,
}

impl SourceMap {
    pub fn new(origin: &str, text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(i, _)| TextSize::from(i as u32 + 1)),
        );
        Self {
            origin: origin.into(),
            text: text.into(),
            line_starts,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Location of the start of `range`.
    pub fn location(&self, range: TextRange) -> Location {
        let offset = range.start();
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start: usize = self.line_starts[line].into();
        let offset: usize = offset.into();
        let column = self
            .text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());

        Location {
            origin: self.origin.clone(),
            line: line as u32 + 1,
            column: column as u32 + 1,
            range,
        }
    }

    /// Location just past the last character, used for end-of-input errors.
    pub fn end_location(&self) -> Location {
        let end = TextSize::from(self.text.len() as u32);
        self.location(TextRange::empty(end))
    }
}
