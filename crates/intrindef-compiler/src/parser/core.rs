//! Parser state and low-level token operations.

use rowan::TextRange;

use super::ast::Ident;
use super::lexer::{Token, TokenKind, token_text};
use crate::diagnostics::{Location, ParseError, SourceMap};

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a pre-lexed token stream.
///
/// Trivia is skipped lazily whenever the current token is inspected.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) map: SourceMap,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, origin: &str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            map: SourceMap::new(origin, source),
            tokens,
            pos: 0,
        }
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind.is_trivia())
        {
            self.pos += 1;
        }
    }

    pub(super) fn peek(&mut self) -> Option<Token> {
        self.skip_trivia();
        self.tokens.get(self.pos).copied()
    }

    pub(super) fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// LL(k) lookahead past trivia.
    pub(super) fn nth_kind(&mut self, n: usize) -> Option<TokenKind> {
        self.skip_trivia();
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
    }

    pub(super) fn at(&mut self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(super) fn eof(&mut self) -> bool {
        self.peek().is_none()
    }

    pub(super) fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes the next raw token if it has `kind` and starts exactly where `prev` ends.
    pub(super) fn eat_adjacent(&mut self, prev: Token, kind: TokenKind) -> Option<Token> {
        let next = *self.tokens.get(self.pos)?;
        if next.kind != kind || next.span.start() != prev.span.end() {
            return None;
        }
        self.pos += 1;
        Some(next)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) { self.bump() } else { None }
    }

    /// Consumes a token of `kind` or fails with `expected '<kind>' for <context>`.
    pub(super) fn expect(&mut self, kind: TokenKind, context: &str) -> ParseResult<Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.expected(kind.describe(), context)),
        }
    }

    pub(super) fn expect_ident(&mut self, context: &str) -> ParseResult<Ident> {
        let token = self.expect(TokenKind::Ident, context)?;
        Ok(self.ident(token))
    }

    pub(super) fn expected(&mut self, what: &str, context: &str) -> ParseError {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Garbage => self.garbage(token),
            Some(token) => ParseError::new(
                self.location(token.span),
                format!(
                    "expected '{what}' for {context}, got '{}'",
                    self.text(&token)
                ),
            ),
            None => ParseError::new(
                self.map.end_location(),
                format!("expected '{what}' for {context}, got end of file"),
            ),
        }
    }

    pub(super) fn unexpected(&mut self) -> ParseError {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Garbage => self.garbage(token),
            Some(token) => ParseError::new(
                self.location(token.span),
                format!("unexpected '{}'", self.text(&token)),
            ),
            None => ParseError::new(self.map.end_location(), "unexpected end of file"),
        }
    }

    /// A run of characters the lexer did not recognise.
    fn garbage(&self, token: Token) -> ParseError {
        ParseError::new(
            self.location(token.span),
            format!("unexpected character '{}'", self.text(&token)),
        )
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub(super) fn ident(&self, token: Token) -> Ident {
        Ident {
            text: self.text(&token).to_owned(),
            span: token.span,
        }
    }

    pub(super) fn location(&self, span: TextRange) -> Location {
        self.map.location(span)
    }

    pub(super) fn into_source_map(self) -> SourceMap {
        self.map
    }
}
