//! Lexer for the declaration language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//! Trivia (whitespace, newlines, `//` comments) is kept in the stream and skipped by the parser.
//!
//! ## Error handling
//!
//! Consecutive unrecognised characters are coalesced into a single `Garbage` token,
//! which the parser reports as an unexpected character when it reaches it.

use std::fmt;
use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    #[token("enum")]
    KwEnum,

    #[token("type")]
    KwType,

    #[token("match")]
    KwMatch,

    #[token("fn")]
    KwFn,

    #[token("op")]
    KwOp,

    #[token("ctor")]
    KwCtor,

    #[token("conv")]
    KwConv,

    /// Defined after keywords so they take precedence.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"-?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""[^"\n]*""#)]
    String,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    /// `<<` is lexed as two of these; the parser joins adjacent pairs.
    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("|")]
    Pipe,

    #[token("@")]
    At,

    #[token("->")]
    Arrow,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("^")]
    Caret,

    #[token("&")]
    Amp,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognised characters.
    Garbage,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::LineComment)
    }

    /// Symbols that can name an `op` declaration on their own.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Bang
                | Self::Tilde
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
                | Self::Caret
                | Self::Amp
                | Self::Pipe
                | Self::AmpAmp
                | Self::PipePipe
                | Self::EqEq
                | Self::BangEq
                | Self::Lt
                | Self::Gt
                | Self::LtEq
                | Self::GtEq
        )
    }

    /// How the token reads in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::KwEnum => "enum",
            Self::KwType => "type",
            Self::KwMatch => "match",
            Self::KwFn => "fn",
            Self::KwOp => "op",
            Self::KwCtor => "ctor",
            Self::KwConv => "conv",
            Self::Ident => "identifier",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::ParenOpen => "(",
            Self::ParenClose => ")",
            Self::BraceOpen => "{",
            Self::BraceClose => "}",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Pipe => "|",
            Self::At => "@",
            Self::Arrow => "->",
            Self::Bang => "!",
            Self::Tilde => "~",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Amp => "&",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::EqEq => "==",
            Self::BangEq => "!=",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "comment",
            Self::Garbage => "garbage",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
