//! Token definitions for the puddlejumper format
//!
//! Two layers of tokens live here:
//!
//! - [`RawToken`] is a context-free classification of characters produced by
//!   logos. It knows nothing about lines or indentation.
//! - [`Token`] is what the parser consumes: the structural tokens synthesized
//!   from indentation plus the literal tokens of each line.

use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::puddlejumper::ast::Position;

/// Character classes within a single line
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token("@")]
    At,

    #[token(":")]
    Colon,

    #[token("#")]
    Hash,

    #[regex(r"[A-Za-z0-9_]+")]
    Word,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    // Everything else, including non-ASCII text
    #[regex(r"[^@:#A-Za-z0-9_ \t\n]+")]
    Other,
}

/// Tokens consumed by the parser
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum Token {
    Indent,
    Dedent,
    Newline,
    /// A whitespace-only line; never affects indentation
    BlankLine,
    At,
    Colon,
    Hash,
    /// Name directly following `@`
    Identifier(String),
    /// The rest of a line, trailing whitespace trimmed
    Content(String),
    Eof,
}

impl Token {
    /// Tokens that carry document structure rather than text
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Token::Indent | Token::Dedent | Token::Newline | Token::BlankLine | Token::Eof
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Token::Indent => "INDENT",
            Token::Dedent => "DEDENT",
            Token::Newline => "NEWLINE",
            Token::BlankLine => "BLANK",
            Token::At => "AT",
            Token::Colon => "COLON",
            Token::Hash => "HASH",
            Token::Identifier(_) => "IDENTIFIER",
            Token::Content(_) => "CONTENT",
            Token::Eof => "EOF",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(text) | Token::Content(text) => {
                write!(f, "{}({:?})", self.name(), text)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// A token with its byte range and starting position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Range<usize>,
    pub start: Position,
}
