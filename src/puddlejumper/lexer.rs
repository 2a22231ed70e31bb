//! Indentation lexer for the puddlejumper format
//!
//! The lexer walks the source one line at a time. For every non-blank line it
//! compares the leading whitespace width with the open indentation levels and
//! emits INDENT or DEDENT tokens, then the literal tokens of the line, then a
//! NEWLINE. Whitespace-only lines produce a single BLANK token and never touch
//! the indentation stack. End of input closes every open level and emits EOF.
//!
//! Within a line, `@`, `:` and `#` are only structural at token positions: the
//! start of the line, after `#`, and after a `@name:` binding. Anything else
//! starts a CONTENT token that runs to the end of the line, so `a: b @c` is
//! plain text.

pub mod indentation;
pub mod tokens;

use std::collections::VecDeque;
use std::ops::Range;

use logos::Logos;

pub use indentation::{IndentChange, IndentState};
pub use tokens::{RawToken, SpannedToken, Token};

use crate::puddlejumper::ast::SourceLocation;
use crate::puddlejumper::config::ParserConfig;
use crate::puddlejumper::error::ParseError;

/// Lazy token stream over one document.
///
/// Yields `Err` at most once; the iterator is exhausted after an error.
pub struct Lexer<'a> {
    source: &'a str,
    location: SourceLocation<'a>,
    tab_width: usize,
    indents: IndentState,
    pending: VecDeque<SpannedToken>,
    cursor: usize,
    seen_line: bool,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: &ParserConfig) -> Self {
        Self {
            source,
            location: SourceLocation::new(source),
            tab_width: config.tab_width,
            indents: IndentState::new(),
            pending: VecDeque::new(),
            cursor: 0,
            seen_line: false,
            done: false,
        }
    }

    fn push(&mut self, token: Token, span: Range<usize>) {
        let start = self.location.byte_to_position(span.start);
        self.pending.push_back(SpannedToken { token, span, start });
    }

    fn indentation_error(&self, offset: usize, message: String) -> ParseError {
        ParseError::Indentation {
            message,
            position: self.location.byte_to_position(offset),
        }
    }

    /// Queue the tokens for the next line, or the closing tokens at end of input
    fn advance(&mut self) -> Result<(), ParseError> {
        let len = self.source.len();
        if self.cursor >= len {
            let closed = self.indents.close();
            for _ in 0..closed {
                self.push(Token::Dedent, len..len);
            }
            self.push(Token::Eof, len..len);
            self.done = true;
            return Ok(());
        }

        let source = self.source;
        let line_start = self.cursor;
        let rest = &source[line_start..];
        let (line_end, next) = match rest.find('\n') {
            Some(i) => (line_start + i, line_start + i + 1),
            None => (len, len),
        };
        self.cursor = next;
        let line = &source[line_start..line_end];

        if line.trim().is_empty() {
            self.push(Token::BlankLine, line_start..line_end);
            return Ok(());
        }

        let (width, indent_bytes) = indentation::measure(line, self.tab_width);
        let content_start = line_start + indent_bytes;

        if !self.seen_line && width > 0 {
            return Err(self.indentation_error(
                content_start,
                "the first line must not be indented".to_string(),
            ));
        }
        self.seen_line = true;

        match self.indents.apply(width) {
            Ok(IndentChange::Same) => {}
            Ok(IndentChange::Indent) => {
                tracing::trace!(width, depth = self.indents.depth(), "indent");
                self.push(Token::Indent, line_start..content_start);
            }
            Ok(IndentChange::Dedent(closed)) => {
                tracing::trace!(width, closed, "dedent");
                for _ in 0..closed {
                    self.push(Token::Dedent, content_start..content_start);
                }
            }
            Err(misaligned) => {
                return Err(self.indentation_error(
                    content_start,
                    format!(
                        "dedent to width {} does not match any enclosing level (nearest is {})",
                        misaligned.width, misaligned.nearest
                    ),
                ));
            }
        }

        self.scan_line(content_start, line_end);

        let newline = if line_end < len {
            line_end..line_end + 1
        } else {
            len..len
        };
        self.push(Token::Newline, newline);
        Ok(())
    }

    /// Literal tokens of one line, from the first non-blank character
    fn scan_line(&mut self, start: usize, end: usize) {
        let source = self.source;
        let text = &source[start..end];
        let mut raw = RawToken::lexer(text).spanned().peekable();

        while let Some((result, span)) = raw.next() {
            let range = start + span.start..start + span.end;
            match result {
                Ok(RawToken::Whitespace) => {}
                Ok(RawToken::Hash) => self.push(Token::Hash, range),
                Ok(RawToken::Colon) => self.push(Token::Colon, range),
                Ok(RawToken::At) => {
                    self.push(Token::At, range);
                    if let Some((Ok(RawToken::Word), word)) = raw.peek().cloned() {
                        raw.next();
                        let word_range = start + word.start..start + word.end;
                        self.push(
                            Token::Identifier(text[word.clone()].to_string()),
                            word_range,
                        );
                    }
                    // A reference ends the token positions of this line
                    if !matches!(raw.peek(), Some((Ok(RawToken::Colon), _))) {
                        self.scan_trailing(&mut raw, start, text);
                        return;
                    }
                }
                Ok(_) | Err(_) => {
                    self.push_content(start + span.start, end);
                    return;
                }
            }
        }
    }

    /// Whatever follows a reference is a single content run
    fn scan_trailing<I>(&mut self, raw: &mut std::iter::Peekable<I>, start: usize, text: &str)
    where
        I: Iterator<Item = (Result<RawToken, ()>, logos::Span)>,
    {
        for (result, span) in raw.by_ref() {
            if result != Ok(RawToken::Whitespace) {
                self.push_content(start + span.start, start + text.len());
                return;
            }
        }
    }

    fn push_content(&mut self, from: usize, to: usize) {
        let source = self.source;
        let text = source[from..to].trim_end();
        let range = from..from + text.len();
        self.push(Token::Content(text.to_string()), range);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<SpannedToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.advance() {
                self.done = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for Lexer<'a> {}

/// Tokenize a whole document.
///
/// Fails with the first indentation error, before any grammar is applied.
pub fn lex(source: &str, config: &ParserConfig) -> Result<Vec<SpannedToken>, ParseError> {
    let tokens = Lexer::new(source, config).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = tokens.len(), "lexed tokens");
    Ok(tokens)
}

/// Convenience function returning only the token kinds
pub fn tokenize(source: &str, config: &ParserConfig) -> Result<Vec<Token>, ParseError> {
    Ok(lex(source, config)?
        .into_iter()
        .map(|spanned| spanned.token)
        .collect())
}
