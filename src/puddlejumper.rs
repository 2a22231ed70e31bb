//! Main module for puddlejumper library functionality
//!
//! Parsing runs in four stages, each owning its own state for exactly one document:
//!
//! 1. [`lexer`]: off-side rule tokenization (INDENT / DEDENT / NEWLINE synthesis)
//! 2. [`parser`]: chumsky grammar over the token stream, producing an intermediate tree
//! 3. [`building`]: flattening the intermediate tree into the [`ast::Document`] arena
//! 4. [`resolver`]: binding registration and reference resolution
//!
//! Nothing is shared between documents, so independent documents can be parsed
//! on as many threads as the host likes.

pub mod ast;
pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod resolver;
pub mod testing;

use ast::Document;
use config::ParserConfig;
use error::ParseError;

/// Parse a puddlejumper document.
///
/// Returns a fully resolved [`Document`] or the first error encountered.
pub fn parse(source: &str, config: &ParserConfig) -> Result<Document, ParseError> {
    let tokens = lexer::lex(source, config)?;
    let tree = parser::parse_tokens(tokens)?;
    let mut document = building::build_document(source, tree);
    resolver::resolve(&mut document)?;
    tracing::debug!(
        entries = document.len(),
        bindings = document.symbols().len(),
        references = document.references().len(),
        "parsed document"
    );
    Ok(document)
}

/// Parse with the default configuration (tab width 8).
pub fn parse_with_defaults(source: &str) -> Result<Document, ParseError> {
    parse(source, &ParserConfig::default())
}
