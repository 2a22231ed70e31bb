//! # puddlejumper
//!
//! A parser for the puddlejumper outline format: lines of content nested by
//! indentation, optional `@name:` bindings, `@name` references and `#` headed
//! blocks.
//!
//! The pipeline is text -> [`lexer`](puddlejumper::lexer) -> [`parser`](puddlejumper::parser)
//! -> [`resolver`](puddlejumper::resolver) -> [`Document`].
//!
//! ## Testing
//!
//! Document assertions for tests live in the [testing module](puddlejumper::testing).

pub mod puddlejumper;

pub use puddlejumper::ast::{
    Binding, Block, Document, Entry, Node, NodeId, Payload, Position, ReferenceEdge, Span,
    SymbolTable,
};
pub use puddlejumper::config::ParserConfig;
pub use puddlejumper::error::{ErrorKind, ParseError};
pub use puddlejumper::{parse, parse_with_defaults};
