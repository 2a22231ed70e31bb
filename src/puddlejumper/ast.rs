//! AST definitions and utilities for the puddlejumper format
//!
//! The document model is an arena: every [`Node`] and [`Block`] lives in one
//! vector owned by the [`Document`] and is addressed by a [`NodeId`]. The
//! containment tree is expressed through those ids, and reference resolution
//! is a separate overlay of [`ReferenceEdge`]s, so a node always has exactly
//! one owner no matter how many references name it.
//!
//! ## Modules
//!
//! - `span` - Position and Span types for source code locations
//! - `position` - Byte offset to line/column conversion
//! - `node` - Entry, Node, Block, Binding and Payload definitions
//! - `document` - The Document arena, SymbolTable and reference edges
//! - `cursor` - Pre-order traversal

pub mod cursor;
pub mod document;
pub mod node;
pub mod position;
pub mod span;

pub use cursor::{PreOrder, Visit};
pub use document::{Document, ReferenceEdge, SymbolTable};
pub use node::{Binding, Block, Entry, Node, NodeId, Payload};
pub use position::SourceLocation;
pub use span::{Position, Span};
