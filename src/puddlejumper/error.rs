//! Error types for parsing
//!
//! Every error is terminal for the current parse: the parser returns either a
//! fully resolved document or exactly one of these.

use crate::puddlejumper::ast::Position;
use serde::Serialize;

/// The category of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Indentation,
    Syntax,
    DuplicateBinding,
    UnresolvedReference,
    CyclicReference,
}

/// Errors that can occur while parsing a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A line dedents to a width that was never pushed, or the first line is indented
    #[error("{position}: indentation error: {message}")]
    Indentation { message: String, position: Position },

    /// The token sequence matches no grammar alternative
    #[error("{position}: syntax error: {message}")]
    Syntax { message: String, position: Position },

    /// Two definitions claim the same binding name
    #[error("{position}: duplicate binding `@{name}` (first defined at {first})")]
    DuplicateBinding {
        name: String,
        position: Position,
        first: Position,
    },

    /// A reference names a binding that does not exist
    #[error("{position}: unresolved reference `@{name}`")]
    UnresolvedReference { name: String, position: Position },

    /// A reference resolves to the node containing it
    #[error("{position}: reference `@{name}` resolves to an enclosing node")]
    CyclicReference { name: String, position: Position },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Indentation { .. } => ErrorKind::Indentation,
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::DuplicateBinding { .. } => ErrorKind::DuplicateBinding,
            ParseError::UnresolvedReference { .. } => ErrorKind::UnresolvedReference,
            ParseError::CyclicReference { .. } => ErrorKind::CyclicReference,
        }
    }

    /// Where the error was detected (1-based line and column)
    pub fn position(&self) -> Position {
        match self {
            ParseError::Indentation { position, .. }
            | ParseError::Syntax { position, .. }
            | ParseError::DuplicateBinding { position, .. }
            | ParseError::UnresolvedReference { position, .. }
            | ParseError::CyclicReference { position, .. } => *position,
        }
    }

    /// The binding name involved, for the resolution errors
    pub fn name(&self) -> Option<&str> {
        match self {
            ParseError::DuplicateBinding { name, .. }
            | ParseError::UnresolvedReference { name, .. }
            | ParseError::CyclicReference { name, .. } => Some(name),
            ParseError::Indentation { .. } | ParseError::Syntax { .. } => None,
        }
    }
}
