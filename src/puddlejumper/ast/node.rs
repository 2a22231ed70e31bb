//! Entry types stored in the document arena

use super::span::Span;
use serde::Serialize;
use std::fmt;

/// Index of an [`Entry`] in its [`Document`](super::Document).
///
/// Ids are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A `@name:` or anonymous `@:` marker attached to a node or block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// `None` for an anonymous binding
    pub name: Option<String>,
    pub span: Span,
}

impl Binding {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }
}

/// What a node says on its own line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Payload {
    Content(String),
    /// Name of the referenced binding, without the leading `@`
    Reference(String),
}

impl Payload {
    pub fn as_content(&self) -> Option<&str> {
        match self {
            Payload::Content(text) => Some(text),
            Payload::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Payload::Reference(name) => Some(name),
            Payload::Content(_) => None,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Content(text) => f.write_str(text),
            Payload::Reference(name) => write!(f, "@{}", name),
        }
    }
}

/// One line of the outline plus its indented children.
///
/// `payload` is `None` only for a binding-only node (`@name:` followed directly
/// by an indented block); such a node always has a binding and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub binding: Option<Binding>,
    pub payload: Option<Payload>,
    pub children: Vec<NodeId>,
    pub span: Span,
}

impl Node {
    pub fn content(&self) -> Option<&str> {
        self.payload.as_ref().and_then(Payload::as_content)
    }

    pub fn reference(&self) -> Option<&str> {
        self.payload.as_ref().and_then(Payload::as_reference)
    }

    pub fn binding_name(&self) -> Option<&str> {
        self.binding.as_ref().and_then(|b| b.name.as_deref())
    }
}

/// A `#`-headed section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Binding written on the line before the `#`
    pub binding: Option<Binding>,
    pub header: NodeId,
    pub body: Vec<NodeId>,
    pub span: Span,
}

impl Block {
    pub fn binding_name(&self) -> Option<&str> {
        self.binding.as_ref().and_then(|b| b.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Node(Node),
    Block(Block),
}

impl Entry {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entry::Node(node) => Some(node),
            Entry::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Entry::Block(block) => Some(block),
            Entry::Node(_) => None,
        }
    }

    pub fn binding(&self) -> Option<&Binding> {
        match self {
            Entry::Node(node) => node.binding.as_ref(),
            Entry::Block(block) => block.binding.as_ref(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Entry::Node(node) => node.span,
            Entry::Block(block) => block.span,
        }
    }

    /// Direct containment children: a node's children, or a block's header
    /// followed by its body.
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (header, rest) = match self {
            Entry::Node(node) => (None, node.children.as_slice()),
            Entry::Block(block) => (Some(block.header), block.body.as_slice()),
        };
        header.into_iter().chain(rest.iter().copied())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Entry::Node(_) => "Node",
            Entry::Block(_) => "Block",
        }
    }
}
