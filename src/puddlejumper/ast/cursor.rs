//! Pre-order traversal over a document

use super::document::Document;
use super::node::{Entry, NodeId};

/// A visited entry and its nesting depth
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub entry: &'a Entry,
    pub depth: usize,
}

/// Depth-first, document-order iterator. Block headers come before the
/// block body, at one level below the block.
pub struct PreOrder<'a> {
    doc: &'a Document,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        let stack = doc.roots().iter().rev().map(|id| (*id, 0)).collect();
        Self { doc, stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let entry = self.doc.get(id)?;
        let children: Vec<NodeId> = entry.child_ids().collect();
        self.stack
            .extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        Some(Visit { id, entry, depth })
    }
}
