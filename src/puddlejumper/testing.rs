//! Fluent assertion API for parsed documents
//!
//! ```rust,ignore
//! let doc = parse_with_defaults("@x: foo\n  bar\n@x\n").unwrap();
//! assert_doc(&doc)
//!     .entry_count(2)
//!     .entry(0, |e| {
//!         e.assert_node()
//!             .binding("x")
//!             .content("foo")
//!             .child_count(1);
//!     })
//!     .entry(1, |e| {
//!         e.assert_node().reference("x").resolves_to("x");
//!     });
//! ```

use crate::puddlejumper::ast::{Block, Document, Entry, Node, NodeId};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(doc: &Document, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| match &doc[*id] {
            Entry::Node(node) => match &node.payload {
                Some(payload) => format!("Node({})", payload),
                None => "Node(<binding only>)".to_string(),
            },
            Entry::Block(_) => "Block".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level entries
    pub fn entry_count(self, expected: usize) -> Self {
        let actual = self.doc.roots().len();
        assert_eq!(
            actual,
            expected,
            "Expected {} entries, found {}: [{}]",
            expected,
            actual,
            summarize(self.doc, self.doc.roots())
        );
        self
    }

    /// Assert on a top-level entry by index
    pub fn entry<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(EntryAssertion<'a>),
    {
        let roots = self.doc.roots();
        assert!(
            index < roots.len(),
            "Entry index {} out of bounds (document has {} entries)",
            index,
            roots.len()
        );
        assertion(EntryAssertion {
            doc: self.doc,
            id: roots[index],
            context: format!("roots[{}]", index),
        });
        self
    }

    /// Assert the number of named bindings
    pub fn symbol_count(self, expected: usize) -> Self {
        let names: Vec<&str> = self.doc.symbols().names().collect();
        assert_eq!(
            names.len(),
            expected,
            "Expected {} bindings, found {:?}",
            expected,
            names
        );
        self
    }

    pub fn reference_count(self, expected: usize) -> Self {
        assert_eq!(self.doc.references().len(), expected, "reference count");
        self
    }
}

// ============================================================================
// Entry Assertions
// ============================================================================

pub struct EntryAssertion<'a> {
    doc: &'a Document,
    id: NodeId,
    context: String,
}

impl<'a> EntryAssertion<'a> {
    pub fn assert_node(self) -> NodeAssertion<'a> {
        let doc = self.doc;
        match &doc[self.id] {
            Entry::Node(node) => NodeAssertion {
                doc,
                id: self.id,
                node,
                context: self.context,
            },
            Entry::Block(block) => panic!(
                "{}: Expected Node, found Block with {} body nodes",
                self.context,
                block.body.len()
            ),
        }
    }

    pub fn assert_block(self) -> BlockAssertion<'a> {
        let doc = self.doc;
        match &doc[self.id] {
            Entry::Block(block) => BlockAssertion {
                doc,
                block,
                context: self.context,
            },
            Entry::Node(_) => panic!(
                "{}: Expected Block, found {}",
                self.context,
                summarize(doc, &[self.id])
            ),
        }
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    doc: &'a Document,
    id: NodeId,
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn content(self, expected: &str) -> Self {
        assert_eq!(
            self.node.content(),
            Some(expected),
            "{}: content mismatch (payload {:?})",
            self.context,
            self.node.payload
        );
        self
    }

    pub fn reference(self, expected: &str) -> Self {
        assert_eq!(
            self.node.reference(),
            Some(expected),
            "{}: reference mismatch (payload {:?})",
            self.context,
            self.node.payload
        );
        self
    }

    /// Assert the node's reference resolves to the entry bound to `name`
    pub fn resolves_to(self, name: &str) -> Self {
        let expected = self.doc.symbols().get(name);
        assert!(expected.is_some(), "{}: no binding named {}", self.context, name);
        assert_eq!(
            self.doc.target_of(self.id),
            expected,
            "{}: reference does not resolve to @{}",
            self.context,
            name
        );
        self
    }

    pub fn binding(self, expected: &str) -> Self {
        assert_eq!(
            self.node.binding_name(),
            Some(expected),
            "{}: binding mismatch ({:?})",
            self.context,
            self.node.binding
        );
        self
    }

    pub fn anonymous_binding(self) -> Self {
        assert!(
            self.node.binding.as_ref().is_some_and(|b| b.is_anonymous()),
            "{}: expected an anonymous binding, found {:?}",
            self.context,
            self.node.binding
        );
        self
    }

    pub fn no_binding(self) -> Self {
        assert!(
            self.node.binding.is_none(),
            "{}: expected no binding, found {:?}",
            self.context,
            self.node.binding
        );
        self
    }

    /// Assert the node has no payload of its own
    pub fn binding_only(self) -> Self {
        assert!(
            self.node.payload.is_none(),
            "{}: expected a binding-only node, found payload {:?}",
            self.context,
            self.node.payload
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.children.len(),
            expected,
            "{}: expected {} children, found [{}]",
            self.context,
            expected,
            summarize(self.doc, &self.node.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(EntryAssertion<'a>),
    {
        assert!(
            index < self.node.children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            self.node.children.len()
        );
        assertion(EntryAssertion {
            doc: self.doc,
            id: self.node.children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Block Assertions
// ============================================================================

pub struct BlockAssertion<'a> {
    doc: &'a Document,
    block: &'a Block,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn binding(self, expected: &str) -> Self {
        assert_eq!(
            self.block.binding_name(),
            Some(expected),
            "{}: block binding mismatch",
            self.context
        );
        self
    }

    pub fn no_binding(self) -> Self {
        assert!(
            self.block.binding.is_none(),
            "{}: expected no block binding",
            self.context
        );
        self
    }

    pub fn header<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let entry = EntryAssertion {
            doc: self.doc,
            id: self.block.header,
            context: format!("{}.header", self.context),
        };
        assertion(entry.assert_node());
        self
    }

    pub fn body_count(self, expected: usize) -> Self {
        assert_eq!(
            self.block.body.len(),
            expected,
            "{}: expected {} body nodes, found [{}]",
            self.context,
            expected,
            summarize(self.doc, &self.block.body)
        );
        self
    }

    pub fn body<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.block.body.len(),
            "{}: body index {} out of bounds",
            self.context,
            index
        );
        let entry = EntryAssertion {
            doc: self.doc,
            id: self.block.body[index],
            context: format!("{}.body[{}]", self.context, index),
        };
        assertion(entry.assert_node());
        self
    }
}
