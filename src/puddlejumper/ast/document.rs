//! The document arena, its symbol table and resolved reference edges

use super::cursor::PreOrder;
use super::node::{Entry, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Index;

/// Names published by bindings.
///
/// Holds ids into the document that owns it; never mutated once the
/// document has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    named: BTreeMap<String, NodeId>,
    anonymous: Vec<NodeId>,
}

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.named.get(name).copied()
    }

    /// Number of named bindings
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Binding names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.named.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Entries carrying an anonymous `@:` binding, in document order
    pub fn anonymous(&self) -> &[NodeId] {
        &self.anonymous
    }

    /// Register a name. Returns the previous owner if the name was taken.
    pub(crate) fn define(&mut self, name: &str, id: NodeId) -> Option<NodeId> {
        if let Some(existing) = self.named.get(name) {
            return Some(*existing);
        }
        self.named.insert(name.to_string(), id);
        None
    }

    pub(crate) fn define_anonymous(&mut self, id: NodeId) {
        self.anonymous.push(id);
    }
}

/// A resolved `@name` reference: `from` is the node whose payload is the
/// reference, `to` the bound entry it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub name: String,
}

/// A parsed and resolved puddlejumper document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
    #[serde(skip)]
    parents: Vec<Option<NodeId>>,
    symbols: SymbolTable,
    references: Vec<ReferenceEdge>,
    /// Reference node -> target, for `target_of`
    #[serde(skip)]
    targets: BTreeMap<NodeId, NodeId>,
}

impl Document {
    /// Assemble a document from an arena whose children lists are already
    /// linked. Symbols and references start empty until resolution.
    pub(crate) fn from_entries(entries: Vec<Entry>, roots: Vec<NodeId>) -> Self {
        let mut parents = vec![None; entries.len()];
        for (index, entry) in entries.iter().enumerate() {
            for child in entry.child_ids() {
                parents[child.0] = Some(NodeId(index));
            }
        }
        Self {
            entries,
            roots,
            parents,
            symbols: SymbolTable::default(),
            references: Vec::new(),
            targets: BTreeMap::new(),
        }
    }

    pub(crate) fn set_resolution(&mut self, symbols: SymbolTable, references: Vec<ReferenceEdge>) {
        self.targets = references.iter().map(|edge| (edge.from, edge.to)).collect();
        self.symbols = symbols;
        self.references = references;
    }

    /// Top-level entries in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries (nodes and blocks) in the arena
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// Containment ancestors from the direct parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Pre-order walk of every entry with its depth (roots at depth 0)
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Resolved references in document order
    pub fn references(&self) -> &[ReferenceEdge] {
        &self.references
    }

    /// The entry a reference node resolves to
    pub fn target_of(&self, reference: NodeId) -> Option<NodeId> {
        self.targets.get(&reference).copied()
    }

    /// The entry bound to `name`
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.symbols.get(name).and_then(|id| self.get(id))
    }

    /// Incoming reference edges for an entry
    pub fn referrers(&self, target: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.references
            .iter()
            .filter(move |edge| edge.to == target)
            .map(|edge| edge.from)
    }

    /// Compare content and structure, ignoring source spans
    pub fn same_structure(&self, other: &Document) -> bool {
        if self.roots.len() != other.roots.len() {
            return false;
        }
        let mut pending: Vec<(NodeId, NodeId)> =
            self.roots.iter().copied().zip(other.roots.iter().copied()).collect();
        while let Some((id, other_id)) = pending.pop() {
            let (Some(left), Some(right)) = (self.get(id), other.get(other_id)) else {
                return false;
            };
            if !Self::same_shallow(left, right) {
                return false;
            }
            let left_children: Vec<NodeId> = left.child_ids().collect();
            let right_children: Vec<NodeId> = right.child_ids().collect();
            if left_children.len() != right_children.len() {
                return false;
            }
            pending.extend(left_children.into_iter().zip(right_children));
        }
        true
    }

    /// Same kind, binding name and payload
    fn same_shallow(left: &Entry, right: &Entry) -> bool {
        let names = |entry: &Entry| entry.binding().map(|b| b.name.clone());
        if names(left) != names(right) {
            return false;
        }
        match (left, right) {
            (Entry::Node(a), Entry::Node(b)) => a.payload == b.payload,
            (Entry::Block(_), Entry::Block(_)) => true,
            _ => false,
        }
    }
}

impl Index<NodeId> for Document {
    type Output = Entry;

    fn index(&self, id: NodeId) -> &Entry {
        &self.entries[id.0]
    }
}
