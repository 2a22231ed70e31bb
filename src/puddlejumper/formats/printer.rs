//! Pretty printer producing puddlejumper source
//!
//! Every level is indented by the same unit. A bound node prints as
//! `@name: payload`, a binding-only node as `@name:` followed by its children.
//! A block prints its binding on a line of its own, then `# ` and the header
//! node, then its body at the header's level.

use crate::puddlejumper::ast::{Binding, Document, Entry, Node, NodeId};

#[derive(Debug, Clone)]
pub struct PrettyPrinter {
    indent: String,
}

impl PrettyPrinter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width.max(1)),
        }
    }

    pub fn print(&self, doc: &Document) -> String {
        let mut out = String::new();
        for root in doc.roots() {
            self.print_entry(doc, *root, 0, &mut out);
        }
        out
    }

    /// Append the subtree rooted at `id`, starting at nesting `level`
    pub fn print_entry(&self, doc: &Document, id: NodeId, level: usize, out: &mut String) {
        let mut pending = vec![Line::Entry(id, level)];
        while let Some(line) = pending.pop() {
            let (id, level, marker) = match line {
                Line::Entry(id, level) => (id, level, ""),
                Line::Header(id, level) => (id, level, "# "),
            };
            match doc.get(id) {
                Some(Entry::Node(node)) => {
                    self.push_indent(level, out);
                    out.push_str(marker);
                    push_node_line(node, out);
                    pending.extend(node.children.iter().rev().map(|c| Line::Entry(*c, level + 1)));
                }
                Some(Entry::Block(block)) => {
                    if let Some(binding) = &block.binding {
                        self.push_indent(level, out);
                        push_binding(binding, out);
                        out.push('\n');
                    }
                    pending.extend(block.body.iter().rev().map(|c| Line::Entry(*c, level)));
                    pending.push(Line::Header(block.header, level));
                }
                None => {}
            }
        }
    }

    fn push_indent(&self, level: usize, out: &mut String) {
        for _ in 0..level {
            out.push_str(&self.indent);
        }
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new(4)
    }
}

/// An entry still to print, with its nesting level
enum Line {
    Entry(NodeId, usize),
    Header(NodeId, usize),
}

/// `@name: payload` without indentation or children
fn push_node_line(node: &Node, out: &mut String) {
    if let Some(binding) = &node.binding {
        push_binding(binding, out);
        if node.payload.is_some() {
            out.push(' ');
        }
    }
    if let Some(payload) = &node.payload {
        out.push_str(&payload.to_string());
    }
    out.push('\n');
}

fn push_binding(binding: &Binding, out: &mut String) {
    out.push('@');
    if let Some(name) = &binding.name {
        out.push_str(name);
    }
    out.push(':');
}

/// Print a document with `indent_width` spaces per level
pub fn to_pretty_str(doc: &Document, indent_width: usize) -> String {
    PrettyPrinter::new(indent_width).print(doc)
}
