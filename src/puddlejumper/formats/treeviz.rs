//! Treeviz formatter for documents
//!
//! One line per entry, nesting drawn with box connectors:
//!
//! ```text
//! ├─ Node @x: foo
//! │ └─ Node: bar
//! ├─ Ref: @x -> 1:1
//! └─ Block @s:
//!   ├─ Header: Section
//!   └─ Node: body
//! ```
//!
//! Payload text is truncated to 30 characters. References show the position
//! of the entry they resolve to.

use crate::puddlejumper::ast::{Binding, Document, Entry, Node, NodeId, Payload};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn binding_label(binding: Option<&Binding>) -> String {
    match binding {
        Some(Binding { name: Some(name), .. }) => format!(" @{}:", name),
        Some(Binding { name: None, .. }) => " @:".to_string(),
        None => String::new(),
    }
}

fn node_label(doc: &Document, id: NodeId, node: &Node, kind: &str) -> String {
    let kind = match (&node.payload, kind) {
        (Some(Payload::Reference(_)), "Node") => "Ref",
        _ => kind,
    };
    let binding = binding_label(node.binding.as_ref());
    // A bare kind gets its own colon; a binding already ends with one
    let separator = if binding.is_empty() { ":" } else { "" };
    match &node.payload {
        Some(Payload::Content(text)) => {
            format!("{}{}{} {}", kind, binding, separator, truncate(text, MAX_LABEL_CHARS))
        }
        Some(Payload::Reference(name)) => {
            let target = doc
                .target_of(id)
                .and_then(|target| doc.get(target))
                .map(|entry| entry.span().start.to_string())
                .unwrap_or_else(|| "?".to_string());
            format!("{}{}{} @{} -> {}", kind, binding, separator, name, target)
        }
        None => format!("{}{}", kind, binding),
    }
}

/// A line still to draw: entry, label kind, prefix and whether it closes its group
struct Pending {
    id: NodeId,
    kind: &'static str,
    prefix: String,
    is_last: bool,
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut result = String::new();
    let mut stack = Vec::new();
    push_children(&mut stack, doc.roots(), "");

    while let Some(Pending {
        id,
        kind,
        prefix,
        is_last,
    }) = stack.pop()
    {
        let connector = if is_last { "└─" } else { "├─" };
        let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });

        match doc.get(id) {
            Some(Entry::Node(node)) => {
                let label = node_label(doc, id, node, kind);
                result.push_str(&format!("{}{} {}\n", prefix, connector, label));
                push_children(&mut stack, &node.children, &new_prefix);
            }
            Some(Entry::Block(block)) => {
                let binding = binding_label(block.binding.as_ref());
                result.push_str(&format!("{}{} Block{}\n", prefix, connector, binding));
                push_children(&mut stack, &block.body, &new_prefix);
                stack.push(Pending {
                    id: block.header,
                    kind: "Header",
                    prefix: new_prefix,
                    is_last: block.body.is_empty(),
                });
            }
            None => {}
        }
    }
    result
}

/// Queue `children` so the first is drawn next
fn push_children(stack: &mut Vec<Pending>, children: &[NodeId], prefix: &str) {
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate().rev() {
        stack.push(Pending {
            id: *child,
            kind: "Node",
            prefix: prefix.to_string(),
            is_last: i == last,
        });
    }
}
