//! Prioritized list view
//!
//! A child whose content is exactly `P0` through `P4` is a priority marker.
//! When the marker has children of its own, each of those children gets the
//! priority; otherwise the entry containing the marker does. Markers inside
//! block bodies mark the block.

use crate::puddlejumper::ast::{Document, Entry, NodeId};
use crate::puddlejumper::formats::printer::PrettyPrinter;

pub const PRIORITY_LEVELS: usize = 5;

fn marker_priority(content: &str) -> Option<u8> {
    match content {
        "P0" => Some(0),
        "P1" => Some(1),
        "P2" => Some(2),
        "P3" => Some(3),
        "P4" => Some(4),
        _ => None,
    }
}

/// Every (entry, priority) pair in document order
pub fn extract_priorities(doc: &Document) -> Vec<(NodeId, u8)> {
    let mut priorities = Vec::new();
    for visit in doc.iter() {
        let children: &[NodeId] = match visit.entry {
            Entry::Node(node) => &node.children,
            Entry::Block(block) => &block.body,
        };
        for child in children {
            let Some(marker) = doc.get(*child).and_then(Entry::as_node) else {
                continue;
            };
            let Some(priority) = marker.content().and_then(marker_priority) else {
                continue;
            };
            if marker.children.is_empty() {
                priorities.push((visit.id, priority));
            } else {
                priorities.extend(marker.children.iter().map(|c| (*c, priority)));
            }
        }
    }
    priorities
}

/// Entries grouped by priority, most urgent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Priorities {
    buckets: [Vec<NodeId>; PRIORITY_LEVELS],
}

impl Priorities {
    pub fn bucket(&self, priority: usize) -> &[NodeId] {
        self.buckets.get(priority).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Render as an outline: a `P<n>` line per non-empty bucket with the
    /// marked subtrees indented beneath it
    pub fn render(&self, doc: &Document, indent_width: usize) -> String {
        let printer = PrettyPrinter::new(indent_width);
        let mut out = String::new();
        for (priority, bucket) in self.buckets.iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            out.push_str(&format!("P{}\n", priority));
            for id in bucket {
                printer.print_entry(doc, *id, 1, &mut out);
            }
        }
        out
    }
}

pub fn prioritize(doc: &Document) -> Priorities {
    let mut priorities = Priorities::default();
    for (id, priority) in extract_priorities(doc) {
        if let Some(bucket) = priorities.buckets.get_mut(priority as usize) {
            bucket.push(id);
        }
    }
    priorities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puddlejumper::parse_with_defaults;

    #[test]
    fn test_marker_without_children_marks_parent() {
        let doc = parse_with_defaults("fix bug\n  P1\nrelax\n").unwrap();
        let priorities = extract_priorities(&doc);
        assert_eq!(priorities, vec![(doc.roots()[0], 1)]);
    }

    #[test]
    fn test_marker_with_children_marks_each_child() {
        let doc = parse_with_defaults("todo\n  P0\n    a\n    b\n").unwrap();
        let prioritized = prioritize(&doc);
        assert_eq!(prioritized.bucket(0).len(), 2);
        assert!(prioritized.bucket(1).is_empty());
        assert!(prioritized.bucket(9).is_empty());
    }

    #[test]
    fn test_marker_inside_block_marks_block() {
        let doc = parse_with_defaults("# Project\nP2\nwork\n").unwrap();
        let prioritized = prioritize(&doc);
        assert_eq!(prioritized.bucket(2), &[doc.roots()[0]]);
    }

    #[test]
    fn test_only_exact_markers_count() {
        let doc = parse_with_defaults("a\n  P5\n  p1\n  P1 later\n").unwrap();
        assert!(prioritize(&doc).is_empty());
    }

    #[test]
    fn test_render() {
        let doc =
            parse_with_defaults("ship\n  P0\nnap\n  P3\nlist\n  P0\n    call\n").unwrap();
        let rendered = prioritize(&doc).render(&doc, 2);
        assert_eq!(
            rendered,
            "P0\n  ship\n    P0\n  call\nP3\n  nap\n    P3\n"
        );
    }
}
