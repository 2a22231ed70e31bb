//! Conversion from the parser's intermediate tree to the document arena
//!
//! Entries are pushed bottom-up: every child is stored before its parent, so
//! a parent's id is always greater than the ids of its subtree. The walk uses
//! an explicit task stack, so nesting depth is bounded by memory rather than
//! by the thread's stack.

use std::ops::Range;

use crate::puddlejumper::ast::{
    Binding, Block, Document, Entry, Node, NodeId, Payload, SourceLocation,
};
use crate::puddlejumper::parser::ir::{BindingWithSpan, EntryWithSpans, NodeWithSpans};

enum Task {
    /// Queue the entry's children, then its own `Finish*` task
    Visit(EntryWithSpans),
    FinishNode {
        binding: Option<BindingWithSpan>,
        payload: Option<Payload>,
        span: Range<usize>,
        children: usize,
    },
    /// The header id is the first of the `body + 1` finished ids
    FinishBlock {
        binding: Option<BindingWithSpan>,
        span: Range<usize>,
        body: usize,
    },
}

struct Builder<'a> {
    location: SourceLocation<'a>,
    entries: Vec<Entry>,
    tasks: Vec<Task>,
    /// Ids of finished entries not yet claimed by a parent
    finished: Vec<NodeId>,
}

impl<'a> Builder<'a> {
    fn push(&mut self, entry: Entry) -> NodeId {
        self.entries.push(entry);
        NodeId(self.entries.len() - 1)
    }

    fn convert_binding(&self, binding: BindingWithSpan) -> Binding {
        Binding {
            name: binding.name,
            span: self.location.range_to_span(&binding.span),
        }
    }

    /// Queue entries so they finish in the given order
    fn schedule(&mut self, entries: Vec<EntryWithSpans>) {
        self.tasks
            .extend(entries.into_iter().rev().map(Task::Visit));
    }

    fn visit_node(&mut self, node: NodeWithSpans) {
        let NodeWithSpans {
            binding,
            payload,
            children,
            span,
        } = node;
        self.tasks.push(Task::FinishNode {
            binding,
            payload: payload.map(|p| p.payload),
            span,
            children: children.len(),
        });
        self.schedule(children);
    }

    /// Take the ids of the last `count` finished entries, in order
    fn claim(&mut self, count: usize) -> Vec<NodeId> {
        let at = self.finished.len().saturating_sub(count);
        self.finished.split_off(at)
    }

    fn run(&mut self) {
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Visit(EntryWithSpans::Node(node)) => self.visit_node(node),
                Task::Visit(EntryWithSpans::Block(block)) => {
                    self.tasks.push(Task::FinishBlock {
                        binding: block.binding,
                        span: block.span,
                        body: block.body.len(),
                    });
                    let mut parts = Vec::with_capacity(block.body.len() + 1);
                    parts.push(EntryWithSpans::Node(block.header));
                    parts.extend(block.body.into_iter().map(EntryWithSpans::Node));
                    self.schedule(parts);
                }
                Task::FinishNode {
                    binding,
                    payload,
                    span,
                    children,
                } => {
                    let children = self.claim(children);
                    let entry = Entry::Node(Node {
                        binding: binding.map(|b| self.convert_binding(b)),
                        payload,
                        children,
                        span: self.location.range_to_span(&span),
                    });
                    let id = self.push(entry);
                    self.finished.push(id);
                }
                Task::FinishBlock {
                    binding,
                    span,
                    body,
                } => {
                    let mut parts = self.claim(body + 1).into_iter();
                    let Some(header) = parts.next() else {
                        continue;
                    };
                    let entry = Entry::Block(Block {
                        binding: binding.map(|b| self.convert_binding(b)),
                        header,
                        body: parts.collect(),
                        span: self.location.range_to_span(&span),
                    });
                    let id = self.push(entry);
                    self.finished.push(id);
                }
            }
        }
    }
}

/// Flatten the intermediate tree into a [`Document`]; positions are computed
/// from `source`, the text the tree was parsed from.
pub fn build_document(source: &str, tree: Vec<EntryWithSpans>) -> Document {
    let mut builder = Builder {
        location: SourceLocation::new(source),
        entries: Vec::new(),
        tasks: Vec::new(),
        finished: Vec::new(),
    };
    builder.schedule(tree);
    builder.run();
    Document::from_entries(builder.entries, builder.finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puddlejumper::ast::Position;
    use crate::puddlejumper::config::ParserConfig;
    use crate::puddlejumper::lexer::lex;
    use crate::puddlejumper::formats::{to_pretty_str, to_treeviz_str};
    use crate::puddlejumper::parser::ir::PayloadWithSpan;
    use crate::puddlejumper::parser::parse_tokens;

    /// `depth` nodes, each the only child of the one before
    fn chain(depth: usize) -> (String, Vec<EntryWithSpans>) {
        let mut source = String::new();
        let mut ranges = Vec::with_capacity(depth);
        for level in 0..depth {
            source.push_str(&" ".repeat(level));
            let start = source.len();
            source.push_str("x\n");
            ranges.push(start..start + 1);
        }
        let mut inner: Option<NodeWithSpans> = None;
        for range in ranges.into_iter().rev() {
            let payload = PayloadWithSpan {
                payload: Payload::Content("x".to_string()),
                span: range,
            };
            let children = inner.take().map(EntryWithSpans::Node).into_iter().collect();
            inner = Some(NodeWithSpans::new(None, Some(payload), children));
        }
        (source, inner.map(EntryWithSpans::Node).into_iter().collect())
    }

    fn build(source: &str) -> Document {
        let tokens = lex(source, &ParserConfig::default()).unwrap();
        build_document(source, parse_tokens(tokens).unwrap())
    }

    #[test]
    fn test_children_are_stored_before_parents() {
        let doc = build("a\n  b\n    c\nd\n");
        assert_eq!(doc.len(), 4);
        for visit in doc.iter() {
            for child in visit.entry.child_ids() {
                assert!(child < visit.id);
            }
        }
    }

    #[test]
    fn test_spans_are_positions() {
        let doc = build("top\n  @x: child\n");
        let top = doc[doc.roots()[0]].as_node().unwrap();
        let child = doc[top.children[0]].as_node().unwrap();

        assert_eq!(child.span.start, Position::new(2, 3, 6));
        assert_eq!(child.span.end, Position::new(2, 12, 15));
        let binding = child.binding.as_ref().unwrap();
        assert_eq!(binding.span.start, Position::new(2, 3, 6));
        assert_eq!(binding.span.end, Position::new(2, 6, 9));
        assert_eq!(top.span.end, child.span.end);
    }

    #[test]
    fn test_block_layout() {
        let doc = build("@b:\n# head\nbody\n");
        let block = doc[doc.roots()[0]].as_block().unwrap();

        assert_eq!(block.binding.as_ref().unwrap().name.as_deref(), Some("b"));
        assert_eq!(block.span.start, Position::new(1, 1, 0));
        assert_eq!(doc[block.header].as_node().unwrap().content(), Some("head"));
        assert_eq!(block.body.len(), 1);
    }

    #[test]
    fn test_block_children_follow_header() {
        let doc = build("# head
  sub
body
more
");
        let block_id = doc.roots()[0];
        let block = doc[block_id].as_block().unwrap();

        assert!(block.header < block.body[0]);
        assert!(block.body[0] < block.body[1]);
        assert!(block.body[1] < block_id);
        assert_eq!(doc[block.body[1]].as_node().unwrap().content(), Some("more"));
    }

    #[test]
    fn test_deep_nesting_on_a_small_stack() {
        let worker = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(|| {
                let (source, tree) = chain(5000);
                let doc = build_document(&source, tree);

                assert_eq!(doc.len(), 5000);
                assert_eq!(doc.roots(), &[NodeId(4999)]);
                assert_eq!(doc.ancestors(NodeId(0)).count(), 4999);
                assert_eq!(doc[NodeId(0)].span().start.line, 5000);
                assert!(doc.same_structure(&doc.clone()));

                let printed = to_pretty_str(&doc, 1);
                assert_eq!(printed.lines().count(), 5000);
                assert_eq!(printed.lines().last(), Some(format!("{}x", " ".repeat(4999)).as_str()));
                assert_eq!(to_treeviz_str(&doc).lines().count(), 5000);
            })
            .unwrap();
        worker.join().unwrap();
    }
}
