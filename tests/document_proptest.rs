//! Property-based tests over generated outlines
//!
//! Outlines are generated as trees, optionally followed by `#` blocks, rendered
//! with irregular (but consistent) indentation, then parsed. The properties
//! checked are determinism, pretty printer round-trips, the indentation
//! invariant, reference resolution and duplicate detection.

use proptest::prelude::*;
use puddlejumper::puddlejumper::formats::to_pretty_str;
use puddlejumper::{parse_with_defaults, Document, Entry, ErrorKind};

#[derive(Debug, Clone)]
struct Outline {
    text: String,
    /// 0: no binding, 1: named binding, 2: anonymous binding
    bind: u8,
    /// Extra indentation of this node's children
    step: usize,
    children: Vec<Outline>,
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}( [a-z0-9.,!?]{1,6}){0,2}"
}

fn outline_strategy() -> impl Strategy<Value = Outline> {
    let leaf = (text_strategy(), 0u8..3).prop_map(|(text, bind)| Outline {
        text,
        bind,
        step: 1,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            text_strategy(),
            0u8..3,
            1usize..=4,
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(text, bind, step, children)| Outline {
                text,
                bind,
                step,
                children,
            })
    })
}

/// A `#` block: an optional binding line, the header node and its body
#[derive(Debug, Clone)]
struct BlockOutline {
    /// 0: no binding, 1: named binding, 2: anonymous binding
    bind: u8,
    header: Outline,
    body: Vec<Outline>,
}

fn block_strategy() -> impl Strategy<Value = BlockOutline> {
    (
        0u8..3,
        outline_strategy(),
        prop::collection::vec(outline_strategy(), 0..3),
    )
        .prop_map(|(bind, header, body)| BlockOutline { bind, header, body })
}

#[derive(Debug, Clone)]
struct Outlines {
    items: Vec<Outline>,
    blocks: Vec<BlockOutline>,
    /// Write 8 columns of indentation as a tab where possible
    tabs: bool,
}

fn document_strategy() -> impl Strategy<Value = Outlines> {
    (
        prop::collection::vec(outline_strategy(), 1..5),
        prop::collection::vec(block_strategy(), 0..3),
        any::<bool>(),
    )
        .prop_map(|(items, blocks, tabs)| Outlines {
            items,
            blocks,
            tabs,
        })
}

/// Rendered source plus what the parser should find in it
struct Rendered {
    source: String,
    names: Vec<String>,
    entries: usize,
    tabs: bool,
}

impl Rendered {
    fn indent(&mut self, width: usize) {
        if self.tabs && width >= 8 {
            self.source.push('\t');
            self.source.push_str(&" ".repeat(width - 8));
        } else {
            self.source.push_str(&" ".repeat(width));
        }
    }

    /// `@name:` or `@:` followed by `trailing`
    fn binding(&mut self, bind: u8, trailing: &str) {
        match bind {
            1 => {
                let name = format!("n{}", self.names.len());
                self.source.push_str(&format!("@{}:{}", name, trailing));
                self.names.push(name);
            }
            2 => self.source.push_str(&format!("@:{}", trailing)),
            _ => {}
        }
    }

    fn item(&mut self, item: &Outline, width: usize, marker: &str) {
        self.indent(width);
        self.source.push_str(marker);
        self.binding(item.bind, " ");
        self.source.push_str(&item.text);
        self.source.push('\n');
        self.entries += 1;
        self.items(&item.children, width + item.step);
    }

    fn items(&mut self, items: &[Outline], width: usize) {
        for item in items {
            self.item(item, width, "");
        }
    }

    fn block(&mut self, block: &BlockOutline) {
        self.binding(block.bind, "\n");
        self.entries += 1;
        self.item(&block.header, 0, "# ");
        self.items(&block.body, 0);
    }
}

/// Render the top-level nodes, a top-level reference to every binding, then
/// the blocks. References go before the blocks so none lands in a block body.
fn render_with(outlines: &Outlines, tabs: bool) -> Rendered {
    let mut rendered = Rendered {
        source: String::new(),
        names: Vec::new(),
        entries: 0,
        tabs,
    };
    rendered.items(&outlines.items, 0);
    let split = rendered.source.len();
    for block in &outlines.blocks {
        rendered.block(block);
    }
    let blocks = rendered.source.split_off(split);
    for name in rendered.names.clone() {
        rendered.source.push_str(&format!("@{}\n", name));
        rendered.entries += 1;
    }
    rendered.source.push_str(&blocks);
    rendered
}

fn render(outlines: &Outlines) -> Rendered {
    render_with(outlines, outlines.tabs)
}

/// Every entry's children start in one shared column, right of the parent
fn check_indentation(doc: &Document) {
    for visit in doc.iter() {
        let Entry::Node(node) = visit.entry else {
            continue;
        };
        let columns: Vec<usize> = node
            .children
            .iter()
            .map(|id| doc[*id].span().start.column)
            .collect();
        if let Some(first) = columns.first() {
            assert!(columns.iter().all(|c| c == first), "{:?}", columns);
            assert!(*first > node.span.start.column);
        }
    }
}

proptest! {
    #[test]
    fn test_generated_outlines_parse(outlines in document_strategy()) {
        let rendered = render(&outlines);
        let doc = parse_with_defaults(&rendered.source).unwrap();

        prop_assert_eq!(doc.len(), rendered.entries);
        prop_assert_eq!(doc.symbols().len(), rendered.names.len());
        prop_assert_eq!(doc.references().len(), rendered.names.len());
    }

    #[test]
    fn test_parsing_is_deterministic(outlines in document_strategy()) {
        let rendered = render(&outlines);
        let first = parse_with_defaults(&rendered.source).unwrap();
        let second = parse_with_defaults(&rendered.source).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_pretty_print_round_trip(outlines in document_strategy(), indent in 1usize..=4) {
        let rendered = render(&outlines);
        let doc = parse_with_defaults(&rendered.source).unwrap();
        let roots = outlines.items.len() + rendered.names.len() + outlines.blocks.len();
        prop_assert_eq!(doc.roots().len(), roots);

        let printed = to_pretty_str(&doc, indent);
        let reparsed = parse_with_defaults(&printed).unwrap();
        prop_assert!(doc.same_structure(&reparsed));
        prop_assert_eq!(to_pretty_str(&reparsed, indent), printed);
    }

    #[test]
    fn test_indentation_invariant(outlines in document_strategy()) {
        // Columns count characters, so a tab would shift them
        let rendered = render_with(&outlines, false);
        let doc = parse_with_defaults(&rendered.source).unwrap();
        check_indentation(&doc);
    }

    #[test]
    fn test_references_resolve_outside_their_ancestry(outlines in document_strategy()) {
        let rendered = render(&outlines);
        let doc = parse_with_defaults(&rendered.source).unwrap();

        for edge in doc.references() {
            prop_assert_eq!(doc.symbols().get(&edge.name), Some(edge.to));
            prop_assert!(!doc.is_ancestor(edge.to, edge.from));
            prop_assert!(edge.to != edge.from);
        }
    }

    #[test]
    fn test_duplicates_are_always_detected(outlines in document_strategy()) {
        let rendered = render(&outlines);
        prop_assume!(!rendered.names.is_empty());

        let name = &rendered.names[rendered.names.len() / 2];
        let source = format!("{}@{}: again\n", rendered.source, name);
        let err = parse_with_defaults(&source).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DuplicateBinding);
        prop_assert_eq!(err.name(), Some(name.as_str()));
    }

    #[test]
    fn test_arbitrary_input_never_panics(input in "[ \ta-z@:#\n]{0,80}") {
        let _ = parse_with_defaults(&input);
    }
}
