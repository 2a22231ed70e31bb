//! Worked examples of the puddlejumper format

use puddlejumper::puddlejumper::testing::assert_doc;
use puddlejumper::{parse, parse_with_defaults, ErrorKind, ParserConfig};
use rstest::rstest;

#[test]
fn test_single_line() {
    let doc = parse_with_defaults("foo").unwrap();
    assert_doc(&doc).entry_count(1).entry(0, |e| {
        e.assert_node().no_binding().content("foo").child_count(0);
    });
}

#[test]
fn test_binding_with_child() {
    let doc = parse_with_defaults("@x: foo\n  bar").unwrap();
    assert_doc(&doc)
        .entry_count(1)
        .symbol_count(1)
        .entry(0, |e| {
            e.assert_node()
                .binding("x")
                .content("foo")
                .child_count(1)
                .child(0, |c| {
                    c.assert_node().content("bar").child_count(0);
                });
        });
}

#[test]
fn test_reference_resolves_to_binding() {
    let doc = parse_with_defaults("@x: foo\n@x").unwrap();
    assert_doc(&doc)
        .entry_count(2)
        .reference_count(1)
        .entry(1, |e| {
            e.assert_node().reference("x").resolves_to("x");
        });
    assert_eq!(doc.target_of(doc.roots()[1]), Some(doc.roots()[0]));
}

#[test]
fn test_reference_inside_text_is_content() {
    let doc = parse_with_defaults("@x: foo\nbaz @x").unwrap();
    assert_doc(&doc).reference_count(0).entry(1, |e| {
        e.assert_node().content("baz @x");
    });
}

#[test]
fn test_dedent_returns_to_top_level() {
    let doc = parse_with_defaults("foo\n  bar\nbaz").unwrap();
    assert_doc(&doc)
        .entry_count(2)
        .entry(0, |e| {
            e.assert_node().content("foo").child_count(1);
        })
        .entry(1, |e| {
            e.assert_node().content("baz").child_count(0);
        });
}

#[test]
fn test_indented_first_line() {
    let err = parse_with_defaults("  foo").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Indentation);
    assert_eq!(err.position().line, 1);
}

#[test]
fn test_block_with_body() {
    let doc = parse_with_defaults("#section\nfoo").unwrap();
    assert_doc(&doc).entry_count(1).entry(0, |e| {
        e.assert_block()
            .no_binding()
            .header(|h| {
                h.content("section");
            })
            .body_count(1)
            .body(0, |b| {
                b.content("foo");
            });
    });
}

#[test]
fn test_binding_only_node_owns_its_children() {
    let doc = parse_with_defaults("@list:\n  one\n  two\n@list\n").unwrap();
    assert_doc(&doc).entry(0, |e| {
        e.assert_node().binding("list").binding_only().child_count(2);
    });
}

#[test]
fn test_anonymous_binding_is_not_published() {
    let doc = parse_with_defaults("@: marked\nplain\n").unwrap();
    assert_doc(&doc).symbol_count(0).entry(0, |e| {
        e.assert_node().anonymous_binding().content("marked");
    });
    assert_eq!(doc.symbols().anonymous(), &[doc.roots()[0]]);
}

#[test]
fn test_header_carries_its_own_binding() {
    let doc = parse_with_defaults("@sec\n@sec:\n# @title: Overview\n  aside\nbody\n").unwrap();
    assert_doc(&doc).symbol_count(2).entry(1, |e| {
        e.assert_block()
            .binding("sec")
            .header(|h| {
                h.binding("title").content("Overview").child_count(1);
            })
            .body_count(1);
    });
}

#[test]
fn test_blocks_nest_inside_nodes() {
    let doc = parse_with_defaults("outer\n  first\n  # inner\n  body\nafter\n").unwrap();
    assert_doc(&doc).entry_count(2).entry(0, |e| {
        e.assert_node()
            .child_count(2)
            .child(1, |c| {
                c.assert_block().body_count(1);
            });
    });
}

#[test]
fn test_blank_lines_are_ignored() {
    let with_blanks = parse_with_defaults("a\n\n  b\n   \n\n  c\n\nd\n").unwrap();
    let without = parse_with_defaults("a\n  b\n  c\nd\n").unwrap();
    assert!(with_blanks.same_structure(&without));
}

#[test]
fn test_tabs_use_configured_width() {
    let source = "a\n  b\n\tc\n";
    let doc = parse(source, &ParserConfig { tab_width: 2 }).unwrap();
    assert_doc(&doc).entry(0, |e| {
        e.assert_node().child_count(2);
    });

    let doc = parse(source, &ParserConfig::default()).unwrap();
    assert_doc(&doc).entry(0, |e| {
        e.assert_node().child_count(1).child(0, |c| {
            c.assert_node().child_count(1);
        });
    });
}

#[rstest]
#[case::indented_first_line("  foo", ErrorKind::Indentation, 1)]
#[case::misaligned_dedent("a\n    b\n  c\n", ErrorKind::Indentation, 3)]
#[case::lone_colon("foo\n:\n", ErrorKind::Syntax, 2)]
#[case::text_after_reference("@x: a\n@x b\n", ErrorKind::Syntax, 2)]
#[case::empty_header("#\n", ErrorKind::Syntax, 1)]
#[case::duplicate_binding("@x: a\n  @x: b\n", ErrorKind::DuplicateBinding, 2)]
#[case::unresolved_reference("@nope\n", ErrorKind::UnresolvedReference, 1)]
#[case::reference_to_self_ancestor("@x: a\n  @x\n", ErrorKind::CyclicReference, 2)]
#[case::binding_only_cycle("@x:\n  a\n    @x\n", ErrorKind::CyclicReference, 3)]
fn test_error_kinds(#[case] source: &str, #[case] kind: ErrorKind, #[case] line: usize) {
    let err = parse_with_defaults(source).unwrap_err();
    assert_eq!(err.kind(), kind, "{}", err);
    assert_eq!(err.position().line, line, "{}", err);
}

#[rstest]
#[case::at_end("foo\n@x:\n", 2)]
#[case::before_dedent("foo\n  @x:\nbar\n", 2)]
#[case::before_colon_line("@x:\n:\n", 1)]
#[case::end_of_block_body("a\n@b:\n# h\nx\n  y\n  @:\n", 6)]
fn test_dangling_binding(#[case] source: &str, #[case] line: usize) {
    let err = parse_with_defaults(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.position().line, line, "{}", err);
}

#[rstest]
#[case::adjacent("@x: a\n@x: b\n")]
#[case::nested("@x: a\n  b\n    c\n      @x: d\n")]
#[case::across_blocks("# one\n@x: a\n# two\nfiller\n  @x: b\n")]
#[case::block_and_node("@x:\n# head\n@x: body\n")]
fn test_duplicates_found_at_any_distance(#[case] source: &str) {
    let err = parse_with_defaults(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateBinding);
    assert_eq!(err.name(), Some("x"));
}
