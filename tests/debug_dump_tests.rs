use boxprobe::boxmodel::box_model::BoxRect;
use boxprobe::debug_dump::parser::{DebugLine, ScanState, classify_line, parse_debug_output};

use crate::common::fixtures::{fixture, init_logging};

mod common;

// ============================================================================
// Line classification
// ============================================================================

#[test]
fn classifies_tag_class_and_content_lines() {
    assert_eq!(classify_line("Tag: h1"), DebugLine::Tag("h1".into()));
    assert_eq!(classify_line("   Class: block-test  "), DebugLine::Class("block-test".into()));
    assert_eq!(
        classify_line("Content: x=20.00, y=61.44, width=921.00, height=46.00"),
        DebugLine::Content(BoxRect::new(20.0, 61.44, 921.0, 46.0))
    );
}

#[test]
fn class_takes_first_token_only() {
    assert_eq!(classify_line("Class: a b"), DebugLine::Class("a".into()));
}

#[test]
fn unrelated_lines_are_other() {
    assert_eq!(classify_line(""), DebugLine::Other);
    assert_eq!(classify_line("=== Layout dump ==="), DebugLine::Other);
    assert_eq!(
        classify_line("Border: x=20.00, y=59.44, width=925.00, height=50.00"),
        DebugLine::Other
    );
    assert_eq!(classify_line("Tag:"), DebugLine::Other);
    assert_eq!(classify_line("Content: x=1.2.3, y=0, width=0, height=0"), DebugLine::Other);
}

#[test]
fn content_accepts_negative_offsets() {
    assert_eq!(
        classify_line("Content: x=-4.00, y=0.00, width=10.00, height=5.00"),
        DebugLine::Content(BoxRect::new(-4.0, 0.0, 10.0, 5.0))
    );
}

// ============================================================================
// State machine transitions
// ============================================================================

#[test]
fn tag_line_enters_element_and_clears_class() {
    let state = ScanState::InTag {
        tag: "div".into(),
        class: Some("block-test".into()),
    };
    let (next, emitted) = state.step(DebugLine::Tag("p".into()));
    assert_eq!(next, ScanState::InTag { tag: "p".into(), class: None });
    assert!(emitted.is_none());
}

#[test]
fn class_before_any_tag_is_ignored() {
    let (next, emitted) = ScanState::NoTag.step(DebugLine::Class("orphan".into()));
    assert_eq!(next, ScanState::NoTag);
    assert!(emitted.is_none());
}

#[test]
fn content_without_tag_emits_nothing() {
    let rect = BoxRect::new(1.0, 2.0, 3.0, 4.0);
    let (next, emitted) = ScanState::NoTag.step(DebugLine::Content(rect));
    assert_eq!(next, ScanState::NoTag);
    assert!(emitted.is_none());
}

#[test]
fn content_emits_and_keeps_state() {
    let state = ScanState::InTag {
        tag: "DIV".into(),
        class: Some("block-test".into()),
    };
    let rect = BoxRect::new(37.0, 149.88, 891.0, 166.0);
    let (next, emitted) = state.clone().step(DebugLine::Content(rect));
    assert_eq!(next, state);

    let element = emitted.unwrap();
    assert_eq!(element.tag, "DIV");
    assert_eq!(element.key(), "div.block-test");
    assert_eq!(element.content, rect);
}

// ============================================================================
// Whole dumps
// ============================================================================

#[test]
fn single_heading_dump() {
    let dump = parse_debug_output("Tag: h1\nContent: x=20.00, y=61.44, width=921.00, height=46.00");
    assert_eq!(dump.len(), 1);
    let h1 = dump.get("h1").unwrap();
    assert_eq!(h1.content, BoxRect::new(20.0, 61.44, 921.0, 46.0));
    assert_eq!(h1.class, None);
}

#[test]
fn keys_are_lowercase_tag_with_class() {
    let dump = parse_debug_output(
        "Tag: DIV\nClass: block-test\nContent: x=37.00, y=149.88, width=891.00, height=166.00\n",
    );
    assert!(dump.get("div.block-test").is_some());
    assert!(dump.get("DIV.block-test").is_none());
    assert_eq!(dump.keys().collect::<Vec<_>>(), vec!["div.block-test"]);
}

#[test]
fn class_does_not_leak_into_next_tag() {
    let dump = parse_debug_output(
        "Tag: div\nClass: block-test\nContent: x=0, y=0, width=1, height=1\n\
         Tag: p\nContent: x=0, y=5, width=1, height=1\n",
    );
    assert!(dump.get("p").is_some());
    assert!(dump.get("p.block-test").is_none());
}

#[test]
fn repeated_content_under_one_tag_overwrites() {
    init_logging();
    let dump = parse_debug_output(
        "Tag: h1\nContent: x=0, y=10, width=1, height=1\nContent: x=0, y=20, width=1, height=1\n",
    );
    assert_eq!(dump.len(), 1);
    assert_eq!(dump.entries().len(), 2);
    assert_eq!(dump.get("h1").unwrap().content.y, 20.0);
    assert_eq!(dump.overwritten(), ["h1".to_string()]);
}

#[test]
fn fixture_dump_keeps_every_entry() {
    init_logging();
    let text = std::fs::read_to_string(fixture("engine_output.txt")).unwrap();
    let dump = parse_debug_output(&text);

    assert_eq!(dump.entries().len(), 5);
    assert_eq!(dump.len(), 4);
    assert!(!dump.is_empty());

    // Last h1 wins by key; the topmost lookup still finds the first one.
    assert_eq!(dump.get("h1").unwrap().content.y, 149.88);
    assert_eq!(dump.topmost_unclassed("H1").unwrap().content.y, 63.44);

    let block = dump.get("div.block-test").unwrap();
    assert_eq!(block.content, BoxRect::new(37.0, 149.88, 891.0, 166.0));
}

#[test]
fn empty_input_gives_empty_dump() {
    let dump = parse_debug_output("");
    assert!(dump.is_empty());
    assert!(dump.topmost_unclassed("h1").is_none());
}
