use boxprobe::boxmodel::box_model::BoxRect;
use boxprobe::boxmodel::table::BoxModelTable;
use boxprobe::compare::box_compare::{BoxInfo, compare_boxes};
use boxprobe::debug_dump::parser::parse_debug_output;
use boxprobe::record::matcher::ElementFilter;
use boxprobe::report::console::{
    format_analysis, format_box_comparison, format_comparison, format_rect_listing,
    format_rect_record, format_style_record, px,
};
use boxprobe::report::report_model::{AnalysisReport, ComparisonReport};

use crate::common::fixtures::{assert_close, fixture, rect_records, style_records};

mod common;

fn engine_dump_text() -> String {
    std::fs::read_to_string(fixture("engine_output.txt")).unwrap()
}

// ============================================================================
// 1. Analysis
// ============================================================================

#[test]
fn analysis_resolves_table_entries() {
    let records = rect_records();
    let report = AnalysisReport::from_records(&records, &BoxModelTable::default());

    assert_eq!(report.page_boxes.len(), 2);
    assert_eq!(report.page_boxes[0].tag, "HTML");

    let h1 = &report.entries[0];
    let content = h1.content_box().unwrap();
    assert_close(content.x, 22.0);
    assert_close(content.y, 43.44);
    assert_close(content.width, 921.0);
    assert_close(content.height, 46.0);

    let block = report.entries[1].content_box().unwrap();
    assert_close(block.x, 37.0);
    assert_close(block.height, 166.0);
}

#[test]
fn analysis_measures_spacing() {
    let records = rect_records();
    let report = AnalysisReport::from_records(&records, &BoxModelTable::default());

    assert_eq!(report.spacing.len(), 1);
    let spacing = &report.spacing[0];
    assert_close(spacing.upper_bottom, 91.44);
    assert_close(spacing.lower_top, 112.88);
    assert_close(spacing.spacing, 21.44);
}

#[test]
fn analysis_output_spells_out_arithmetic() {
    let records = rect_records();
    let out = format_analysis(&AnalysisReport::from_records(&records, &BoxModelTable::default()));

    assert!(out.contains("[First H1]"));
    assert!(out.contains("content.x = border.x + border.left + padding.left = 20.00 + 2 + 0 = 22.00px"));
    assert!(out.contains("content.y = border.y + border.top + padding.top = 41.44 + 2 + 0 = 43.44px"));
    assert!(out.contains("= 925.00 - 4 - 0 = 921.00px"));
    assert!(out.contains("= 112.88 + 2 + 15 = 129.88px"));
    assert!(out.contains("spacing: 21.44px"));
    assert!(out.contains("(expected margin: 21.44px)"));
}

#[test]
fn analysis_reports_missing_elements() {
    let report = AnalysisReport::from_records(&[], &BoxModelTable::default());
    assert!(report.page_boxes.is_empty());
    assert!(report.spacing.is_empty());

    let out = format_analysis(&report);
    assert!(out.contains("[First H1]\n  not found"));
}

// ============================================================================
// 2. Chrome vs. engine
// ============================================================================

#[test]
fn comparison_uses_topmost_unclassed_h1() {
    let records = rect_records();
    let dump = parse_debug_output(&engine_dump_text());
    let report = ComparisonReport::build(&records, &dump, &BoxModelTable::default());

    assert_eq!(report.comparisons.len(), 2);
    let h1 = &report.comparisons[0];
    let engine = h1.engine.as_ref().unwrap();
    assert_eq!(engine.key, "h1");
    assert_close(engine.content_box.y, 63.44);
    assert_close(engine.border_box.x, 20.0);
    assert_close(engine.border_box.y, 61.44);
    assert_close(engine.border_box.width, 925.0);

    let diff = h1.difference().unwrap();
    assert_close(diff.x, 0.0);
    assert_close(diff.y, -20.0);
    assert_close(diff.height, 0.0);
}

#[test]
fn comparison_looks_up_classed_entries_by_key() {
    let records = rect_records();
    let dump = parse_debug_output(&engine_dump_text());
    let report = ComparisonReport::build(&records, &dump, &BoxModelTable::default());

    let block = &report.comparisons[1];
    let engine = block.engine.as_ref().unwrap();
    assert_eq!(engine.key, "div.block-test");
    assert_close(engine.border_box.y, 132.88);
    assert_close(engine.border_box.height, 200.0);
    assert_close(block.difference().unwrap().y, -20.0);
}

#[test]
fn comparison_marks_engine_side_missing() {
    let records = rect_records();
    let dump = parse_debug_output("Tag: p\nContent: x=0, y=0, width=1, height=1\n");
    let report = ComparisonReport::build(&records, &dump, &BoxModelTable::default());

    assert!(report.comparisons.iter().all(|c| c.engine.is_none()));
    let out = format_comparison(&report);
    assert_eq!(out.matches("Engine: not found").count(), 2);
}

#[test]
fn comparison_output_has_all_sections() {
    let records = rect_records();
    let dump = parse_debug_output(&engine_dump_text());
    let out = format_comparison(&ComparisonReport::build(&records, &dump, &BoxModelTable::default()));

    assert!(out.contains("Chrome (getBoundingClientRect - border box):"));
    assert!(out.contains("Engine (content box, div.block-test):"));
    assert!(out.contains("Engine (border box - derived):"));
    assert!(out.contains("Difference (Chrome - engine border box):"));
    assert!(out.contains("  y: -20.00px"));
}

#[test]
fn comparison_without_chrome_elements() {
    let dump = parse_debug_output(&engine_dump_text());
    let report = ComparisonReport::build(&[], &dump, &BoxModelTable::default());
    assert!(report.comparisons.is_empty());
    assert!(format_comparison(&report).contains("No known elements found"));
}

// ============================================================================
// 3. Rect listings
// ============================================================================

#[test]
fn rect_record_block_lists_every_field() {
    let records = rect_records();
    let out = format_rect_record(&records[3], "Element 1 (block-test)");

    assert!(out.contains("=== Element 1 (block-test) ==="));
    assert!(out.contains("  Class: block-test"));
    assert!(out.contains("  ID: blocks"));
    assert!(out.contains("  Is Visible: true"));
    assert!(out.contains("    y: 112.88px"));
    assert!(out.contains("    viewportBottom: 312.88px"));
    assert!(!out.contains("disagree"));
}

#[test]
fn rect_record_uses_placeholder_for_absent_fields() {
    let records = rect_records();
    let out = format_rect_record(&records[5], "inner");
    assert!(out.contains("    viewportX: N/A"));
    assert!(out.contains("  Is Visible: false"));
}

#[test]
fn filtered_listing_shows_matches() {
    let records = rect_records();
    let selected = ElementFilter::new().tag("div").class("block-test").select(&records);
    let out = format_rect_listing(records.len(), &selected, true, 10);

    assert!(out.starts_with("Total elements: 7\n"));
    assert!(out.contains("=== Element 1 (block-test) ==="));
    assert!(!out.contains("Element 2"));
}

#[test]
fn filtered_listing_without_matches() {
    let records = rect_records();
    let out = format_rect_listing(records.len(), &[], true, 10);
    assert!(out.contains("No elements found matching criteria."));
}

#[test]
fn unfiltered_listing_is_limited() {
    let records = rect_records();
    let all: Vec<_> = records.iter().collect();
    let out = format_rect_listing(records.len(), &all, false, 3);

    assert!(out.contains("Showing first 3 elements"));
    assert!(out.contains("\n3. H1\n   Page: (20.0, 41.4) size: 925.0x50.0\n   Visible: true\n"));
    assert!(!out.contains("\n4. "));
}

// ============================================================================
// 4. Style records
// ============================================================================

#[test]
fn style_record_block() {
    let records = style_records();
    let out = format_style_record(&records[0]);

    assert!(out.contains("=== Element 7 ==="));
    assert!(out.contains("Class: block-test"));
    assert!(out.contains("Parent: BODY "));
    assert!(out.contains("  margin-top: 21.44px"));
    assert!(out.contains("  border-top-width: 2px"));
    assert!(out.contains("  background-color: rgb(240, 240, 240)"));
}

#[test]
fn style_record_placeholders() {
    let records = style_records();
    let out = format_style_record(&records[3]);
    assert!(out.contains("  width: N/A"));
    assert!(out.contains("Text: 第二段..."));
}

#[test]
fn px_formats_two_decimals() {
    assert_eq!(px(Some(41.44)), "41.44px");
    assert_eq!(px(Some(20.0)), "20.00px");
    assert_eq!(px(None), "N/A");
}

// ============================================================================
// 5. Box-info comparison
// ============================================================================

#[test]
fn boxes_summary_prints_flags() {
    let a = BoxInfo {
        content_box: BoxRect::new(0.0, 0.0, 10.0, 10.0),
        border_box: BoxRect::new(0.0, 0.0, 12.0, 12.0),
        padding: None,
        border: None,
        margin: None,
    };
    let cmp = compare_boxes(&a, &a, 1.0);
    let out = format_box_comparison(&cmp, "out.json");
    assert!(out.contains("Content box match: true"));
    assert!(out.contains("Border box match: true"));
    assert!(out.contains("out.json"));
}
