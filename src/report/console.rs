use crate::boxmodel::box_model::BoxRect;
use crate::compare::box_compare::BoxComparison;
use crate::record::record_model::{RectRecord, StyleRecord};
use crate::report::report_model::{AnalysisReport, ComparisonReport, EntryAnalysis};

// ============================================================================
// Console reporter — fixed-format text blocks for the terminal
// ============================================================================

/// Placeholder for values absent from the input.
pub const MISSING: &str = "N/A";

/// Rects whose width/height disagree with their edges by more than this are flagged.
const EDGE_TOLERANCE: f64 = 0.5;

/// Key styles shown for style records, as (camelCase key, CSS name).
const KEY_STYLES: &[(&str, &str)] = &[
    ("width", "width"),
    ("height", "height"),
    ("marginTop", "margin-top"),
    ("marginBottom", "margin-bottom"),
    ("paddingTop", "padding-top"),
    ("paddingBottom", "padding-bottom"),
    ("borderTopWidth", "border-top-width"),
    ("backgroundColor", "background-color"),
    ("color", "color"),
    ("fontSize", "font-size"),
];

pub fn rule() -> String {
    "=".repeat(80)
}

/// `12.34px`, or the placeholder.
pub fn px(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}px", v),
        None => MISSING.to_string(),
    }
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn push_box(out: &mut String, indent: &str, rect: &BoxRect) {
    out.push_str(&format!("{}x: {:.2}px, y: {:.2}px\n", indent, rect.x, rect.y));
    out.push_str(&format!(
        "{}width: {:.2}px, height: {:.2}px\n",
        indent, rect.width, rect.height
    ));
}

// ============================================================================
// Rect records
// ============================================================================

/// Full detail block for one rect record.
pub fn format_rect_record(record: &RectRecord, title: &str) -> String {
    let el = &record.element;
    let rect = &record.rect;
    let mut out = String::new();

    out.push_str(&format!("\n=== {} ===\n", title));
    out.push_str(&format!("  Tag: {}\n", el.tag_name));
    if !el.class_name.is_empty() {
        out.push_str(&format!("  Class: {}\n", el.class_name));
    }
    if !el.id.is_empty() {
        out.push_str(&format!("  ID: {}\n", el.id));
    }
    if !el.text_content.is_empty() {
        out.push_str(&format!("  Text Content: {}\n", el.text_content));
    }
    out.push_str(&format!("  Parent Tag: {}\n", el.parent_tag_name));
    out.push_str(&format!("  Parent Class: {}\n", el.parent_class_name));
    out.push_str(&format!("  Is Visible: {}\n", visible(el.is_visible)));

    out.push_str("\n  Page Coordinates (absolute):\n");
    for (name, value) in [
        ("x", rect.x),
        ("y", rect.y),
        ("width", rect.width),
        ("height", rect.height),
        ("top", rect.top),
        ("right", rect.right),
        ("bottom", rect.bottom),
        ("left", rect.left),
    ] {
        out.push_str(&format!("    {}: {}\n", name, px(value)));
    }

    out.push_str("\n  Viewport Coordinates (relative to viewport):\n");
    for (name, value) in [
        ("viewportX", rect.viewport_x),
        ("viewportY", rect.viewport_y),
        ("viewportTop", rect.viewport_top),
        ("viewportRight", rect.viewport_right),
        ("viewportBottom", rect.viewport_bottom),
        ("viewportLeft", rect.viewport_left),
    ] {
        out.push_str(&format!("    {}: {}\n", name, px(value)));
    }

    if rect.consistent(EDGE_TOLERANCE) == Some(false) {
        out.push_str("\n  ! width/height disagree with right-left / bottom-top\n");
    }

    out
}

/// One-entry summary used when no filter is given.
pub fn format_rect_summary(position: usize, record: &RectRecord) -> String {
    let rect = &record.rect;
    let coord = |v: Option<f64>| v.map_or_else(|| MISSING.to_string(), |v| format!("{:.1}", v));

    format!(
        "\n{}. {}\n   Page: ({}, {}) size: {}x{}\n   Visible: {}\n",
        position,
        record.element.short_label(),
        coord(rect.x),
        coord(rect.y),
        coord(rect.width),
        coord(rect.height),
        visible(record.element.is_visible)
    )
}

/// Output of the `rects` command.
///
/// With `filtered` set, every match gets a detail block; otherwise the first
/// `limit` records are summarized.
pub fn format_rect_listing(
    total: usize,
    records: &[&RectRecord],
    filtered: bool,
    limit: usize,
) -> String {
    let mut out = format!("Total elements: {}\n", total);

    if filtered {
        if records.is_empty() {
            out.push_str("No elements found matching criteria.\n");
        }
        for (i, record) in records.iter().enumerate() {
            let mut title = format!("Element {}", i + 1);
            if !record.element.class_name.is_empty() {
                title.push_str(&format!(" ({})", record.element.class_name));
            }
            out.push_str(&format_rect_record(record, &title));
        }
    } else {
        out.push_str(&format!(
            "\nShowing first {} elements (use filters to find specific elements):\n",
            limit
        ));
        for (i, record) in records.iter().take(limit).enumerate() {
            out.push_str(&format_rect_summary(i + 1, record));
        }
    }

    out
}

fn visible(value: Option<bool>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

// ============================================================================
// Analysis
// ============================================================================

/// Output of the `analyze` command.
pub fn format_analysis(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", rule()));
    out.push_str("Chrome element rect analysis\n");
    out.push_str(&format!("{}\n", rule()));

    for page_box in &report.page_boxes {
        out.push_str(&format!("\n[{}]\n", page_box.tag));
        match page_box.border_box {
            Some(ref rect) => push_box(&mut out, "  ", rect),
            None => out.push_str("  rect incomplete\n"),
        }
    }

    for entry in &report.entries {
        out.push_str(&format_entry_analysis(entry));
    }

    for spacing in &report.spacing {
        out.push_str(&format!("\n[Spacing: {} -> {}]\n", spacing.upper, spacing.lower));
        out.push_str(&format!("  {} border box bottom: {:.2}px\n", spacing.upper, spacing.upper_bottom));
        out.push_str(&format!("  {} border box top: {:.2}px\n", spacing.lower, spacing.lower_top));
        out.push_str(&format!("  spacing: {:.2}px\n", spacing.spacing));
        if let Some(expected) = spacing.expected {
            out.push_str(&format!("  (expected margin: {:.2}px)\n", expected));
        }
    }

    out
}

/// Border box plus the content-box arithmetic written out term by term.
pub fn format_entry_analysis(entry: &EntryAnalysis) -> String {
    let mut out = format!("\n[{}]\n", entry.label);
    let (Some(border), Some(content)) = (entry.border_box, entry.content_box()) else {
        out.push_str("  not found\n");
        return out;
    };
    let insets = &entry.insets;

    push_box(&mut out, "  ", &border);
    out.push_str("  (getBoundingClientRect returns the border box)\n");
    out.push_str("  content box:\n");
    out.push_str(&format!(
        "    content.x = border.x + border.left + padding.left = {:.2} + {} + {} = {:.2}px\n",
        border.x, insets.border.left, insets.padding.left, content.x
    ));
    out.push_str(&format!(
        "    content.y = border.y + border.top + padding.top = {:.2} + {} + {} = {:.2}px\n",
        border.y, insets.border.top, insets.padding.top, content.y
    ));
    out.push_str(&format!(
        "    content.width = border.width - border.horizontal - padding.horizontal = {:.2} - {} - {} = {:.2}px\n",
        border.width,
        insets.border.horizontal(),
        insets.padding.horizontal(),
        content.width
    ));
    out.push_str(&format!(
        "    content.height = border.height - border.vertical - padding.vertical = {:.2} - {} - {} = {:.2}px\n",
        border.height,
        insets.border.vertical(),
        insets.padding.vertical(),
        content.height
    ));
    out
}

// ============================================================================
// Chrome vs. engine
// ============================================================================

/// Output of the `compare` command.
pub fn format_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", rule()));
    out.push_str("Chrome vs engine element position comparison\n");
    out.push_str(&format!("{}\n", rule()));

    for cmp in &report.comparisons {
        out.push_str(&format!("\n[{}]\n", cmp.label));
        out.push_str("Chrome (getBoundingClientRect - border box):\n");
        push_box(&mut out, "  ", &cmp.chrome_border_box);

        let (Some(engine), Some(diff)) = (cmp.engine.as_ref(), cmp.difference()) else {
            out.push_str("Engine: not found\n");
            continue;
        };

        out.push_str(&format!("Engine (content box, {}):\n", engine.key));
        push_box(&mut out, "  ", &engine.content_box);

        out.push_str("\nEngine (border box - derived):\n");
        push_box(&mut out, "  ", &engine.border_box);

        out.push_str("\nDifference (Chrome - engine border box):\n");
        out.push_str(&format!("  x: {:.2}px\n", diff.x));
        out.push_str(&format!("  y: {:.2}px\n", diff.y));
        out.push_str(&format!("  width: {:.2}px\n", diff.width));
        out.push_str(&format!("  height: {:.2}px\n", diff.height));
    }

    if report.comparisons.is_empty() {
        out.push_str("\nNo known elements found in the Chrome dump.\n");
    }

    out
}

// ============================================================================
// Style records
// ============================================================================

/// Identity and key styles of one style record.
pub fn format_style_record(record: &StyleRecord) -> String {
    let el = &record.element;
    let mut out = String::new();

    let index = el.index.map_or_else(|| "?".to_string(), |i| i.to_string());
    out.push_str(&format!("\n=== Element {} ===\n", index));
    out.push_str(&format!(
        "Tag: {}\n",
        if el.tag_name.is_empty() { MISSING } else { el.tag_name.as_str() }
    ));
    if !el.class_name.is_empty() {
        out.push_str(&format!("Class: {}\n", el.class_name));
    }
    if !el.id.is_empty() {
        out.push_str(&format!("ID: {}\n", el.id));
    }
    if !el.text_content.is_empty() {
        let preview: String = el.text_content.chars().take(50).collect();
        out.push_str(&format!("Text: {}...\n", preview));
    }
    out.push_str(&format!(
        "Parent: {} {}\n",
        if el.parent_tag_name.is_empty() { MISSING } else { el.parent_tag_name.as_str() },
        el.parent_class_name
    ));

    out.push_str("\nKey Styles:\n");
    for (key, css_name) in KEY_STYLES {
        out.push_str(&format!("  {}: {}\n", css_name, or_missing(record.key_style(key))));
    }

    out
}

// ============================================================================
// Box-info comparison
// ============================================================================

/// Summary printed by the `boxes` command.
pub fn format_box_comparison(cmp: &BoxComparison, output_path: &str) -> String {
    let mut out = String::new();
    out.push_str("Comparison completed\n");
    out.push_str(&format!("Content box match: {}\n", cmp.content_box_match));
    out.push_str(&format!("Border box match: {}\n", cmp.border_box_match));
    out.push_str(&format!("Written to: {}\n", output_path));
    out
}
