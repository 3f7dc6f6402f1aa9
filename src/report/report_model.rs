use log::{debug, info};

use crate::boxmodel::box_model::{BoxInsets, BoxRect, vertical_spacing};
use crate::boxmodel::table::{BoxModelEntry, BoxModelTable};
use crate::debug_dump::parser::DebugDump;
use crate::record::matcher::ElementFilter;
use crate::record::record_model::RectRecord;

// ============================================================================
// Analysis report — Chrome border boxes and derived content boxes
// ============================================================================

/// Border box of a page-level element (`HTML`, `BODY`).
#[derive(Debug, Clone)]
pub struct PageBox {
    pub tag: String,
    pub border_box: Option<BoxRect>,
}

/// A table entry resolved against the Chrome dump.
#[derive(Debug, Clone)]
pub struct EntryAnalysis {
    pub label: String,
    pub insets: BoxInsets,

    /// `None` when no element matched the entry
    pub border_box: Option<BoxRect>,
}

impl EntryAnalysis {
    pub fn content_box(&self) -> Option<BoxRect> {
        self.border_box
            .map(|border_box| self.insets.content_from_border(&border_box))
    }
}

/// Measured gap between two table entries.
#[derive(Debug, Clone)]
pub struct SpacingResult {
    pub upper: String,
    pub lower: String,
    pub upper_bottom: f64,
    pub lower_top: f64,
    pub spacing: f64,
    pub expected: Option<f64>,
}

/// Everything the `analyze` command prints.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub page_boxes: Vec<PageBox>,
    pub entries: Vec<EntryAnalysis>,
    pub spacing: Vec<SpacingResult>,
}

impl AnalysisReport {
    /// Resolve every table entry and spacing check against a rect dump.
    pub fn from_records(records: &[RectRecord], table: &BoxModelTable) -> Self {
        let page_boxes = ["HTML", "BODY"]
            .iter()
            .filter_map(|tag| {
                ElementFilter::new().tag(*tag).first(records).map(|r| PageBox {
                    tag: tag.to_string(),
                    border_box: r.rect.border_box(),
                })
            })
            .collect();

        let entries: Vec<EntryAnalysis> = table
            .entries
            .iter()
            .map(|entry| EntryAnalysis {
                label: entry.label.clone(),
                insets: entry.insets(),
                border_box: chrome_border_box(records, entry),
            })
            .collect();

        let spacing = table
            .spacing
            .iter()
            .filter_map(|check| {
                let upper = entries.iter().find(|e| e.label == check.upper)?.border_box?;
                let lower = entries.iter().find(|e| e.label == check.lower)?.border_box?;
                Some(SpacingResult {
                    upper: check.upper.clone(),
                    lower: check.lower.clone(),
                    upper_bottom: upper.bottom(),
                    lower_top: lower.y,
                    spacing: vertical_spacing(&upper, &lower),
                    expected: check.expected,
                })
            })
            .collect();

        Self {
            page_boxes,
            entries,
            spacing,
        }
    }
}

fn chrome_border_box(records: &[RectRecord], entry: &BoxModelEntry) -> Option<BoxRect> {
    let record = entry.filter().first(records);
    match record {
        Some(r) => {
            debug!("'{}' matched {}", entry.label, r.element.short_label());
            r.rect.border_box()
        }
        None => {
            info!("'{}' ({}) not found in Chrome dump", entry.label, entry.selector);
            None
        }
    }
}

// ============================================================================
// Comparison report — Chrome vs. engine under test
// ============================================================================

/// The engine's side of one comparison.
#[derive(Debug, Clone)]
pub struct EngineBoxes {
    /// Key the element was found under in the debug dump
    pub key: String,
    pub content_box: BoxRect,

    /// Content box widened by the entry's insets
    pub border_box: BoxRect,
}

/// One table entry compared across both renderers.
#[derive(Debug, Clone)]
pub struct ElementComparison {
    pub label: String,
    pub chrome_border_box: BoxRect,
    pub engine: Option<EngineBoxes>,
}

impl ElementComparison {
    /// Chrome minus engine, border box against border box.
    pub fn difference(&self) -> Option<BoxRect> {
        self.engine
            .as_ref()
            .map(|engine| self.chrome_border_box.delta(&engine.border_box))
    }
}

/// Everything the `compare` command prints.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub comparisons: Vec<ElementComparison>,
}

impl ComparisonReport {
    /// Entries missing from the Chrome dump are left out entirely.
    pub fn build(records: &[RectRecord], dump: &DebugDump, table: &BoxModelTable) -> Self {
        let comparisons = table
            .entries
            .iter()
            .filter_map(|entry| {
                let chrome_border_box = chrome_border_box(records, entry)?;
                Some(ElementComparison {
                    label: entry.label.clone(),
                    chrome_border_box,
                    engine: engine_boxes(dump, entry),
                })
            })
            .collect();

        Self { comparisons }
    }
}

/// Classed selectors are looked up by key; a bare tag picks the class-less
/// element nearest the top of the page.
fn engine_boxes(dump: &DebugDump, entry: &BoxModelEntry) -> Option<EngineBoxes> {
    let selector = entry.selector();
    let element = match selector.class {
        Some(_) => dump.get(&selector.key()),
        None => dump.topmost_unclassed(&selector.tag),
    }?;

    Some(EngineBoxes {
        key: element.key(),
        content_box: element.content,
        border_box: entry.insets().border_from_content(&element.content),
    })
}
