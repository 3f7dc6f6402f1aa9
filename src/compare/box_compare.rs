use serde::{Deserialize, Serialize};

use crate::boxmodel::box_model::{BoxRect, Edges};

/// Default pixel tolerance for box comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Box geometry of a single element as captured from one renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxInfo {
    pub content_box: BoxRect,
    pub border_box: BoxRect,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Edges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
}

/// Outcome of comparing two `BoxInfo`s. Diffs are absolute per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxComparison {
    pub content_box_match: bool,
    pub border_box_match: bool,
    pub content_box_diff: BoxRect,
    pub border_box_diff: BoxRect,
}

impl BoxComparison {
    pub fn all_match(&self) -> bool {
        self.content_box_match && self.border_box_match
    }
}

/// Compare two captures of the same element; a box matches when every field
/// differs by at most `tolerance`.
pub fn compare_boxes(actual: &BoxInfo, expected: &BoxInfo, tolerance: f64) -> BoxComparison {
    let content_box_diff = actual.content_box.abs_delta(&expected.content_box);
    let border_box_diff = actual.border_box.abs_delta(&expected.border_box);

    BoxComparison {
        content_box_match: content_box_diff.max_component() <= tolerance,
        border_box_match: border_box_diff.max_component() <= tolerance,
        content_box_diff,
        border_box_diff,
    }
}
