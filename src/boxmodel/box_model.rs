use serde::{Deserialize, Serialize};

// ============================================================================
// Box geometry
// ============================================================================

/// A rectangle in page pixels, used for both border and content boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Field-wise `self - other`.
    pub fn delta(&self, other: &BoxRect) -> BoxRect {
        BoxRect {
            x: self.x - other.x,
            y: self.y - other.y,
            width: self.width - other.width,
            height: self.height - other.height,
        }
    }

    /// Field-wise absolute difference.
    pub fn abs_delta(&self, other: &BoxRect) -> BoxRect {
        let d = self.delta(other);
        BoxRect {
            x: d.x.abs(),
            y: d.y.abs(),
            width: d.width.abs(),
            height: d.height.abs(),
        }
    }

    /// Largest component of the rectangle.
    pub fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.width).max(self.height)
    }
}

/// Per-side widths (border or padding), in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

impl Edges {
    pub fn uniform(width: f64) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Border and padding of one element: everything between the border box and
/// the content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxInsets {
    #[serde(default)]
    pub border: Edges,
    #[serde(default)]
    pub padding: Edges,
}

impl BoxInsets {
    pub fn new(border: Edges, padding: Edges) -> Self {
        Self { border, padding }
    }

    /// Offset of the content box origin from the border box origin.
    pub fn offset_left(&self) -> f64 {
        self.border.left + self.padding.left
    }

    pub fn offset_top(&self) -> f64 {
        self.border.top + self.padding.top
    }

    /// Total width removed from the border box.
    pub fn inset_horizontal(&self) -> f64 {
        self.border.horizontal() + self.padding.horizontal()
    }

    pub fn inset_vertical(&self) -> f64 {
        self.border.vertical() + self.padding.vertical()
    }

    /// Border box -> content box. Negative sizes are passed through unchanged.
    pub fn content_from_border(&self, border_box: &BoxRect) -> BoxRect {
        BoxRect {
            x: border_box.x + self.offset_left(),
            y: border_box.y + self.offset_top(),
            width: border_box.width - self.inset_horizontal(),
            height: border_box.height - self.inset_vertical(),
        }
    }

    /// Content box -> border box.
    pub fn border_from_content(&self, content_box: &BoxRect) -> BoxRect {
        BoxRect {
            x: content_box.x - self.offset_left(),
            y: content_box.y - self.offset_top(),
            width: content_box.width + self.inset_horizontal(),
            height: content_box.height + self.inset_vertical(),
        }
    }
}

/// Vertical gap between the bottom of `upper` and the top of `lower`.
///
/// For adjacent block siblings this is the collapsed margin between them.
pub fn vertical_spacing(upper: &BoxRect, lower: &BoxRect) -> f64 {
    lower.y - upper.bottom()
}

