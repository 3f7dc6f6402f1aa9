use std::fmt;

use serde::{Deserialize, Serialize};

use crate::boxmodel::box_model::{BoxInsets, Edges};
use crate::record::matcher::ElementFilter;

// ============================================================================
// Structural selector — `tag[.class]`
// ============================================================================

/// A `tag` or `tag.class` selector.
///
/// The string form doubles as the key of parsed debug dumps, so a table entry
/// addresses both sides of a comparison with one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub tag: String,
    pub class: Option<String>,
}

impl Selector {
    /// Parse `tag` or `tag.class`. The tag is lower-cased; the class is kept
    /// verbatim and may itself contain dots.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.split_once('.') {
            Some((tag, class)) if !class.is_empty() => Self {
                tag: tag.to_lowercase(),
                class: Some(class.to_string()),
            },
            Some((tag, _)) => Self {
                tag: tag.to_lowercase(),
                class: None,
            },
            None => Self {
                tag: raw.to_lowercase(),
                class: None,
            },
        }
    }

    /// Key in the parsed debug dump.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            Some(ref class) => write!(f, "{}.{}", self.tag, class),
            None => write!(f, "{}", self.tag),
        }
    }
}

// ============================================================================
// Box-model table (config-driven)
// ============================================================================

/// Known border/padding for one element of the test page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxModelEntry {
    /// Section title in reports
    pub label: String,

    /// `tag` or `tag.class`
    pub selector: String,

    /// Optional text-content substring to disambiguate elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub border: Edges,

    #[serde(default)]
    pub padding: Edges,
}

impl BoxModelEntry {
    pub fn selector(&self) -> Selector {
        Selector::parse(&self.selector)
    }

    pub fn insets(&self) -> BoxInsets {
        BoxInsets::new(self.border, self.padding)
    }

    /// Filter locating this entry's element in a captured dump.
    pub fn filter(&self) -> ElementFilter {
        let selector = self.selector();
        let mut filter = ElementFilter::new().tag(selector.tag);
        if let Some(class) = selector.class {
            filter = filter.class(class);
        }
        if let Some(ref text) = self.text {
            filter = filter.text(text.clone());
        }
        filter
    }
}

/// Gap expected between two table entries, referenced by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingCheck {
    pub upper: String,
    pub lower: String,

    /// Margin the gap should equal, shown next to the measured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
}

/// Ordered set of known elements plus spacing checks between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxModelTable {
    #[serde(default = "default_entries")]
    pub entries: Vec<BoxModelEntry>,

    #[serde(default = "default_spacing")]
    pub spacing: Vec<SpacingCheck>,
}

impl Default for BoxModelTable {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            spacing: default_spacing(),
        }
    }
}

impl BoxModelTable {
    pub fn entry(&self, label: &str) -> Option<&BoxModelEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// The test page's first heading and its `.block-test` container.
fn default_entries() -> Vec<BoxModelEntry> {
    vec![
        BoxModelEntry {
            label: "First H1".to_string(),
            selector: "h1".to_string(),
            text: Some("ZBrowser功能测试页面".to_string()),
            border: Edges::uniform(2.0),
            padding: Edges::default(),
        },
        BoxModelEntry {
            label: "block-test DIV".to_string(),
            selector: "div.block-test".to_string(),
            text: None,
            border: Edges::uniform(2.0),
            padding: Edges::uniform(15.0),
        },
    ]
}

fn default_spacing() -> Vec<SpacingCheck> {
    vec![SpacingCheck {
        upper: "First H1".to_string(),
        lower: "block-test DIV".to_string(),
        expected: Some(21.44),
    }]
}
