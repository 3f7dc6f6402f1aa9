use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::boxmodel::box_model::BoxRect;
use crate::error::{ProbeError, Result};

// ============================================================================
// Element descriptor — identity of a captured DOM element
// ============================================================================

/// Identity information captured alongside every element.
///
/// Every field is optional in the input. Absent strings read as empty so the
/// matcher never has to care whether a key was present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementDescriptor {
    pub index: Option<u64>,

    #[serde(deserialize_with = "lenient_string")]
    pub tag_name: String,

    /// Space-separated class tokens. SVG elements serialize `className` as an
    /// object; that reads as empty.
    #[serde(deserialize_with = "lenient_string")]
    pub class_name: String,

    #[serde(deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(deserialize_with = "lenient_string")]
    pub text_content: String,

    #[serde(deserialize_with = "lenient_string")]
    pub parent_tag_name: String,

    #[serde(deserialize_with = "lenient_string")]
    pub parent_class_name: String,

    #[serde(deserialize_with = "lenient_string")]
    pub parent_id: String,

    pub child_element_count: Option<u64>,
    pub display: Option<String>,
    pub position: Option<String>,
    pub is_visible: Option<bool>,

    /// Curated computed styles, only present in structured style dumps.
    #[serde(deserialize_with = "lenient_optional_style_map")]
    pub key_styles: Option<BTreeMap<String, String>>,
}

impl ElementDescriptor {
    /// Whitespace-separated class tokens.
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.class_name.split_whitespace()
    }

    /// Short `TAG.first-class#id` label used in summary listings.
    pub fn short_label(&self) -> String {
        let mut label = self.tag_name.clone();
        if let Some(first) = self.class_tokens().next() {
            label.push('.');
            label.push_str(first);
        }
        if !self.id.is_empty() {
            label.push('#');
            label.push_str(&self.id);
        }
        label
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

/// Style maps keep string and numeric values; `null` and other values are
/// dropped as if the property were absent.
fn style_map(value: serde_json::Value) -> Option<BTreeMap<String, String>> {
    let serde_json::Value::Object(map) = value else {
        return None;
    };
    Some(
        map.into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(s) => Some((name, s)),
                serde_json::Value::Number(n) => Some((name, n.to_string())),
                _ => None,
            })
            .collect(),
    )
}

fn lenient_optional_style_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(style_map(serde_json::Value::deserialize(deserializer)?))
}

fn lenient_style_map<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(style_map(serde_json::Value::deserialize(deserializer)?).unwrap_or_default())
}

// ============================================================================
// Rect — getBoundingClientRect() in page and viewport coordinates
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rect {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,

    pub viewport_x: Option<f64>,
    pub viewport_y: Option<f64>,
    pub viewport_top: Option<f64>,
    pub viewport_right: Option<f64>,
    pub viewport_bottom: Option<f64>,
    pub viewport_left: Option<f64>,
}

impl Rect {
    /// The border box in page coordinates, if the four core fields are present.
    pub fn border_box(&self) -> Option<BoxRect> {
        Some(BoxRect {
            x: self.x?,
            y: self.y?,
            width: self.width?,
            height: self.height?,
        })
    }

    /// Checks `width == right - left` and `height == bottom - top`.
    ///
    /// Returns `None` when any of the involved fields is absent.
    pub fn consistent(&self, tolerance: f64) -> Option<bool> {
        let width_ok = (self.right? - self.left? - self.width?).abs() <= tolerance;
        let height_ok = (self.bottom? - self.top? - self.height?).abs() <= tolerance;
        Some(width_ok && height_ok)
    }
}

// ============================================================================
// Records
// ============================================================================

/// One entry of an `element-rects.json` dump.
#[derive(Debug, Clone, Deserialize)]
pub struct RectRecord {
    #[serde(default)]
    pub element: ElementDescriptor,
    #[serde(default)]
    pub rect: Rect,
}

/// One entry of a `computed-styles-structured.json` dump.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleRecord {
    #[serde(default)]
    pub element: ElementDescriptor,
    #[serde(default, deserialize_with = "lenient_style_map")]
    pub styles: BTreeMap<String, String>,
}

impl StyleRecord {
    /// Looks up a key style by its camelCase name (`marginTop`).
    pub fn key_style(&self, name: &str) -> Option<&str> {
        self.element
            .key_styles
            .as_ref()
            .and_then(|styles| styles.get(name))
            .map(String::as_str)
    }
}

/// Shared accessor so the matcher works over both dump kinds.
pub trait HasElement {
    fn element(&self) -> &ElementDescriptor;
}

impl HasElement for RectRecord {
    fn element(&self) -> &ElementDescriptor {
        &self.element
    }
}

impl HasElement for StyleRecord {
    fn element(&self) -> &ElementDescriptor {
        &self.element
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn load_rect_records(path: &Path) -> Result<Vec<RectRecord>> {
    load_json(path)
}

pub fn load_style_records(path: &Path) -> Result<Vec<StyleRecord>> {
    load_json(path)
}

/// Read a whole JSON file and decode it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| ProbeError::read(path, source))?;
    serde_json::from_str(&content).map_err(|source| ProbeError::InvalidJson {
        path: path.display().to_string(),
        source,
    })
}

/// Decode records from JSON already in memory. `origin` names where the text
/// came from in error messages.
pub fn parse_records<T: DeserializeOwned>(json: &str, origin: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| ProbeError::InvalidJson {
        path: origin.to_string(),
        source,
    })
}
