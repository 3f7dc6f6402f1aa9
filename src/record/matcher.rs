use crate::record::record_model::{ElementDescriptor, HasElement};

// ============================================================================
// Element filter — AND of optional criteria
// ============================================================================

/// Criteria for selecting elements from a dump.
///
/// Every criterion is optional and absent criteria always match. Empty
/// strings count as absent, so `h1 '' 'text'` on the command line skips the
/// class filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementFilter {
    /// Case-insensitive tag name
    pub tag: Option<String>,

    /// Exact class token (not a substring of the class attribute)
    pub class: Option<String>,

    /// Substring of the element's text content
    pub text: Option<String>,

    /// Exact id
    pub id: Option<String>,

    /// Substring of the parent's class attribute
    pub parent_class: Option<String>,
}

impl ElementFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = non_empty(tag.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = non_empty(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = non_empty(text.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = non_empty(id.into());
        self
    }

    pub fn parent_class(mut self, parent_class: impl Into<String>) -> Self {
        self.parent_class = non_empty(parent_class.into());
        self
    }

    /// Build from optional positional values as given on the command line.
    pub fn from_parts(tag: Option<&str>, class: Option<&str>, text: Option<&str>) -> Self {
        let mut filter = Self::new();
        if let Some(tag) = tag {
            filter = filter.tag(tag);
        }
        if let Some(class) = class {
            filter = filter.class(class);
        }
        if let Some(text) = text {
            filter = filter.text(text);
        }
        filter
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.class.is_none()
            && self.text.is_none()
            && self.id.is_none()
            && self.parent_class.is_none()
    }

    pub fn matches(&self, element: &ElementDescriptor) -> bool {
        if let Some(ref tag) = self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(ref class) = self.class {
            if !element.class_tokens().any(|token| token == class.as_str()) {
                return false;
            }
        }
        if let Some(ref text) = self.text {
            if !element.text_content.contains(text.as_str()) {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if element.id != *id {
                return false;
            }
        }
        if let Some(ref parent_class) = self.parent_class {
            if !element.parent_class_name.contains(parent_class.as_str()) {
                return false;
            }
        }
        true
    }

    /// All records satisfying the filter, in input order.
    pub fn select<'a, T: HasElement>(&self, records: &'a [T]) -> Vec<&'a T> {
        records
            .iter()
            .filter(|record| self.matches(record.element()))
            .collect()
    }

    /// The first record satisfying the filter.
    pub fn first<'a, T: HasElement>(&self, records: &'a [T]) -> Option<&'a T> {
        records.iter().find(|record| self.matches(record.element()))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
