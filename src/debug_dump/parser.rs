use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::boxmodel::box_model::BoxRect;

// ============================================================================
// Parsed elements
// ============================================================================

/// One `Content:` line of the engine's debug dump, with the tag and class
/// that were in effect when it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDebugElement {
    /// Tag as written in the dump
    pub tag: String,
    pub class: Option<String>,
    pub content: BoxRect,
}

impl ParsedDebugElement {
    /// `tag` lower-cased, suffixed with `.class` when a class was set.
    pub fn key(&self) -> String {
        match self.class {
            Some(ref class) => format!("{}.{}", self.tag.to_lowercase(), class),
            None => self.tag.to_lowercase(),
        }
    }
}

// ============================================================================
// Line classification
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DebugLine {
    /// `Tag: h1`
    Tag(String),
    /// `Class: block-test`
    Class(String),
    /// `Content: x=20.00, y=61.44, width=921.00, height=46.00`
    Content(BoxRect),
    Other,
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Tag:\s*(\w+)").expect("tag pattern"))
}

fn class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Class:\s*(\S+)").expect("class pattern"))
}

fn content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^Content:\s*x=(-?[\d.]+),\s*y=(-?[\d.]+),\s*width=(-?[\d.]+),\s*height=(-?[\d.]+)",
        )
        .expect("content pattern")
    })
}

/// Classify one line of the dump. Surrounding whitespace is ignored.
pub fn classify_line(raw: &str) -> DebugLine {
    let line = raw.trim();

    if let Some(caps) = tag_re().captures(line) {
        return DebugLine::Tag(caps[1].to_string());
    }
    if let Some(caps) = class_re().captures(line) {
        return DebugLine::Class(caps[1].to_string());
    }
    if let Some(caps) = content_re().captures(line) {
        let values: Result<Vec<f64>, _> = (1..=4).map(|i| caps[i].parse::<f64>()).collect();
        match values {
            Ok(v) => return DebugLine::Content(BoxRect::new(v[0], v[1], v[2], v[3])),
            Err(e) => debug!("skipping malformed content line {:?}: {}", line, e),
        }
    }
    DebugLine::Other
}

// ============================================================================
// Scan state machine
// ============================================================================

/// Scanner state between lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanState {
    /// No `Tag:` line seen yet
    #[default]
    NoTag,
    /// Inside an element block
    InTag { tag: String, class: Option<String> },
}

impl ScanState {
    /// Apply one classified line.
    ///
    /// - `Tag` starts a new element and clears the class.
    /// - `Class` replaces the class of the current element; ignored before any tag.
    /// - `Content` emits an element and leaves the state untouched, so a
    ///   second `Content` line under the same tag produces the same key.
    /// - Everything else is ignored.
    pub fn step(self, line: DebugLine) -> (ScanState, Option<ParsedDebugElement>) {
        match (self, line) {
            (_, DebugLine::Tag(tag)) => (ScanState::InTag { tag, class: None }, None),
            (ScanState::InTag { tag, .. }, DebugLine::Class(class)) => (
                ScanState::InTag {
                    tag,
                    class: Some(class),
                },
                None,
            ),
            (ScanState::InTag { tag, class }, DebugLine::Content(content)) => {
                let element = ParsedDebugElement {
                    tag: tag.clone(),
                    class: class.clone(),
                    content,
                };
                (ScanState::InTag { tag, class }, Some(element))
            }
            (state, _) => (state, None),
        }
    }
}

// ============================================================================
// Parsed dump
// ============================================================================

/// Every element read from a dump, in order, plus a last-wins view by key.
#[derive(Debug, Clone, Default)]
pub struct DebugDump {
    entries: Vec<ParsedDebugElement>,
    by_key: BTreeMap<String, usize>,
    overwritten: Vec<String>,
}

impl DebugDump {
    fn push(&mut self, element: ParsedDebugElement) {
        let key = element.key();
        let index = self.entries.len();
        self.entries.push(element);
        if self.by_key.insert(key.clone(), index).is_some() {
            debug!("debug output: duplicate element key '{}', keeping the later one", key);
            self.overwritten.push(key);
        }
    }

    /// Element stored under `key` (last one wins on duplicates).
    pub fn get(&self, key: &str) -> Option<&ParsedDebugElement> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    /// All elements in input order, duplicates included.
    pub fn entries(&self) -> &[ParsedDebugElement] {
        &self.entries
    }

    /// Keys that were written more than once, once per overwrite.
    pub fn overwritten(&self) -> &[String] {
        &self.overwritten
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// The class-less element with this tag closest to the top of the page.
    pub fn topmost_unclassed(&self, tag: &str) -> Option<&ParsedDebugElement> {
        self.entries
            .iter()
            .filter(|e| e.class.is_none() && e.tag.eq_ignore_ascii_case(tag))
            .min_by(|a, b| a.content.y.total_cmp(&b.content.y))
    }
}

/// Parse the full text of an engine debug dump.
pub fn parse_debug_output(text: &str) -> DebugDump {
    let mut dump = DebugDump::default();
    let mut state = ScanState::NoTag;

    for line in text.lines() {
        let (next, emitted) = state.step(classify_line(line));
        state = next;
        if let Some(element) = emitted {
            dump.push(element);
        }
    }

    debug!(
        "debug output: {} elements, {} distinct keys",
        dump.entries.len(),
        dump.len()
    );
    dump
}
