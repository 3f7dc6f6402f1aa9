//! Box-model layout debugging against Chrome `getBoundingClientRect()` dumps.
//!
//! Loads element rect and computed-style dumps, selects elements, converts
//! between border and content boxes, parses the engine's plain-text debug
//! output and reports the differences.

pub mod boxmodel;
pub mod cli;
pub mod compare;
pub mod debug_dump;
pub mod error;
pub mod record;
pub mod report;
