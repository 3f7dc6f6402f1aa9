use clap::{Parser, Subcommand};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::boxmodel::table::BoxModelTable;
use crate::compare::box_compare::DEFAULT_TOLERANCE;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "boxprobe",
    version,
    about = "Compare a browser engine's box-model layout against Chrome rect dumps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: boxprobe.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print element rects, optionally filtered
    Rects {
        /// element-rects.json captured from Chrome
        json: String,

        /// Tag name (case-insensitive)
        tag: Option<String>,

        /// Class token
        class: Option<String>,

        /// Text content substring
        text: Option<String>,
    },

    /// Derive content boxes and spacing for the known test-page elements
    Analyze {
        /// element-rects.json captured from Chrome
        json: String,
    },

    /// Compare Chrome rects with the engine's debug output
    Compare {
        /// element-rects.json captured from Chrome
        json: String,

        /// Engine debug output (default: stdin)
        debug_output: Option<String>,
    },

    /// Print key computed styles from a structured style dump
    Styles {
        /// computed-styles-structured.json captured from Chrome
        json: String,

        /// Tag name (case-insensitive)
        tag: Option<String>,

        /// Class token
        class: Option<String>,

        /// Parent class substring
        parent_class: Option<String>,
    },

    /// Compare two box-info JSON files within a pixel tolerance
    Boxes {
        /// Box info from the engine under test
        engine: String,

        /// Box info from Chrome
        chrome: String,

        /// Where to write the comparison JSON
        output: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `boxprobe.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub box_model: BoxModelTable,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub rects: RectsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Maximum per-field difference (px) for two boxes to match
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectsConfig {
    /// Records summarized when `rects` runs without filters
    #[serde(default = "default_ten")]
    pub summary_limit: usize,
}

impl Default for RectsConfig {
    fn default() -> Self {
        Self { summary_limit: 10 }
    }
}

// Serde default helpers
fn default_tolerance() -> f64 { DEFAULT_TOLERANCE }
fn default_ten() -> usize { 10 }

// ============================================================================
// Config File Loading
// ============================================================================

pub const DEFAULT_CONFIG_PATH: &str = "boxprobe.yaml";

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content).unwrap_or_else(|e| {
            warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(e) => {
            if path.is_some() {
                warn!("could not read config '{}': {}", config_path, e);
            }
            AppConfig::default()
        }
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, serde_yaml::Error> {
    serde_yaml::from_str(content)
}
