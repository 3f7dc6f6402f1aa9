use std::path::Path;

use log::{info, warn};

use crate::cli::config::AppConfig;
use crate::compare::box_compare::{BoxInfo, compare_boxes};
use crate::debug_dump::parser::parse_debug_output;
use crate::error::{ProbeError, Result};
use crate::record::matcher::ElementFilter;
use crate::record::record_model::{load_json, load_rect_records, load_style_records};
use crate::report::console::{
    format_analysis, format_box_comparison, format_comparison, format_rect_listing,
    format_style_record,
};
use crate::report::report_model::{AnalysisReport, ComparisonReport};

// ============================================================================
// rects subcommand
// ============================================================================

pub fn cmd_rects(json: &str, filter: &ElementFilter, config: &AppConfig) -> Result<()> {
    let records = load_rect_records(Path::new(json))?;
    info!("loaded {} rect records from {}", records.len(), json);

    let filtered = !filter.is_empty();
    let selected: Vec<_> = if filtered {
        filter.select(&records)
    } else {
        records.iter().collect()
    };

    print!(
        "{}",
        format_rect_listing(records.len(), &selected, filtered, config.rects.summary_limit)
    );
    Ok(())
}

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(json: &str, config: &AppConfig) -> Result<()> {
    let records = load_rect_records(Path::new(json))?;
    info!("loaded {} rect records from {}", records.len(), json);

    let report = AnalysisReport::from_records(&records, &config.box_model);
    print!("{}", format_analysis(&report));
    Ok(())
}

// ============================================================================
// compare subcommand
// ============================================================================

pub fn cmd_compare(json: &str, debug_output: Option<&str>, config: &AppConfig) -> Result<()> {
    let records = load_rect_records(Path::new(json))?;
    let text = read_debug_output(debug_output)?;

    let dump = parse_debug_output(&text);
    info!(
        "parsed {} engine elements ({} keys)",
        dump.entries().len(),
        dump.len()
    );
    if !dump.overwritten().is_empty() {
        warn!(
            "{} duplicate keys in debug output; keyed lookups use the last occurrence",
            dump.overwritten().len()
        );
    }

    let report = ComparisonReport::build(&records, &dump, &config.box_model);
    print!("{}", format_comparison(&report));
    Ok(())
}

/// Read the debug dump from a file, or from stdin when no path is given.
pub fn read_debug_output(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| ProbeError::read(Path::new(p), e)),
        None => {
            info!("reading engine debug output from stdin");
            std::io::read_to_string(std::io::stdin()).map_err(ProbeError::ReadStdin)
        }
    }
}

// ============================================================================
// styles subcommand
// ============================================================================

pub fn cmd_styles(json: &str, filter: &ElementFilter) -> Result<()> {
    let records = load_style_records(Path::new(json))?;
    println!("Total elements: {}", records.len());

    if !filter.is_empty() {
        let matches = filter.select(&records);
        if matches.is_empty() {
            println!("No elements found matching criteria.");
        }
        for record in matches {
            print!("{}", format_style_record(record));
        }
        return Ok(());
    }

    // Walkthrough of the block-test container and its children.
    let sections: [(&str, ElementFilter, bool); 4] = [
        (
            "Finding block-test div...",
            ElementFilter::new().tag("DIV").class("block-test"),
            false,
        ),
        (
            "Finding h1 inside block-test...",
            ElementFilter::new().tag("H1").parent_class("block-test"),
            false,
        ),
        (
            "Finding p elements inside block-test...",
            ElementFilter::new().tag("P").parent_class("block-test"),
            true,
        ),
        (
            "Finding div inside block-test...",
            ElementFilter::new().tag("DIV").parent_class("block-test"),
            false,
        ),
    ];

    for (heading, section_filter, all) in &sections {
        println!("\n{}", "=".repeat(50));
        println!("{}", heading);
        let matches = section_filter.select(&records);
        if matches.is_empty() {
            println!("not found");
        }
        let shown = if *all { matches.len() } else { 1 };
        for record in matches.iter().take(shown) {
            print!("{}", format_style_record(record));
        }
    }

    Ok(())
}

// ============================================================================
// boxes subcommand
// ============================================================================

/// Compare two box-info captures and write the result as JSON. Returns
/// whether both boxes matched.
pub fn cmd_boxes(engine: &str, chrome: &str, output: &str, config: &AppConfig) -> Result<bool> {
    let engine_box: BoxInfo = load_json(Path::new(engine))?;
    let chrome_box: BoxInfo = load_json(Path::new(chrome))?;

    let comparison = compare_boxes(&engine_box, &chrome_box, config.compare.tolerance);

    let json = serde_json::to_string_pretty(&comparison).map_err(|source| {
        ProbeError::JsonSerialize {
            context: "box comparison".to_string(),
            source,
        }
    })?;
    std::fs::write(output, json).map_err(|source| ProbeError::WriteFile {
        path: output.to_string(),
        source,
    })?;

    print!("{}", format_box_comparison(&comparison, output));
    Ok(comparison.all_match())
}

// ============================================================================
// Usage
// ============================================================================

/// Usage text with invocation examples, for one subcommand or all of them.
pub fn usage(command: Option<&str>) -> String {
    let rects = "Usage: boxprobe rects <element-rects.json> [tag_name] [class_name] [text_content]\n\
        \nExamples:\n  \
        boxprobe rects element-rects.json\n  \
        boxprobe rects element-rects.json h1\n  \
        boxprobe rects element-rects.json div block-test\n  \
        boxprobe rects element-rects.json h1 '' 'ZBrowser功能测试页面'\n";
    let analyze = "Usage: boxprobe analyze <element-rects.json>\n";
    let compare = "Usage: boxprobe compare <element-rects.json> [debug_output.txt]\n\
        \nWithout debug_output.txt the engine output is read from stdin.\n";
    let styles = "Usage: boxprobe styles <computed-styles-structured.json> [tag_name] [class_name] [parent_class]\n";
    let boxes = "Usage: boxprobe boxes <engine_box.json> <chrome_box.json> <output.json>\n";

    match command {
        Some("rects") => rects.to_string(),
        Some("analyze") => analyze.to_string(),
        Some("compare") => compare.to_string(),
        Some("styles") => styles.to_string(),
        Some("boxes") => boxes.to_string(),
        _ => format!(
            "Usage: boxprobe [-v] [--config <boxprobe.yaml>] <command> <args...>\n\n{}\n{}\n{}\n{}\n{}",
            rects, analyze, compare, styles, boxes
        ),
    }
}

/// Subcommand named in raw arguments, skipping the binary name and flags.
pub fn requested_command(args: &[String]) -> Option<&str> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            iter.next();
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(arg.as_str());
    }
    None
}

