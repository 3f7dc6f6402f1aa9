use std::path::PathBuf;

use boxprobe::record::record_model::{RectRecord, StyleRecord, load_rect_records, load_style_records};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_str(name: &str) -> String {
    fixture(name).display().to_string()
}

pub fn rect_records() -> Vec<RectRecord> {
    load_rect_records(&fixture("element-rects.json")).unwrap()
}

pub fn style_records() -> Vec<StyleRecord> {
    load_style_records(&fixture("computed-styles-structured.json")).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
