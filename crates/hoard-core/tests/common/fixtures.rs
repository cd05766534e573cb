//! Test fixture loading helpers

use hoard_core::{ColumnLayouts, CsvRecordSource, FieldRecord, Result};
use std::path::PathBuf;

/// sha256 of `fixtures/server.crt`
pub const SERVER_CRT_SHA256: &str =
    "988a64d1cd397c888eff2c2922d3f6137465c2d2fe28c138557a2272927d5bbf";

/// sha256 of `fixtures/server.key`
pub const SERVER_KEY_SHA256: &str =
    "ad59bc847bf9049672490b092cc189f8cc6648b6df4df70264165559e99ce6cc";

/// sha256 of `fixtures/hello.txt`
pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file as a string
pub fn load_fixture(filename: &str) -> String {
    let path = fixtures_dir().join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}': {}", path.display(), e))
}

/// Read a sample CSV with the default column layouts
pub fn load_sample(name: &str) -> Vec<Result<FieldRecord>> {
    let path = fixtures_dir().join("samples").join(name);
    CsvRecordSource::from_path(&path, &ColumnLayouts::default())
        .unwrap_or_else(|e| panic!("Failed to read sample '{}': {}", path.display(), e))
        .into_iter()
        .collect()
}

/// The single data row of a sample CSV
pub fn load_single_record(name: &str) -> FieldRecord {
    let mut rows = load_sample(name);
    assert_eq!(rows.len(), 1, "{} should hold exactly one data row", name);
    rows.remove(0)
        .unwrap_or_else(|e| panic!("row of '{}' failed to map: {}", name, e))
}
