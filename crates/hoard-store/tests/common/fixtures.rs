//! Fixture paths and record builders
//!
//! Certificate material is shared with hoard-core's fixture directory.

use hoard_core::FieldRecord;
use std::path::{Path, PathBuf};

/// sha256 of `hello.txt`
pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// Get the path to the shared fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("hoard-core")
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Load a fixture file as a string
pub fn load_fixture(filename: &str) -> String {
    let path = fixtures_dir().join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}': {}", path.display(), e))
}

pub fn rds_record(password: &str) -> FieldRecord {
    FieldRecord::new()
        .with("resource_type", "rdspostgres")
        .with("environment", "dev")
        .with("instance", "db1")
        .with("database", "app")
        .with("access", "readonly")
        .with("password", password)
        .with("engine", "postgres")
        .with("port", "5432")
        .with("db_instance_identifier", "db1")
        .with("host", "db1.internal")
        .with("username", "reader")
}

pub fn text_record(environment: &str, access: &str, path: &Path) -> FieldRecord {
    FieldRecord::new()
        .with("resource_type", "text_file")
        .with("environment", environment)
        .with("access", access)
        .with("file_path", path.to_string_lossy())
}

pub fn json_record(environment: &str, access: &str, path: &str) -> FieldRecord {
    FieldRecord::new()
        .with("resource_type", "jsondoc")
        .with("environment", environment)
        .with("access", access)
        .with("file_path", path)
}

pub fn cert_record(cert: &str, key: &str) -> FieldRecord {
    FieldRecord::new()
        .with("resource_type", "ssl_certificate")
        .with("environment", "prod")
        .with("common_name", "app.example.com")
        .with("certificate_file", fixture_path(cert))
        .with("private_key_file", fixture_path(key))
}
