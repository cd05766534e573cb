//! Normalized field records
//!
//! A field record is the string-keyed row the secret builder consumes. How
//! the row was obtained (CSV, tests, another tool) does not matter here.

use crate::error::{Error, Result};
use crate::kind::SecretKind;
use std::collections::BTreeMap;

/// Column designating the record kind
pub const RESOURCE_TYPE_FIELD: &str = "resource_type";

/// One normalized input record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: BTreeMap<String, String>,
    /// 1-based source line, when the record came from a file
    line: Option<u64>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Value of a field that must be present and non-blank.
    ///
    /// The value is returned exactly as given, surrounding whitespace included.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::validation(format!("record is missing required field '{}'", field)))
    }

    /// Declared kind of this record
    pub fn kind(&self) -> Result<SecretKind> {
        self.require(RESOURCE_TYPE_FIELD)?.parse()
    }

    /// Header rows repeat the column names; the first column reads `ResourceType`
    pub fn is_header(&self) -> bool {
        self.get(RESOURCE_TYPE_FIELD)
            .map(is_header_value)
            .unwrap_or(false)
    }

    /// Short description for log lines, never includes field values other than kind
    pub fn describe(&self) -> String {
        let kind = self.get(RESOURCE_TYPE_FIELD).unwrap_or("<unknown>");
        match self.line {
            Some(line) => format!("{} record at line {}", kind, line),
            None => format!("{} record", kind),
        }
    }
}

/// Whether a first-column value marks a header row
pub fn is_header_value(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    lowered == "resourcetype" || lowered == "resource_type"
}
