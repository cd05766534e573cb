//! Configuration types and loading

mod loader;

pub use loader::HoardConfig;

use crate::error::{Error, Result};
use crate::kind::SecretKind;
use crate::record::RESOURCE_TYPE_FIELD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of `secret-hoard.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoardConfigFile {
    pub store: StoreSettings,

    /// Per-kind CSV column layout overrides
    pub columns: BTreeMap<SecretKind, Vec<String>>,
}

/// Remote store connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    /// AWS region; the SDK default chain applies when unset
    pub region: Option<String>,

    /// Alternative endpoint, e.g. LocalStack
    pub endpoint_url: Option<String>,
}

impl StoreSettings {
    /// Overlay command-line values on top of file values
    pub fn merge(mut self, region: Option<String>, endpoint_url: Option<String>) -> Self {
        if region.is_some() {
            self.region = region;
        }
        if endpoint_url.is_some() {
            self.endpoint_url = endpoint_url;
        }
        self
    }
}

/// CSV column layout for each kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayouts {
    layouts: BTreeMap<SecretKind, Vec<String>>,
}

impl Default for ColumnLayouts {
    fn default() -> Self {
        let layouts = SecretKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_columns()))
            .collect();
        Self { layouts }
    }
}

impl ColumnLayouts {
    /// Defaults with the given per-kind overrides applied
    pub fn with_overrides(overrides: &BTreeMap<SecretKind, Vec<String>>) -> Result<Self> {
        let mut layouts = Self::default();
        for (kind, columns) in overrides {
            validate_layout(*kind, columns)?;
            layouts.layouts.insert(*kind, columns.clone());
        }
        Ok(layouts)
    }

    /// Column names for a kind, in CSV order
    pub fn layout(&self, kind: SecretKind) -> &[String] {
        self.layouts.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}

fn validate_layout(kind: SecretKind, columns: &[String]) -> Result<()> {
    if columns.first().map(String::as_str) != Some(RESOURCE_TYPE_FIELD) {
        return Err(Error::invalid_config(format!(
            "column layout for {} must start with '{}'",
            kind, RESOURCE_TYPE_FIELD
        )));
    }

    for required in kind.metadata_fields().iter().chain(kind.payload_fields()) {
        if !columns.iter().any(|c| c == required) {
            return Err(Error::invalid_config(format!(
                "column layout for {} is missing '{}'",
                kind, required
            )));
        }
    }

    let mut seen = std::collections::BTreeSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(Error::invalid_config(format!(
                "column layout for {} repeats '{}'",
                kind, column
            )));
        }
    }

    Ok(())
}
