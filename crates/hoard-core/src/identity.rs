//! Identity model
//!
//! An identity is the kind prefix followed by the kind's metadata values in
//! field order, joined with `/`. It is the only key used to address the
//! remote store and to deduplicate secrets within a batch.

use crate::error::{Error, Result};
use crate::kind::SecretKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Provenance tag attached to every secret this tool writes
pub const SOURCE_TAG: (&str, &str) = ("source", "secret-hoard");

/// Tag key carrying the kind prefix
pub const RESOURCE_TYPE_TAG: &str = "resource_type";

/// Tag set as sent to and read from the remote store
pub type Tags = BTreeMap<String, String>;

/// Kind-specific metadata, values stored in the kind's field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    kind: SecretKind,
    values: Vec<(String, String)>,
}

impl Metadata {
    /// Build metadata for `kind` by looking up each of its fields.
    ///
    /// Every field must be present and non-empty, and no value may contain
    /// `/`, which keeps identities injective.
    pub fn new<F>(kind: SecretKind, mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(kind.metadata_fields().len());
        for field in kind.metadata_fields() {
            let value = lookup(field)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    Error::validation(format!("{} record is missing required field '{}'", kind, field))
                })?;
            if value.contains('/') {
                return Err(Error::validation(format!(
                    "field '{}' must not contain '/': {}",
                    field, value
                )));
            }
            values.push((field.to_string(), value));
        }
        Ok(Self { kind, values })
    }

    pub fn kind(&self) -> SecretKind {
        self.kind
    }

    /// Value of a single metadata field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Field/value pairs in identity order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical identity for this metadata
    pub fn identity(&self) -> Identity {
        identity(self.kind, self)
    }

    /// Tags written alongside the secret: kind, every metadata field, provenance
    pub fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert(RESOURCE_TYPE_TAG.to_string(), self.kind.prefix().to_string());
        for (field, value) in self.iter() {
            tags.insert(field.to_string(), value.to_string());
        }
        tags.insert(SOURCE_TAG.0.to_string(), SOURCE_TAG.1.to_string());
        tags
    }
}

/// Canonical key of a secret in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind encoded in the first path segment
    pub fn kind(&self) -> Result<SecretKind> {
        Self::kind_of(&self.0)
    }

    /// Kind of a raw identity string, e.g. one typed on the command line
    pub fn kind_of(identity: &str) -> Result<SecretKind> {
        SecretKind::from_identity(identity)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Join the kind prefix and ordered metadata values with `/`
pub fn identity(kind: SecretKind, metadata: &Metadata) -> Identity {
    let mut parts = Vec::with_capacity(kind.metadata_fields().len() + 1);
    parts.push(kind.prefix());
    parts.extend(metadata.iter().map(|(_, value)| value));
    Identity(parts.join("/"))
}
