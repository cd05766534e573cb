//! Built secrets

use crate::error::Result;
use crate::identity::{Identity, Metadata, Tags};
use crate::kind::SecretKind;
use crate::payload::Payload;

/// A validated secret, ready to reconcile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    metadata: Metadata,
    payload: Payload,
}

impl Secret {
    /// Pair metadata and payload; the builder guarantees their kinds agree
    pub(crate) fn new(metadata: Metadata, payload: Payload) -> Self {
        debug_assert_eq!(metadata.kind(), payload.kind());
        Self { metadata, payload }
    }

    pub fn kind(&self) -> SecretKind {
        self.metadata.kind()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn identity(&self) -> Identity {
        self.metadata.identity()
    }

    pub fn tags(&self) -> Tags {
        self.metadata.tags()
    }

    /// Value written to the remote store
    pub fn serialized_value(&self) -> Result<String> {
        self.payload.to_json()
    }
}
