//! Remote secret store capability
//!
//! Everything above this trait talks to the store only through these
//! operations, so the AWS client can be swapped for an in-memory fake or a
//! mock in tests.

use async_trait::async_trait;
use hoard_core::{Error, Tags};
use thiserror::Error;

/// Store-level failure, classified just enough for the callers to branch on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("secret not found")]
    NotFound,

    #[error("secret already exists")]
    Conflict,

    #[error("{0}")]
    Remote(String),
}

impl StoreError {
    /// Attach the identity the failing call was about
    pub fn into_error(self, identity: &str) -> Error {
        match self {
            StoreError::NotFound => Error::not_found(identity),
            StoreError::Conflict => Error::conflict(identity),
            StoreError::Remote(message) => Error::remote(format!("{}: {}", identity, message)),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Name and tags of a stored secret, without its value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySummary {
    pub name: String,
    pub tags: Tags,
}

/// One page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub entries: Vec<EntrySummary>,
    /// Present when more pages follow
    pub next_token: Option<String>,
}

/// Operations the reconciliation, download and query code needs from a store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Metadata of a single secret; `NotFound` when absent
    async fn describe(&self, identity: &str) -> StoreResult<EntrySummary>;

    /// Create a new secret; `Conflict` when the name is taken
    async fn create(&self, identity: &str, value: &str, tags: &Tags) -> StoreResult<()>;

    /// Replace the value of an existing secret
    async fn update_value(&self, identity: &str, value: &str) -> StoreResult<()>;

    /// Add or overwrite tags on an existing secret
    async fn update_tags(&self, identity: &str, tags: &Tags) -> StoreResult<()>;

    /// Current value of a secret
    async fn get_value(&self, identity: &str) -> StoreResult<String>;

    /// Delete a secret, skipping the recovery window when `force` is set
    async fn delete(&self, identity: &str, force: bool) -> StoreResult<()>;

    /// One page of all secrets visible to the caller
    async fn list_page(&self, next_token: Option<String>) -> StoreResult<ListPage>;
}
