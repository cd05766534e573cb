//! Reconciliation engine
//!
//! Probes the store for an identity and either creates the secret, updates
//! it (value, then tags) or leaves it alone when overwriting is off.

use crate::store::{SecretStore, StoreError};
use hoard_core::{Error, Identity, Result, Secret, Tags};
use std::fmt;
use tracing::{debug, error, info, warn};

/// Anything that can be written to the store under a stable identity
pub trait Reconcilable {
    fn identity(&self) -> Identity;

    fn tags(&self) -> Tags;

    fn serialized_value(&self) -> Result<String>;
}

impl Reconcilable for Secret {
    fn identity(&self) -> Identity {
        Secret::identity(self)
    }

    fn tags(&self) -> Tags {
        Secret::tags(self)
    }

    fn serialized_value(&self) -> Result<String> {
        Secret::serialized_value(self)
    }
}

/// Whether an identity exists remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    Absent,
    Present,
}

/// What a reconcile call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created => write!(f, "created"),
            Outcome::Updated => write!(f, "updated"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Create-or-update against one store
pub struct Reconciler<'a, S: SecretStore + ?Sized> {
    store: &'a S,
    overwrite: bool,
}

impl<'a, S: SecretStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S, overwrite: bool) -> Self {
        Self { store, overwrite }
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Probe the store. Only `not found` means absent; any other failure is
    /// returned rather than guessed at.
    pub async fn state(&self, identity: &Identity) -> Result<RemoteState> {
        match self.store.describe(identity.as_str()).await {
            Ok(_) => Ok(RemoteState::Present),
            Err(StoreError::NotFound) => Ok(RemoteState::Absent),
            Err(e) => {
                error!(identity = %identity, error = %e, "existence probe failed");
                Err(Error::remote(format!("{}: existence probe failed: {}", identity, e)))
            }
        }
    }

    pub async fn exists(&self, identity: &Identity) -> Result<bool> {
        Ok(self.state(identity).await? == RemoteState::Present)
    }

    /// Bring the remote entry for `item` in line with it
    pub async fn reconcile<R>(&self, item: &R) -> Result<Outcome>
    where
        R: Reconcilable + ?Sized,
    {
        let identity = item.identity();
        let value = item.serialized_value().inspect_err(|e| {
            error!(identity = %identity, error = %e, "failed to serialize secret");
        })?;

        match self.state(&identity).await? {
            RemoteState::Absent => {
                self.store
                    .create(identity.as_str(), &value, &item.tags())
                    .await
                    .map_err(|e| {
                        error!(identity = %identity, error = %e, "failed to create secret");
                        e.into_error(identity.as_str())
                    })?;
                info!(identity = %identity, "secret created successfully");
                Ok(Outcome::Created)
            }
            RemoteState::Present if !self.overwrite => {
                debug!(identity = %identity, "secret exists and overwrite is off, skipping");
                Ok(Outcome::Skipped)
            }
            RemoteState::Present => {
                self.store
                    .update_value(identity.as_str(), &value)
                    .await
                    .map_err(|e| {
                        error!(identity = %identity, error = %e, "failed to update secret value");
                        e.into_error(identity.as_str())
                    })?;

                // The value is already replaced at this point, there is no rollback
                if let Err(e) = self.store.update_tags(identity.as_str(), &item.tags()).await {
                    warn!(identity = %identity, error = %e, "value updated but tags are stale");
                    return Err(Error::remote(format!(
                        "{}: value updated but tags are stale: {}",
                        identity, e
                    )));
                }

                info!(identity = %identity, "secret updated successfully");
                Ok(Outcome::Updated)
            }
        }
    }
}
