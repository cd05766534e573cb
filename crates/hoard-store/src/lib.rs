//! # hoard-store
//!
//! Remote side of secret-hoard:
//! - `SecretStore` trait and the AWS Secrets Manager implementation
//! - Reconciliation (create, update or skip) and batch upload
//! - Download with checksum re-verification
//! - Tag queries and purge

pub mod aws;
pub mod download;
pub mod query;
pub mod reconcile;
pub mod store;
pub mod upload;

pub use aws::AwsSecretStore;
pub use download::Downloader;
pub use query::{matching, parse_filter, purge};
pub use reconcile::{Outcome, Reconcilable, Reconciler, RemoteState};
pub use store::{EntrySummary, ListPage, SecretStore, StoreError, StoreResult};
pub use upload::{upload, UploadReport};
