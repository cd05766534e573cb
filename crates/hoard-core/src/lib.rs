//! # hoard-core
//!
//! Core library for secret-hoard providing:
//! - Secret kinds, identities and tags
//! - Field records and the CSV record source
//! - The secret builder, including the certificate/key cross-check
//! - SHA-256 checksums for integrity verification
//! - Configuration file parsing (secret-hoard.yaml)

pub mod builder;
pub mod checksum;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod identity;
pub mod kind;
pub mod payload;
pub mod record;
pub mod secret;
pub mod tls;
pub mod utils;

pub use builder::SecretBuilder;
pub use config::{ColumnLayouts, HoardConfig, StoreSettings};
pub use csv_source::CsvRecordSource;
pub use error::{Error, Result};
pub use identity::{identity, Identity, Metadata, Tags};
pub use kind::SecretKind;
pub use payload::Payload;
pub use record::FieldRecord;
pub use secret::Secret;
pub use utils::get_home_dir;
