//! Kind-specific payloads
//!
//! Payloads are serialized to JSON (camelCase keys) and stored as the secret
//! string. Anything carrying credentials or key material is zeroed on drop
//! and redacted from `Debug` output.

use crate::error::{Error, Result};
use crate::kind::SecretKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Connection data for an RDS Postgres user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct RdsPostgresPayload {
    pub password: String,
    pub engine: String,
    pub port: u16,
    pub db_instance_identifier: String,
    pub host: String,
    pub username: String,
}

impl fmt::Debug for RdsPostgresPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RdsPostgresPayload")
            .field("password", &"[REDACTED]")
            .field("engine", &self.engine)
            .field("port", &self.port)
            .field("db_instance_identifier", &self.db_instance_identifier)
            .field("host", &self.host)
            .field("username", &self.username)
            .finish()
    }
}

/// Connection data for a Snowflake user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakePayload {
    pub password: String,
    pub account_name: String,
    pub warehouse: String,
    pub username: String,
}

impl fmt::Debug for SnowflakePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakePayload")
            .field("password", &"[REDACTED]")
            .field("account_name", &self.account_name)
            .field("warehouse", &self.warehouse)
            .field("username", &self.username)
            .finish()
    }
}

/// TLS certificate and private key with their checksums
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    /// Certificate file contents
    pub certificate: String,
    /// Private key file contents
    #[serde(rename = "key")]
    pub private_key: String,
    /// `notAfter` in RFC 3339
    pub expiration_date: String,
    /// Decimal RSA modulus shared by certificate and key
    pub modulus: String,
    pub certificate_sha256: String,
    pub private_key_sha256: String,
}

impl fmt::Debug for CertificatePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificatePayload")
            .field("certificate", &format!("[{} bytes]", self.certificate.len()))
            .field("private_key", &"[REDACTED]")
            .field("expiration_date", &self.expiration_date)
            .field("certificate_sha256", &self.certificate_sha256)
            .field("private_key_sha256", &self.private_key_sha256)
            .finish_non_exhaustive()
    }
}

/// Raw document contents plus the checksum of the source file
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub contents: String,
    pub sha256_sum: String,
}

impl fmt::Debug for DocumentPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DocumentPayload([REDACTED {} bytes], sha256={})",
            self.contents.len(),
            self.sha256_sum
        )
    }
}

/// Payload of a secret, one variant per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    RdsPostgres(RdsPostgresPayload),
    Snowflake(SnowflakePayload),
    SslCertificate(CertificatePayload),
    TextFile(DocumentPayload),
    JsonDocument(DocumentPayload),
}

impl Payload {
    pub fn kind(&self) -> SecretKind {
        match self {
            Payload::RdsPostgres(_) => SecretKind::RdsPostgres,
            Payload::Snowflake(_) => SecretKind::Snowflake,
            Payload::SslCertificate(_) => SecretKind::SslCertificate,
            Payload::TextFile(_) => SecretKind::TextFile,
            Payload::JsonDocument(_) => SecretKind::JsonDocument,
        }
    }

    /// Serialized secret string
    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Payload::RdsPostgres(p) => serde_json::to_string(p),
            Payload::Snowflake(p) => serde_json::to_string(p),
            Payload::SslCertificate(p) => serde_json::to_string(p),
            Payload::TextFile(p) | Payload::JsonDocument(p) => serde_json::to_string(p),
        };
        json.map_err(|e| Error::format(format!("failed to serialize {} payload: {}", self.kind(), e)))
    }

    /// Reconstruct a payload from the store's serialized value
    pub fn from_json(kind: SecretKind, value: &str) -> Result<Self> {
        let parsed = match kind {
            SecretKind::RdsPostgres => serde_json::from_str(value).map(Payload::RdsPostgres),
            SecretKind::Snowflake => serde_json::from_str(value).map(Payload::Snowflake),
            SecretKind::SslCertificate => serde_json::from_str(value).map(Payload::SslCertificate),
            SecretKind::TextFile => serde_json::from_str(value).map(Payload::TextFile),
            SecretKind::JsonDocument => serde_json::from_str(value).map(Payload::JsonDocument),
        };
        parsed.map_err(|e| Error::format(format!("stored {} payload is malformed: {}", kind, e)))
    }
}
