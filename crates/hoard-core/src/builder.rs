//! Secret builder
//!
//! Turns a field record into a validated [`Secret`]. File-backed kinds read
//! their sources here and checksum the raw bytes; the builder never talks to
//! the remote store.

use crate::checksum::sha256_hex;
use crate::error::{Error, Result};
use crate::identity::Metadata;
use crate::kind::SecretKind;
use crate::payload::{CertificatePayload, DocumentPayload, Payload, RdsPostgresPayload, SnowflakePayload};
use crate::record::FieldRecord;
use crate::secret::Secret;
use crate::tls;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Builds secrets from field records
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretBuilder;

impl SecretBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Validate a record and assemble its secret
    pub fn build(&self, record: &FieldRecord) -> Result<Secret> {
        let kind = record.kind()?;
        let metadata = Metadata::new(kind, |field| record.get(field).map(str::to_string))?;

        let payload = match kind {
            SecretKind::RdsPostgres => Payload::RdsPostgres(rds_postgres(record)?),
            SecretKind::Snowflake => Payload::Snowflake(snowflake(record, &metadata)?),
            SecretKind::SslCertificate => Payload::SslCertificate(certificate(record)?),
            SecretKind::TextFile => Payload::TextFile(document(record, false)?),
            SecretKind::JsonDocument => Payload::JsonDocument(document(record, true)?),
        };

        let secret = Secret::new(metadata, payload);
        debug!(identity = %secret.identity(), kind = %kind, "built secret");
        Ok(secret)
    }
}

fn rds_postgres(record: &FieldRecord) -> Result<RdsPostgresPayload> {
    let port = record.require("port")?.trim();
    let port = port
        .parse::<u16>()
        .map_err(|_| Error::validation(format!("port must be an integer, got '{}'", port)))?;

    Ok(RdsPostgresPayload {
        password: record.require("password")?.to_string(),
        engine: record.require("engine")?.to_string(),
        port,
        db_instance_identifier: record.require("db_instance_identifier")?.to_string(),
        host: record.require("host")?.to_string(),
        username: record.require("username")?.to_string(),
    })
}

fn snowflake(record: &FieldRecord, metadata: &Metadata) -> Result<SnowflakePayload> {
    Ok(SnowflakePayload {
        password: record.require("password")?.to_string(),
        account_name: record.require("account_name")?.to_string(),
        warehouse: metadata.get("warehouse").unwrap_or_default().to_string(),
        username: record.require("username")?.to_string(),
    })
}

fn document(record: &FieldRecord, require_json: bool) -> Result<DocumentPayload> {
    let path = Path::new(record.require("file_path")?.trim());
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let sha256_sum = sha256_hex(&bytes);
    let contents = utf8(path, bytes)?;

    if require_json {
        serde_json::from_str::<serde_json::Value>(&contents).map_err(|e| {
            Error::format(format!("{} is not valid JSON: {}", path.display(), e))
        })?;
    }

    Ok(DocumentPayload { contents, sha256_sum })
}

fn certificate(record: &FieldRecord) -> Result<CertificatePayload> {
    let cert_path = Path::new(record.require("certificate_file")?.trim());
    let key_path = Path::new(record.require("private_key_file")?.trim());

    let cert_bytes = fs::read(cert_path).map_err(|e| Error::io(cert_path, e))?;
    let key_bytes = fs::read(key_path).map_err(|e| Error::io(key_path, e))?;
    let certificate_sha256 = sha256_hex(&cert_bytes);
    let private_key_sha256 = sha256_hex(&key_bytes);
    let certificate = utf8(cert_path, cert_bytes)?;
    let private_key = utf8(key_path, key_bytes)?;

    let info = tls::check_key_pair(certificate.as_bytes(), &private_key)?;

    Ok(CertificatePayload {
        certificate,
        private_key,
        expiration_date: info.expiration_date,
        modulus: info.modulus,
        certificate_sha256,
        private_key_sha256,
    })
}

fn utf8(path: &Path, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| Error::format(format!("{} is not valid UTF-8", path.display())))
}
