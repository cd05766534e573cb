//! Download and verification pipeline
//!
//! Fetches a secret by identity and writes its artifacts to disk. File-backed
//! kinds are re-hashed after writing; a mismatch fails the download but the
//! written file is left in place for inspection.

use crate::store::SecretStore;
use hoard_core::checksum::verify_file;
use hoard_core::payload::{CertificatePayload, DocumentPayload};
use hoard_core::{Error, Identity, Payload, Result, SecretKind};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use zeroize::Zeroizing;

/// Suffix appended to the destination for the certificate file
pub const CERTIFICATE_SUFFIX: &str = ".crt";

/// Suffix appended to the destination for the private key file
pub const PRIVATE_KEY_SUFFIX: &str = ".key";

/// Retrieves secrets from one store
pub struct Downloader<'a, S: SecretStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SecretStore + ?Sized> Downloader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch `identity` and write it under `destination`.
    ///
    /// Returns every path written, in write order.
    pub async fn download(&self, identity: &str, destination: &Path) -> Result<Vec<PathBuf>> {
        let kind = Identity::kind_of(identity).inspect_err(|e| {
            error!(identity, error = %e, "cannot download secret of unknown kind");
        })?;

        let value = self.store.get_value(identity).await.map_err(|e| {
            error!(identity, error = %e, "failed to fetch secret value");
            e.into_error(identity)
        })?;

        let written = write_artifacts(identity, kind, &value, destination)
            .await
            .inspect_err(|e| {
                error!(identity, error = %e, "failed to write secret");
            })?;

        for path in &written {
            info!(identity, path = %path.display(), "secret written");
        }
        Ok(written)
    }
}

async fn write_artifacts(
    identity: &str,
    kind: SecretKind,
    value: &str,
    destination: &Path,
) -> Result<Vec<PathBuf>> {
    match kind {
        SecretKind::RdsPostgres | SecretKind::Snowflake => {
            write_file(destination, value, None).await?;
            Ok(vec![destination.to_path_buf()])
        }
        _ => match Payload::from_json(kind, value)? {
            Payload::TextFile(doc) | Payload::JsonDocument(doc) => {
                write_document(&doc, destination).await
            }
            Payload::SslCertificate(cert) => write_certificate(&cert, destination).await,
            Payload::RdsPostgres(_) | Payload::Snowflake(_) => Err(Error::format(format!(
                "{}: stored payload does not match its kind",
                identity
            ))),
        },
    }
}

async fn write_document(doc: &DocumentPayload, destination: &Path) -> Result<Vec<PathBuf>> {
    write_file(destination, &doc.contents, Some(&doc.sha256_sum)).await?;
    Ok(vec![destination.to_path_buf()])
}

async fn write_certificate(cert: &CertificatePayload, destination: &Path) -> Result<Vec<PathBuf>> {
    let cert_path = with_suffix(destination, CERTIFICATE_SUFFIX);
    write_file(&cert_path, &cert.certificate, Some(&cert.certificate_sha256)).await?;

    let key_path = with_suffix(destination, PRIVATE_KEY_SUFFIX);
    write_file(&key_path, &cert.private_key, Some(&cert.private_key_sha256)).await?;

    Ok(vec![cert_path, key_path])
}

/// Write contents and, when a digest is given, re-hash what actually landed on disk
async fn write_file(path: &Path, contents: &str, expected_sha256: Option<&str>) -> Result<()> {
    let path = path.to_path_buf();
    let contents = Zeroizing::new(contents.as_bytes().to_vec());
    let expected = expected_sha256.map(str::to_string);

    tokio::task::spawn_blocking(move || {
        fs::write(&path, contents.as_slice()).map_err(|e| Error::io(&path, e))?;
        match expected {
            Some(expected) => verify_file(&path, &expected),
            None => Ok(()),
        }
    })
    .await
    .map_err(|e| Error::remote(format!("write task failed: {}", e)))?
}

/// `dest` + `suffix`, appended to the whole path rather than replacing an extension
fn with_suffix(dest: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(dest.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix_appends() {
        assert_eq!(
            with_suffix(Path::new("/tmp/out/app.example.com"), ".crt"),
            PathBuf::from("/tmp/out/app.example.com.crt")
        );
        assert_eq!(
            with_suffix(Path::new("site.v2"), ".key"),
            PathBuf::from("site.v2.key")
        );
    }
}
