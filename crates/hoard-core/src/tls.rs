//! Certificate and private key inspection
//!
//! Extracts the RSA modulus from both halves of a TLS key pair so they can be
//! cross-checked, and reads the certificate's expiration date.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, PrivateKeyInfo};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use x509_cert::der::{DecodePem, Document};
use x509_cert::Certificate;

/// `rsaEncryption` algorithm identifier
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

const PKCS8_LABEL: &str = "PRIVATE KEY";
const PKCS1_LABEL: &str = "RSA PRIVATE KEY";

/// What the certificate contributes to the stored payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    /// Decimal RSA modulus of the subject public key
    pub modulus: String,
    /// `notAfter` as RFC 3339 with a `Z` suffix
    pub expiration_date: String,
}

/// Parse a PEM certificate and extract its RSA modulus and expiration
pub fn inspect_certificate(pem: &[u8]) -> Result<CertificateInfo> {
    let cert = Certificate::from_pem(pem)
        .map_err(|e| Error::format(format!("certificate is not a valid PEM X.509 certificate: {}", e)))?;

    let spki = &cert.tbs_certificate.subject_public_key_info;
    if spki.algorithm.oid.to_string() != RSA_ENCRYPTION_OID {
        return Err(Error::validation(format!(
            "certificate public key is not RSA (algorithm {})",
            spki.algorithm.oid
        )));
    }

    let public_key = RsaPublicKey::from_pkcs1_der(spki.subject_public_key.raw_bytes())
        .map_err(|e| Error::format(format!("certificate RSA public key is malformed: {}", e)))?;

    let not_after = cert.tbs_certificate.validity.not_after.to_unix_duration();
    let expires = i64::try_from(not_after.as_secs())
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| Error::format("certificate notAfter is out of range"))?;

    Ok(CertificateInfo {
        modulus: public_key.n().to_string(),
        expiration_date: expires.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Parse a PEM private key (PKCS#8 or PKCS#1) and return its decimal RSA modulus
pub fn private_key_modulus(pem: &str) -> Result<String> {
    let (label, document) = Document::from_pem(pem)
        .map_err(|e| Error::format(format!("private key is not valid PEM: {}", e)))?;

    let key = match label {
        PKCS8_LABEL => {
            let info = PrivateKeyInfo::try_from(document.as_bytes())
                .map_err(|e| Error::format(format!("private key is not valid PKCS#8: {}", e)))?;
            if info.algorithm.oid.to_string() != RSA_ENCRYPTION_OID {
                return Err(Error::validation(format!(
                    "private key is not RSA (algorithm {})",
                    info.algorithm.oid
                )));
            }
            RsaPrivateKey::from_pkcs8_der(document.as_bytes())
                .map_err(|e| Error::format(format!("private key is malformed: {}", e)))?
        }
        PKCS1_LABEL => RsaPrivateKey::from_pkcs1_der(document.as_bytes())
            .map_err(|e| Error::format(format!("private key is malformed: {}", e)))?,
        other => {
            return Err(Error::format(format!(
                "unsupported private key PEM block '{}'",
                other
            )))
        }
    };

    Ok(key.n().to_string())
}

/// Inspect both halves of a key pair and require their moduli to agree
pub fn check_key_pair(certificate_pem: &[u8], private_key_pem: &str) -> Result<CertificateInfo> {
    let info = inspect_certificate(certificate_pem)?;
    let key_modulus = private_key_modulus(private_key_pem)?;

    if info.modulus != key_modulus {
        return Err(Error::validation(
            "certificate and private key moduli do not match",
        ));
    }

    Ok(info)
}
