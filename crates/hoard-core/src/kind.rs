//! Secret kinds
//!
//! A kind fixes three things about a secret: the identity prefix, the ordered
//! metadata fields the identity is built from, and the payload shape.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of secret categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    #[serde(alias = "rdspostgres")]
    RdsPostgres,
    Snowflake,
    SslCertificate,
    TextFile,
    #[serde(alias = "jsondoc")]
    JsonDocument,
}

impl SecretKind {
    /// Every kind, in a stable order
    pub const ALL: [SecretKind; 5] = [
        SecretKind::RdsPostgres,
        SecretKind::Snowflake,
        SecretKind::SslCertificate,
        SecretKind::TextFile,
        SecretKind::JsonDocument,
    ];

    /// Identity prefix and `resource_type` value stored in tags
    pub fn prefix(&self) -> &'static str {
        match self {
            SecretKind::RdsPostgres => "rdspostgres",
            SecretKind::Snowflake => "snowflake",
            SecretKind::SslCertificate => "ssl_certificate",
            SecretKind::TextFile => "text_file",
            SecretKind::JsonDocument => "jsondoc",
        }
    }

    /// Long-form names accepted in addition to the prefix
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            SecretKind::RdsPostgres => &["rds_postgres"],
            SecretKind::JsonDocument => &["json_document"],
            _ => &[],
        }
    }

    /// Ordered metadata fields that make up the identity after the prefix
    pub fn metadata_fields(&self) -> &'static [&'static str] {
        match self {
            SecretKind::RdsPostgres => &["environment", "instance", "database", "access"],
            SecretKind::Snowflake => &["environment", "warehouse", "access"],
            SecretKind::SslCertificate => &["environment", "common_name"],
            SecretKind::TextFile | SecretKind::JsonDocument => &["environment", "access"],
        }
    }

    /// Non-metadata fields a record of this kind must carry
    pub fn payload_fields(&self) -> &'static [&'static str] {
        match self {
            SecretKind::RdsPostgres => &[
                "password",
                "engine",
                "port",
                "db_instance_identifier",
                "host",
                "username",
            ],
            SecretKind::Snowflake => &["account_name", "username", "password"],
            SecretKind::SslCertificate => &["certificate_file", "private_key_file"],
            SecretKind::TextFile | SecretKind::JsonDocument => &["file_path"],
        }
    }

    /// Default CSV column layout, first column is always `resource_type`
    pub fn default_columns(&self) -> Vec<String> {
        let columns: &[&str] = match self {
            SecretKind::RdsPostgres => &[
                "resource_type",
                "environment",
                "instance",
                "database",
                "access",
                "password",
                "engine",
                "port",
                "db_instance_identifier",
                "host",
                "username",
            ],
            SecretKind::Snowflake => &[
                "resource_type",
                "environment",
                "warehouse",
                "access",
                "account_name",
                "username",
                "password",
            ],
            SecretKind::SslCertificate => &[
                "resource_type",
                "environment",
                "common_name",
                "certificate_file",
                "private_key_file",
            ],
            SecretKind::TextFile | SecretKind::JsonDocument => {
                &["resource_type", "environment", "access", "file_path"]
            }
        };
        columns.iter().map(|c| c.to_string()).collect()
    }

    /// Example CSV row for usage output
    pub fn example_row(&self) -> &'static str {
        match self {
            SecretKind::RdsPostgres => "rdspostgres,myenvironment,myinstance,mydatabase,mytype,mypassword,postgres,5432,mydbInstanceIdentifier,myhost,myusername",
            SecretKind::Snowflake => "snowflake,myenvironment,mywarehouse,mytype,myAccountname,myusername,mypassword",
            SecretKind::SslCertificate => "ssl_certificate,testenv,my.domain.com,/path/to/certificate.crt,/path/to/private.key",
            SecretKind::TextFile => "text_file,testenv,my_file_type,/path/to/file",
            SecretKind::JsonDocument => "jsondoc,testenv,my_endpoints,/path/to/file.json",
        }
    }

    /// Whether downloads of this kind carry a checksum to verify
    pub fn is_checksummed(&self) -> bool {
        !matches!(self, SecretKind::RdsPostgres | SecretKind::Snowflake)
    }

    /// Derive the kind from the first segment of an identity string
    pub fn from_identity(identity: &str) -> Result<Self> {
        let prefix = identity.split('/').next().unwrap_or_default();
        prefix.parse()
    }
}

impl fmt::Display for SecretKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for SecretKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        SecretKind::ALL
            .into_iter()
            .find(|kind| kind.prefix() == wanted || kind.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| Error::unsupported_kind(s))
    }
}
