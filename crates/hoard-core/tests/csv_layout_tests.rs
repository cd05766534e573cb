//! Column layout round trips against the canonical sample CSVs
//!
//! Each sample is the documented example for its kind. Reading it with the
//! default layouts must land every value in the right field and build the
//! expected identity.

mod common;

use common::*;
use hoard_core::{Error, Payload, SecretBuilder, SecretKind};

#[test]
fn test_rdspostgres_sample() {
    let record = load_single_record("rdspostgres.csv");
    assert_eq!(record.get("host"), Some("db1.cluster.example.internal"));
    assert_eq!(record.get("username"), Some("reader"));

    let secret = SecretBuilder::new().build(&record).unwrap();
    assert_eq!(secret.identity().as_str(), "rdspostgres/dev/db1/app/readonly");
    match secret.payload() {
        Payload::RdsPostgres(p) => {
            assert_eq!(p.port, 5432);
            assert_eq!(p.engine, "postgres");
            assert_eq!(p.db_instance_identifier, "db1");
            assert_eq!(p.password, "mypassword");
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_snowflake_sample() {
    let record = load_single_record("snowflake.csv");
    let secret = SecretBuilder::new().build(&record).unwrap();
    assert_eq!(secret.identity().as_str(), "snowflake/dev/wh_small/readonly");
    match secret.payload() {
        Payload::Snowflake(p) => {
            assert_eq!(p.account_name, "acme-xy12345");
            assert_eq!(p.username, "svc_reader");
            assert_eq!(p.warehouse, "wh_small");
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_ssl_certificate_sample() {
    let record = load_single_record("ssl_certificate.csv");
    let secret = SecretBuilder::new().build(&record).unwrap();
    assert_eq!(secret.identity().as_str(), "ssl_certificate/prod/app.example.com");
    match secret.payload() {
        Payload::SslCertificate(p) => {
            assert_eq!(p.certificate_sha256, SERVER_CRT_SHA256);
            assert_eq!(p.private_key_sha256, SERVER_KEY_SHA256);
            assert_eq!(p.modulus, load_fixture("server.modulus").trim());
            assert_eq!(p.certificate, load_fixture("server.crt"));
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_text_file_sample() {
    let record = load_single_record("text_file.csv");
    let secret = SecretBuilder::new().build(&record).unwrap();
    assert_eq!(secret.identity().as_str(), "text_file/dev/readonly");
    match secret.payload() {
        Payload::TextFile(doc) => assert_eq!(doc.sha256_sum, HELLO_SHA256),
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_jsondoc_sample() {
    let record = load_single_record("jsondoc.csv");
    let secret = SecretBuilder::new().build(&record).unwrap();
    assert_eq!(secret.kind(), SecretKind::JsonDocument);
    assert_eq!(secret.identity().as_str(), "jsondoc/dev/endpoints");
}

#[test]
fn test_mixed_sample_isolates_bad_rows() {
    let rows = load_sample("mixed.csv");
    assert_eq!(rows.len(), 6);

    let builder = SecretBuilder::new();
    let outcomes: Vec<_> = rows
        .into_iter()
        .map(|row| row.and_then(|record| builder.build(&record)))
        .collect();

    assert!(outcomes[0].is_ok());
    assert!(matches!(outcomes[1], Err(Error::UnsupportedKind { .. })));
    assert!(matches!(outcomes[2], Err(Error::Format { .. })));
    assert!(matches!(outcomes[3], Err(Error::Validation { .. })));
    assert!(matches!(outcomes[4], Err(Error::Validation { .. })));
    assert!(outcomes[5].is_ok());
}

#[test]
fn test_every_kind_has_a_sample_matching_its_example_row() {
    for kind in SecretKind::ALL {
        let sample = load_fixture(&format!("samples/{}.csv", kind.prefix()));
        let data_row = sample.lines().nth(1).unwrap();
        assert_eq!(
            data_row.split(',').count(),
            kind.example_row().split(',').count(),
            "{} sample width differs from its example row",
            kind
        );
    }
}
