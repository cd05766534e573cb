//! Batch upload
//!
//! Builds and reconciles a sequence of field records. A record that fails
//! to build or reconcile is logged and counted; the batch keeps going.

use crate::reconcile::{Outcome, Reconciler};
use crate::store::SecretStore;
use hoard_core::{FieldRecord, Identity, Result, SecretBuilder};
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Per-batch tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl UploadReport {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Updated => self.updated += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

/// Build and reconcile every record in order
pub async fn upload<S, I>(reconciler: &Reconciler<'_, S>, records: I) -> UploadReport
where
    S: SecretStore + ?Sized,
    I: IntoIterator<Item = Result<FieldRecord>>,
{
    let builder = SecretBuilder::new();
    let mut seen: HashSet<Identity> = HashSet::new();
    let mut report = UploadReport::default();

    for (index, item) in records.into_iter().enumerate() {
        let row = index + 1;

        let record = match item {
            Ok(record) if record.is_header() => continue,
            Ok(record) => record,
            Err(e) => {
                error!(row, error = %e, "failed to read record");
                report.failed += 1;
                continue;
            }
        };

        let secret = match builder.build(&record) {
            Ok(secret) => secret,
            Err(e) => {
                error!(row, record = %record.describe(), error = %e, "failed to build secret");
                report.failed += 1;
                continue;
            }
        };

        let identity = secret.identity();
        if !seen.insert(identity.clone()) {
            warn!(identity = %identity, row, "duplicate identity in batch, keeping the first");
            report.skipped += 1;
            continue;
        }

        match reconciler.reconcile(&secret).await {
            Ok(outcome) => report.record(outcome),
            Err(e) => {
                error!(identity = %identity, error = %e, "failed to reconcile secret");
                report.failed += 1;
            }
        }
    }

    info!(
        created = report.created,
        updated = report.updated,
        skipped = report.skipped,
        failed = report.failed,
        "upload finished"
    );
    report
}
