//! Upload command

use anyhow::{bail, Result};
use hoard_core::CsvRecordSource;
use hoard_store::{upload, Reconciler};

use crate::cli::{GlobalOptions, UploadArgs};
use crate::commands::{connect, load_config};
use crate::output;

pub async fn run(args: &UploadArgs, global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;
    let records = CsvRecordSource::from_path(args.file.as_std_path(), config.columns())?;
    if records.is_empty() {
        output::warning(&format!("{} has no data rows", args.file));
        return Ok(());
    }

    let store = connect(&config, global).await?;

    output::header(&format!("Uploading {} record(s) from {}", records.len(), args.file));
    let spinner = output::spinner("Reconciling secrets...");
    let report = upload(&Reconciler::new(&store, args.overwrite), records).await;
    spinner.finish_and_clear();

    output::kv("created", &report.created.to_string());
    output::kv("updated", &report.updated.to_string());
    output::kv("skipped", &report.skipped.to_string());
    output::kv("failed", &report.failed.to_string());

    if report.has_failures() {
        output::error(&format!("{} record(s) failed, see log for details", report.failed));
        bail!("upload finished with {} failure(s)", report.failed);
    }

    output::success("Upload complete");
    Ok(())
}
