//! Download command

use anyhow::{Context, Result};
use hoard_core::Identity;
use hoard_store::Downloader;

use crate::cli::{DownloadArgs, GlobalOptions};
use crate::commands::{connect, load_config};
use crate::output;

pub async fn run(args: &DownloadArgs, global: &GlobalOptions) -> Result<()> {
    // Reject unknown kinds before touching credentials
    Identity::kind_of(&args.secret)?;

    let config = load_config(global)?;
    let store = connect(&config, global).await?;

    let written = Downloader::new(&store)
        .download(&args.secret, args.file.as_std_path())
        .await
        .with_context(|| format!("Failed to download {}", args.secret))?;

    for path in &written {
        output::success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
