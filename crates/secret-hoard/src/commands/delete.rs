//! Delete command

use anyhow::{Context, Result};
use hoard_store::SecretStore;
use tracing::info;

use crate::cli::{DeleteArgs, GlobalOptions};
use crate::commands::{connect, load_config};
use crate::output;

pub async fn run(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let config = load_config(global)?;
    let store = connect(&config, global).await?;

    store
        .delete(&args.secret, args.force)
        .await
        .map_err(|e| e.into_error(&args.secret))
        .with_context(|| format!("Failed to delete {}", args.secret))?;

    info!(identity = %args.secret, force = args.force, "secret deleted");
    if args.force {
        output::success(&format!("Deleted {}", args.secret));
    } else {
        output::success(&format!("Scheduled {} for deletion", args.secret));
    }
    Ok(())
}
