//! Purge command

use anyhow::Result;
use dialoguer::Confirm;
use hoard_store::{matching, parse_filter, purge};

use crate::cli::{GlobalOptions, PurgeArgs};
use crate::commands::{connect, load_config};
use crate::output;

pub async fn run(args: &PurgeArgs, global: &GlobalOptions) -> Result<()> {
    let filter = parse_filter(&args.tags)?;

    let config = load_config(global)?;
    let store = connect(&config, global).await?;

    if !args.yes {
        let candidates = matching(&store, &filter).await?;
        if candidates.is_empty() {
            output::info("No matching secrets");
            return Ok(());
        }

        output::header("Secrets to delete");
        for name in &candidates {
            println!("  {}", name);
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} secret(s)?", candidates.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    let deleted = purge(&store, &filter, args.force).await?;
    output::success(&format!("Deleted {} secret(s)", deleted.len()));
    Ok(())
}
