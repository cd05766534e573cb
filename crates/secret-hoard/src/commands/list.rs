//! List command

use anyhow::Result;
use hoard_store::{matching, parse_filter};

use crate::cli::{GlobalOptions, ListArgs};
use crate::commands::{connect, load_config};
use crate::output;

pub async fn run(args: &ListArgs, global: &GlobalOptions) -> Result<()> {
    let filter = parse_filter(&args.tags)?;

    let config = load_config(global)?;
    let store = connect(&config, global).await?;

    let names = matching(&store, &filter).await?;
    if names.is_empty() {
        output::info("No matching secrets");
        return Ok(());
    }

    for name in &names {
        println!("{}", name);
    }
    output::info(&format!("{} secret(s)", names.len()));
    Ok(())
}
