//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// secret-hoard - keep secret material in AWS Secrets Manager
#[derive(Parser, Debug)]
#[command(name = "secret-hoard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to secret-hoard.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// AWS region, overrides the config file
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Secrets Manager endpoint, e.g. LocalStack
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every subcommand
    pub fn global(&self) -> GlobalOptions {
        GlobalOptions {
            config: self.config.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

/// Config location and store overrides
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<Utf8PathBuf>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update secrets from a CSV file
    Upload(UploadArgs),

    /// Fetch a secret and write it to disk, verifying checksums
    Download(DownloadArgs),

    /// List secrets whose tags match every filter
    List(ListArgs),

    /// Delete one secret
    Delete(DeleteArgs),

    /// Delete every secret matching a tag filter
    Purge(PurgeArgs),

    /// Show the CSV column layout for each kind
    Columns(ColumnsArgs),
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// CSV file with one secret per row
    #[arg(short, long)]
    pub file: Utf8PathBuf,

    /// Replace the value and tags of secrets that already exist
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Identity of the secret, e.g. text_file/dev/readonly
    #[arg(short, long)]
    pub secret: String,

    /// Destination path (certificates get .crt and .key appended)
    #[arg(short, long)]
    pub file: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Tag filter as key=value, repeatable
    #[arg(short, long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Identity of the secret
    pub secret: String,

    /// Delete immediately instead of scheduling with a recovery window
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Tag filter as key=value, repeatable
    #[arg(short, long = "tag", value_name = "KEY=VALUE", required = true)]
    pub tags: Vec<String>,

    /// Delete immediately instead of scheduling with a recovery window
    #[arg(long)]
    pub force: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Only show this kind
    pub kind: Option<String>,
}
