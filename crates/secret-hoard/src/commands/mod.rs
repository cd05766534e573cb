//! CLI command implementations

pub mod columns;
pub mod delete;
pub mod download;
pub mod list;
pub mod purge;
pub mod upload;

use anyhow::{Context, Result};
use hoard_core::HoardConfig;
use hoard_store::AwsSecretStore;
use tracing::info;

use crate::cli::GlobalOptions;

/// Load configuration, honouring `--config`
pub fn load_config(global: &GlobalOptions) -> Result<HoardConfig> {
    HoardConfig::load(global.config.as_deref()).context("Failed to load configuration")
}

/// Build the store client once and confirm the credentials resolve to an account
pub async fn connect(config: &HoardConfig, global: &GlobalOptions) -> Result<AwsSecretStore> {
    let settings = config
        .store()
        .clone()
        .merge(global.region.clone(), global.endpoint_url.clone());

    let store = AwsSecretStore::connect(&settings).await;
    let account = store
        .caller_account()
        .await
        .context("Failed to resolve AWS caller identity")?;

    info!(
        aws_account_number = %account,
        region = store.region().unwrap_or("<default>"),
        "connected to Secrets Manager"
    );
    Ok(store)
}
