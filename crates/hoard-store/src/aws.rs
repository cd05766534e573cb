//! AWS Secrets Manager backend
//!
//! Works against AWS proper or any endpoint speaking the same API
//! (LocalStack etc.) when `endpoint_url` is set.

use crate::store::{EntrySummary, ListPage, SecretStore, StoreError, StoreResult};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::types::Tag;
use aws_sdk_secretsmanager::Client;
use hoard_core::{Error, Result, StoreSettings, Tags};
use std::fmt;
use tracing::debug;

/// Page size requested from `ListSecrets`
const LIST_PAGE_SIZE: i32 = 100;

/// Secrets Manager client built once per process
pub struct AwsSecretStore {
    client: Client,
    sts: aws_sdk_sts::Client,
    region: Option<String>,
}

impl AwsSecretStore {
    /// Resolve credentials and region, then build the clients
    pub async fn connect(settings: &StoreSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region.as_deref() {
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(endpoint_url) = settings.endpoint_url.as_deref() {
            debug!("Using custom Secrets Manager endpoint: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            sts: aws_sdk_sts::Client::new(&sdk_config),
            region: sdk_config.region().map(|r| r.to_string()),
        }
    }

    /// Region the clients resolved to, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Account number of the resolved credentials
    pub async fn caller_account(&self) -> Result<String> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| Error::remote(format!("get_caller_identity failed: {}", DisplayErrorContext(&e))))?;

        output
            .account()
            .map(str::to_string)
            .ok_or_else(|| Error::remote("get_caller_identity returned no account"))
    }
}

impl fmt::Debug for AwsSecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSecretStore")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn describe(&self, identity: &str) -> StoreResult<EntrySummary> {
        let output = self
            .client
            .describe_secret()
            .secret_id(identity)
            .send()
            .await
            .map_err(|e| store_error("describe_secret", e))?;

        Ok(EntrySummary {
            name: output.name().unwrap_or(identity).to_string(),
            tags: tags_from(output.tags()),
        })
    }

    async fn create(&self, identity: &str, value: &str, tags: &Tags) -> StoreResult<()> {
        self.client
            .create_secret()
            .name(identity)
            .secret_string(value)
            .set_tags(Some(tags_to(tags)))
            .send()
            .await
            .map_err(|e| store_error("create_secret", e))?;
        Ok(())
    }

    async fn update_value(&self, identity: &str, value: &str) -> StoreResult<()> {
        self.client
            .update_secret()
            .secret_id(identity)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| store_error("update_secret", e))?;
        Ok(())
    }

    async fn update_tags(&self, identity: &str, tags: &Tags) -> StoreResult<()> {
        self.client
            .tag_resource()
            .secret_id(identity)
            .set_tags(Some(tags_to(tags)))
            .send()
            .await
            .map_err(|e| store_error("tag_resource", e))?;
        Ok(())
    }

    async fn get_value(&self, identity: &str) -> StoreResult<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(identity)
            .send()
            .await
            .map_err(|e| store_error("get_secret_value", e))?;

        output
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| StoreError::Remote("secret has no string value".to_string()))
    }

    async fn delete(&self, identity: &str, force: bool) -> StoreResult<()> {
        self.client
            .delete_secret()
            .secret_id(identity)
            .force_delete_without_recovery(force)
            .send()
            .await
            .map_err(|e| store_error("delete_secret", e))?;
        Ok(())
    }

    async fn list_page(&self, next_token: Option<String>) -> StoreResult<ListPage> {
        let output = self
            .client
            .list_secrets()
            .max_results(LIST_PAGE_SIZE)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| store_error("list_secrets", e))?;

        let entries = output
            .secret_list()
            .iter()
            .filter_map(|entry| {
                entry.name().map(|name| EntrySummary {
                    name: name.to_string(),
                    tags: tags_from(entry.tags()),
                })
            })
            .collect();

        Ok(ListPage {
            entries,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

fn tags_to(tags: &Tags) -> Vec<Tag> {
    tags.iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect()
}

fn tags_from(tags: &[Tag]) -> Tags {
    tags.iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value().unwrap_or_default().to_string())))
        .collect()
}

/// Classify an SDK failure by its service error code
fn store_error<E>(operation: &str, err: SdkError<E>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.code() {
        Some("ResourceNotFoundException") => StoreError::NotFound,
        Some("ResourceExistsException") => StoreError::Conflict,
        _ => StoreError::Remote(format!("{} failed: {}", operation, DisplayErrorContext(&err))),
    }
}
