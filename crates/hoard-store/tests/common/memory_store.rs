//! In-memory secret store for integration tests
//!
//! Behaves like the remote store for the operations secret-hoard uses,
//! lists in small pages to exercise pagination, and records every call.

use async_trait::async_trait;
use hoard_core::Tags;
use hoard_store::{EntrySummary, ListPage, SecretStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
struct StoredEntry {
    value: String,
    tags: Tags,
}

/// Mock remote secret store
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, StoredEntry>>>,
    api_calls: Arc<Mutex<Vec<String>>>,
    page_size: usize,
    fail_on: Arc<Mutex<Option<String>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_page_size(2)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            api_calls: Arc::new(Mutex::new(Vec::new())),
            page_size: page_size.max(1),
            fail_on: Arc::new(Mutex::new(None)),
        }
    }

    /// Seed an entry without recording a call
    pub fn insert(&self, name: &str, value: &str, tags: Tags) {
        self.entries.lock().unwrap().insert(
            name.to_string(),
            StoredEntry {
                value: value.to_string(),
                tags,
            },
        );
    }

    /// Make every call of the named operation fail with a remote error
    pub fn fail_operation(&self, operation: &str) {
        *self.fail_on.lock().unwrap() = Some(operation.to_string());
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.entries.lock().unwrap().get(name).map(|e| e.value.clone())
    }

    pub fn tags(&self, name: &str) -> Option<Tags> {
        self.entries.lock().unwrap().get(name).map(|e| e.tags.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Every call made so far, as `operation` or `operation:name`
    pub fn get_api_calls(&self) -> Vec<String> {
        self.api_calls.lock().unwrap().clone()
    }

    /// Number of calls of one operation
    pub fn count(&self, operation: &str) -> usize {
        self.get_api_calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    pub fn clear_api_calls(&self) {
        self.api_calls.lock().unwrap().clear();
    }

    fn record(&self, operation: &str, name: Option<&str>) -> StoreResult<()> {
        let call = match name {
            Some(name) => format!("{}:{}", operation, name),
            None => operation.to_string(),
        };
        self.api_calls.lock().unwrap().push(call);

        if self.fail_on.lock().unwrap().as_deref() == Some(operation) {
            return Err(StoreError::Remote(format!("{} failed: injected", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn describe(&self, identity: &str) -> StoreResult<EntrySummary> {
        self.record("describe", Some(identity))?;
        self.entries
            .lock()
            .unwrap()
            .get(identity)
            .map(|entry| EntrySummary {
                name: identity.to_string(),
                tags: entry.tags.clone(),
            })
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, identity: &str, value: &str, tags: &Tags) -> StoreResult<()> {
        self.record("create", Some(identity))?;
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(identity) {
            return Err(StoreError::Conflict);
        }
        entries.insert(
            identity.to_string(),
            StoredEntry {
                value: value.to_string(),
                tags: tags.clone(),
            },
        );
        Ok(())
    }

    async fn update_value(&self, identity: &str, value: &str) -> StoreResult<()> {
        self.record("update_value", Some(identity))?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.get_mut(identity).ok_or(StoreError::NotFound)?;
        entry.value = value.to_string();
        Ok(())
    }

    async fn update_tags(&self, identity: &str, tags: &Tags) -> StoreResult<()> {
        self.record("update_tags", Some(identity))?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.get_mut(identity).ok_or(StoreError::NotFound)?;
        entry.tags.extend(tags.clone());
        Ok(())
    }

    async fn get_value(&self, identity: &str) -> StoreResult<String> {
        self.record("get_value", Some(identity))?;
        self.value(identity).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, identity: &str, _force: bool) -> StoreResult<()> {
        self.record("delete", Some(identity))?;
        self.entries
            .lock()
            .unwrap()
            .remove(identity)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn list_page(&self, next_token: Option<String>) -> StoreResult<ListPage> {
        self.record("list_page", None)?;
        let start: usize = match next_token {
            Some(token) => token
                .parse()
                .map_err(|_| StoreError::Remote(format!("bad token {}", token)))?,
            None => 0,
        };

        let entries = self.entries.lock().unwrap();
        let page: Vec<EntrySummary> = entries
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|(name, entry)| EntrySummary {
                name: name.clone(),
                tags: entry.tags.clone(),
            })
            .collect();

        let end = start + page.len();
        let next_token = (end < entries.len()).then(|| end.to_string());
        Ok(ListPage {
            entries: page,
            next_token,
        })
    }
}
