use std::collections::HashMap;
use std::sync::Arc;

use yomi_types::{CacheEntry, LookupResult};

use crate::error::StoreError;
use crate::store::{CACHE_RECORD, RecordStore, unix_millis};

/// Write-through lookup cache keyed by the raw selected text. Unbounded,
/// no TTL; entries persist until the record is cleared externally.
/// Concurrent lookups for the same key are not deduplicated, the later
/// write wins.
pub struct LookupCache {
    store: Arc<dyn RecordStore>,
}

impl LookupCache {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, key: &str) -> Result<Option<LookupResult>, StoreError> {
        let mut entries = self.load_entries().await?;
        Ok(entries.remove(key).map(|entry| entry.data))
    }

    /// Must only be called with a successful aggregation result.
    pub async fn put(&self, key: &str, result: &LookupResult) -> Result<(), StoreError> {
        let mut entries = self.load_entries().await?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: result.clone(),
                timestamp: unix_millis(),
            },
        );
        self.store
            .save(CACHE_RECORD, serde_json::to_value(entries)?)
            .await
    }

    async fn load_entries(&self) -> Result<HashMap<String, CacheEntry>, StoreError> {
        match self.store.load(CACHE_RECORD).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(HashMap::new()),
        }
    }
}
