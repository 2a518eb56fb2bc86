use std::sync::Arc;

use yomi_types::VocabEntry;

use crate::error::StoreError;
use crate::store::{RecordStore, VOCAB_RECORD};

/// Persistent deduplicated vocabulary list, most-recent-first. Every
/// operation is a whole-list read-modify-write.
pub struct VocabStore {
    store: Arc<dyn RecordStore>,
}

impl VocabStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<VocabEntry>, StoreError> {
        match self.store.load(VOCAB_RECORD).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Prepends `entry` unless a same-word entry already exists. The
    /// duplicate case persists nothing and leaves the original untouched.
    /// Returns whether the entry was added.
    pub async fn add(&self, entry: VocabEntry) -> Result<bool, StoreError> {
        let mut list = self.list().await?;
        if list.iter().any(|item| item.word == entry.word) {
            return Ok(false);
        }

        list.insert(0, entry);
        self.persist(list).await?;
        Ok(true)
    }

    /// Drops every entry whose word matches exactly.
    pub async fn remove(&self, word: &str) -> Result<(), StoreError> {
        let mut list = self.list().await?;
        list.retain(|item| item.word != word);
        self.persist(list).await
    }

    async fn persist(&self, list: Vec<VocabEntry>) -> Result<(), StoreError> {
        self.store
            .save(VOCAB_RECORD, serde_json::to_value(list)?)
            .await
    }
}
