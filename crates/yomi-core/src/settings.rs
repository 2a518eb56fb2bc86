use std::sync::Arc;

use yomi_types::QuizSettings;

use crate::error::StoreError;
use crate::store::{QUIZ_SETTINGS_RECORD, RecordStore};

/// Persisted quiz preferences; a missing record means the defaults.
pub struct QuizSettingsStore {
    store: Arc<dyn RecordStore>,
}

impl QuizSettingsStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<QuizSettings, StoreError> {
        match self.store.load(QUIZ_SETTINGS_RECORD).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(QuizSettings::default()),
        }
    }

    pub async fn save(&self, settings: QuizSettings) -> Result<(), StoreError> {
        self.store
            .save(QUIZ_SETTINGS_RECORD, serde_json::to_value(settings)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn missing_record_defaults_to_mixed() {
        let settings = QuizSettingsStore::new(Arc::new(MemoryStore::new()));
        assert!(settings.load().await.expect("load").mixed);
    }

    #[tokio::test]
    async fn saved_setting_round_trips() {
        let settings = QuizSettingsStore::new(Arc::new(MemoryStore::new()));
        settings
            .save(QuizSettings { mixed: false })
            .await
            .expect("save");
        assert!(!settings.load().await.expect("load").mixed);
    }
}
