use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use yomi_sources::{DictionarySource, SentenceSource, SourceError, TranslationSource};
use yomi_types::LookupResult;

use crate::error::LookupError;

/// Orchestrates one multi-source lookup. The dictionary is mandatory;
/// translation and example sentences are independent secondaries whose
/// failures degrade to empty fields.
pub struct Aggregator {
    dictionary: Arc<dyn DictionarySource>,
    translation: Arc<dyn TranslationSource>,
    sentences: Arc<dyn SentenceSource>,
}

impl Aggregator {
    pub fn new(
        dictionary: Arc<dyn DictionarySource>,
        translation: Arc<dyn TranslationSource>,
        sentences: Arc<dyn SentenceSource>,
    ) -> Self {
        Self {
            dictionary,
            translation,
            sentences,
        }
    }

    pub async fn lookup(&self, text: &str) -> Result<LookupResult, LookupError> {
        let query = normalize_query(text);
        if query.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let entry = match self.dictionary.fetch_entry(&query).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return Err(LookupError::NoEntry),
            Err(SourceError::Status(status)) => {
                tracing::warn!("dictionary response not ok: {status}");
                return Err(LookupError::NoEntry);
            }
            Err(err) => {
                tracing::warn!("dictionary lookup failed: {err}");
                return Err(LookupError::Failed);
            }
        };

        // Both secondaries are in flight at once; results merge by field,
        // completion order does not matter.
        let (chinese_defs, sentences) = tokio::join!(
            self.translate_defs(&entry.definitions),
            self.fetch_sentences(&query),
        );

        Ok(LookupResult {
            word: entry.word,
            reading: entry.reading,
            english_defs: entry.definitions,
            chinese_defs,
            sentences,
        })
    }

    async fn translate_defs(&self, defs: &[String]) -> Vec<String> {
        match self.translation.translate(defs).await {
            Ok(translated) => translated,
            Err(err) => {
                tracing::warn!("translation failed: {err}");
                Vec::new()
            }
        }
    }

    async fn fetch_sentences(&self, query: &str) -> Vec<String> {
        match self.sentences.fetch_sentences(query).await {
            Ok(sentences) => sentences,
            Err(err) => {
                tracing::warn!("sentence lookup failed: {err}");
                Vec::new()
            }
        }
    }
}

/// NFKC-normalize and trim a selection before it becomes a query. The
/// cache key stays the raw text; only the outgoing query is normalized.
pub fn normalize_query(text: &str) -> String {
    text.trim().nfkc().collect::<String>().trim().to_string()
}
