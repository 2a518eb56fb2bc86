use serde::{Deserialize, Serialize};

/// Assembled output of one multi-source lookup. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    pub reading: String,
    /// Dictionary definitions in source order, at most six.
    pub english_defs: Vec<String>,
    /// Parallels `english_defs` positionally on a clean translation,
    /// otherwise a single combined string or empty.
    pub chinese_defs: Vec<String>,
    pub sentences: Vec<String>,
}

/// One record in the `lookupCache` map, keyed by the raw selected text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub data: LookupResult,
    /// Unix milliseconds at write time. Informational only, never evicted.
    pub timestamp: u64,
}

/// A saved word in the `vocabList` record, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub word: String,
    pub reading: String,
    pub english_defs: Vec<String>,
    pub chinese_defs: Vec<String>,
    pub sentences: Vec<String>,
    pub added_at: u64,
}

impl VocabEntry {
    pub fn from_lookup(result: &LookupResult, added_at: u64) -> Self {
        Self {
            word: result.word.clone(),
            reading: result.reading.clone(),
            english_defs: result.english_defs.clone(),
            chinese_defs: result.chinese_defs.clone(),
            sentences: result.sentences.clone(),
            added_at,
        }
    }
}

fn default_mixed() -> bool {
    true
}

/// Persisted quiz preferences (`quizSettings` record).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// When true the question type is a per-question coin flip,
    /// otherwise always a reading question.
    #[serde(default = "default_mixed")]
    pub mixed: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            mixed: default_mixed(),
        }
    }
}

/// Selection bounding box in page coordinates. Display positioning only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

/// A selection reported by the page agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub text: String,
    pub rect: SelectionRect,
}

/// Internal events carried between the agent IO task and the event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    LookupSelection,
    /// Save the most recently displayed lookup into the vocabulary.
    SaveWord,
    RemoveWord(String),
    QuizStart,
    QuizAnswer(String),
    QuizNext,
    QuizSettingChanged { mixed: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_settings_default_to_mixed() {
        assert!(QuizSettings::default().mixed);

        let parsed: QuizSettings = serde_json::from_str("{}").expect("parse");
        assert!(parsed.mixed);
    }

    #[test]
    fn vocab_entry_uses_record_field_names() {
        let entry = VocabEntry {
            word: "猫".to_string(),
            reading: "ねこ".to_string(),
            english_defs: vec!["cat".to_string()],
            chinese_defs: vec![],
            sentences: vec![],
            added_at: 7,
        };

        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("englishDefs").is_some());
        assert!(json.get("addedAt").is_some());
    }
}
