use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;

/// Cap on collected definitions; sense groups past it are never visited.
pub const MAX_DEFINITIONS: usize = 6;

/// A dictionary hit reduced to what the lookup pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub word: String,
    pub reading: String,
    pub definitions: Vec<String>,
}

/// The mandatory lookup source. `Ok(None)` means the source answered but
/// had no usable entry for the query.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    async fn fetch_entry(&self, query: &str) -> Result<Option<DictEntry>, SourceError>;
}

#[derive(Clone)]
pub struct JishoClient {
    client: reqwest::Client,
    base_url: String,
}

impl JishoClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl DictionarySource for JishoClient {
    async fn fetch_entry(&self, query: &str) -> Result<Option<DictEntry>, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("keyword", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body: SearchResponse = response.json().await?;
        Ok(extract_entry(body, query))
    }
}

// JSON structures for the Jisho word-search payload
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<WordEntry>,
}

#[derive(Debug, Deserialize)]
struct WordEntry {
    #[serde(default)]
    japanese: Vec<JapaneseForm>,
    #[serde(default)]
    senses: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct JapaneseForm {
    word: Option<String>,
    reading: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(default)]
    english_definitions: Vec<String>,
}

/// Reads the first entry's primary form. The surface form falls back to
/// the query text when the entry is reading-only.
fn extract_entry(body: SearchResponse, query: &str) -> Option<DictEntry> {
    let mut entry = body.data.into_iter().next()?;
    if entry.japanese.is_empty() {
        return None;
    }

    let form = entry.japanese.swap_remove(0);
    Some(DictEntry {
        word: form.word.unwrap_or_else(|| query.to_string()),
        reading: form.reading.unwrap_or_default(),
        definitions: collect_definitions(&entry.senses),
    })
}

/// Walks sense groups in order and stops as soon as the cap is reached.
fn collect_definitions(senses: &[Sense]) -> Vec<String> {
    let mut defs = Vec::new();
    for sense in senses {
        for def in &sense.english_definitions {
            if defs.len() >= MAX_DEFINITIONS {
                return defs;
            }
            defs.push(def.clone());
        }
        if defs.len() >= MAX_DEFINITIONS {
            break;
        }
    }
    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sense(defs: &[&str]) -> Sense {
        Sense {
            english_definitions: defs.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn definitions_cap_at_six_across_sense_groups() {
        let senses = vec![
            sense(&["one", "two", "three"]),
            sense(&["four", "five"]),
            sense(&["six", "seven", "eight"]),
        ];

        let defs = collect_definitions(&senses);
        assert_eq!(defs.len(), MAX_DEFINITIONS);
        assert_eq!(defs.last().map(String::as_str), Some("six"));
    }

    #[test]
    fn empty_sense_groups_are_skipped() {
        let senses = vec![sense(&[]), sense(&["cat"])];
        assert_eq!(collect_definitions(&senses), vec!["cat".to_string()]);
    }

    #[test]
    fn entry_without_japanese_forms_is_no_data() {
        let body = SearchResponse {
            data: vec![WordEntry {
                japanese: vec![],
                senses: vec![sense(&["cat"])],
            }],
        };
        assert_eq!(extract_entry(body, "猫"), None);
    }

    #[test]
    fn surface_form_falls_back_to_the_query() {
        let body = SearchResponse {
            data: vec![WordEntry {
                japanese: vec![JapaneseForm {
                    word: None,
                    reading: Some("ねこ".to_string()),
                }],
                senses: vec![sense(&["cat"])],
            }],
        };

        let entry = extract_entry(body, "ねこ").expect("entry");
        assert_eq!(entry.word, "ねこ");
        assert_eq!(entry.reading, "ねこ");
        assert_eq!(entry.definitions, vec!["cat".to_string()]);
    }

    #[test]
    fn only_the_first_entry_is_considered() {
        let body = SearchResponse {
            data: vec![
                WordEntry {
                    japanese: vec![],
                    senses: vec![],
                },
                WordEntry {
                    japanese: vec![JapaneseForm {
                        word: Some("猫".to_string()),
                        reading: Some("ねこ".to_string()),
                    }],
                    senses: vec![sense(&["cat"])],
                },
            ],
        };
        assert_eq!(extract_entry(body, "猫"), None);
    }

    #[test]
    fn search_payload_parses_from_raw_json() {
        let raw = r#"{
            "data": [{
                "japanese": [{"word": "猫", "reading": "ねこ"}],
                "senses": [
                    {"english_definitions": ["cat"]},
                    {"english_definitions": ["shamisen"], "parts_of_speech": ["Noun"]}
                ]
            }]
        }"#;

        let body: SearchResponse = serde_json::from_str(raw).expect("parse");
        let entry = extract_entry(body, "猫").expect("entry");
        assert_eq!(entry.word, "猫");
        assert_eq!(entry.definitions, vec!["cat".to_string(), "shamisen".to_string()]);
    }
}
