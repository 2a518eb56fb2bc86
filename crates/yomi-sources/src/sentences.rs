use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SourceError;

pub const MAX_SENTENCES: usize = 2;

#[async_trait]
pub trait SentenceSource: Send + Sync {
    async fn fetch_sentences(&self, query: &str) -> Result<Vec<String>, SourceError>;
}

#[derive(Clone)]
pub struct TatoebaClient {
    client: reqwest::Client,
    base_url: String,
    source_lang: String,
}

impl TatoebaClient {
    pub fn new(base_url: String, source_lang: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            source_lang,
        }
    }
}

#[async_trait]
impl SentenceSource for TatoebaClient {
    async fn fetch_sentences(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("from", self.source_lang.as_str()), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body: SearchResponse = response.json().await?;
        Ok(collect_sentences(body.results))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SentenceResult>,
}

#[derive(Debug, Deserialize)]
struct SentenceResult {
    text: Option<String>,
}

/// Takes up to the cap, skipping entries without sentence text.
fn collect_sentences(results: Vec<SentenceResult>) -> Vec<String> {
    let mut sentences = Vec::new();
    for result in results {
        if sentences.len() >= MAX_SENTENCES {
            break;
        }
        if let Some(text) = result.text
            && !text.is_empty()
        {
            sentences.push(text);
        }
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: Option<&str>) -> SentenceResult {
        SentenceResult {
            text: text.map(|t| t.to_string()),
        }
    }

    #[test]
    fn caps_at_two_sentences() {
        let results = vec![result(Some("a")), result(Some("b")), result(Some("c"))];
        assert_eq!(
            collect_sentences(results),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn entries_without_text_are_skipped() {
        let results = vec![
            result(None),
            result(Some("")),
            result(Some("猫がいる。")),
        ];
        assert_eq!(collect_sentences(results), vec!["猫がいる。".to_string()]);
    }

    #[test]
    fn response_parses_without_results_field() {
        let body: SearchResponse = serde_json::from_str("{}").expect("parse");
        assert!(collect_sentences(body.results).is_empty());
    }
}
