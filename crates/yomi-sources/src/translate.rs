use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Definitions travel as one request joined by this delimiter and are
/// split back apart on the way out.
const JOIN_DELIMITER: &str = " ||| ";
const SPLIT_DELIMITER: &str = "|||";

#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Translates the given definitions in one round trip. An empty input
    /// short-circuits to an empty output without any request.
    async fn translate(&self, defs: &[String]) -> Result<Vec<String>, SourceError>;
}

#[derive(Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    primary_url: String,
    fallback_url: String,
    source_lang: String,
    target_lang: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

impl LibreTranslateClient {
    pub fn new(
        primary_url: String,
        fallback_url: String,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            primary_url,
            fallback_url,
            source_lang,
            target_lang,
        }
    }

    async fn post(
        &self,
        url: &str,
        payload: &TranslateRequest<'_>,
    ) -> Result<TranslateResponse, SourceError> {
        let response = self.client.post(url).json(payload).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        serde_json::from_str(&text).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TranslationSource for LibreTranslateClient {
    async fn translate(&self, defs: &[String]) -> Result<Vec<String>, SourceError> {
        if defs.is_empty() {
            return Ok(Vec::new());
        }

        let joined = defs.join(JOIN_DELIMITER);
        let payload = TranslateRequest {
            q: &joined,
            source: &self.source_lang,
            target: &self.target_lang,
            format: "text",
        };

        // One retry against the fallback endpoint with the identical payload.
        let response = match self.post(&self.primary_url, &payload).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("primary translate endpoint failed: {err}");
                self.post(&self.fallback_url, &payload).await?
            }
        };

        Ok(split_translation(&response.translated_text, defs.len()))
    }
}

/// Maps the joined translation back onto the input items. On a piece-count
/// mismatch the whole text is kept as a single item rather than discarded.
pub fn split_translation(translated: &str, expected: usize) -> Vec<String> {
    let translated = translated.trim();
    if translated.is_empty() {
        return Vec::new();
    }

    let parts: Vec<String> = translated
        .split(SPLIT_DELIMITER)
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() == expected {
        parts
    } else {
        vec![translated.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn client(primary_url: String, fallback_url: String) -> LibreTranslateClient {
        LibreTranslateClient::new(
            primary_url,
            fallback_url,
            "en".to_string(),
            "zh".to_string(),
        )
    }

    /// Answers one HTTP request with a canned response and hands back the
    /// raw request bytes.
    async fn serve_once(
        listener: TcpListener,
        status_line: &'static str,
        body: &'static str,
    ) -> String {
        let (mut stream, _) = listener.accept().await.expect("accept");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.expect("read");
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request_complete(&request) {
                break;
            }
        }

        let response = format!(
            "{status_line}\r\ncontent-type: application/json\r\n\
             content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");

        String::from_utf8_lossy(&request).into_owned()
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let expected = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= expected
    }

    #[tokio::test]
    async fn failed_primary_retries_fallback_with_the_same_payload() {
        let primary = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let fallback = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let primary_url = format!("http://{}/translate", primary.local_addr().expect("addr"));
        let fallback_url = format!("http://{}/translate", fallback.local_addr().expect("addr"));

        let primary_task = tokio::spawn(serve_once(
            primary,
            "HTTP/1.1 500 Internal Server Error",
            "{}",
        ));
        let fallback_task = tokio::spawn(serve_once(
            fallback,
            "HTTP/1.1 200 OK",
            r#"{"translatedText":"猫 ||| 犬"}"#,
        ));

        let defs = vec!["cat".to_string(), "dog".to_string()];
        let parts = client(primary_url, fallback_url)
            .translate(&defs)
            .await
            .expect("translate");
        assert_eq!(parts, vec!["猫".to_string(), "犬".to_string()]);

        // Both endpoints saw the same joined query.
        let payload = r#""q":"cat ||| dog""#;
        assert!(primary_task.await.expect("primary").contains(payload));
        assert!(fallback_task.await.expect("fallback").contains(payload));
    }

    #[tokio::test]
    async fn fallback_failure_surfaces_the_error() {
        let primary = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let fallback = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let primary_url = format!("http://{}/translate", primary.local_addr().expect("addr"));
        let fallback_url = format!("http://{}/translate", fallback.local_addr().expect("addr"));

        tokio::spawn(serve_once(primary, "HTTP/1.1 502 Bad Gateway", "{}"));
        tokio::spawn(serve_once(fallback, "HTTP/1.1 502 Bad Gateway", "{}"));

        let defs = vec!["cat".to_string()];
        match client(primary_url, fallback_url).translate(&defs).await {
            Err(SourceError::Status(status)) => assert_eq!(status.as_u16(), 502),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_input_translates_without_a_request() {
        // Unroutable endpoints; any request would fail the call.
        let parts = client(
            "http://127.0.0.1:9/translate".to_string(),
            "http://127.0.0.1:9/translate".to_string(),
        )
        .translate(&[])
        .await
        .expect("translate");
        assert!(parts.is_empty());
    }

    #[test]
    fn matching_piece_count_splits_per_item() {
        let parts = split_translation("猫 ||| 三味线", 2);
        assert_eq!(parts, vec!["猫".to_string(), "三味线".to_string()]);
    }

    #[test]
    fn merged_translation_stays_whole() {
        let parts = split_translation("猫和三味线", 2);
        assert_eq!(parts, vec!["猫和三味线".to_string()]);
    }

    #[test]
    fn dropped_delimiter_piece_falls_back_to_whole_text() {
        // The service collapsed one piece to whitespace, so counts mismatch.
        let parts = split_translation("猫 |||   ", 2);
        assert_eq!(parts, vec!["猫 |||".to_string()]);
    }

    #[test]
    fn blank_translation_is_empty() {
        assert!(split_translation("   ", 3).is_empty());
    }

    #[test]
    fn response_body_parses_with_missing_field() {
        let body: TranslateResponse = serde_json::from_str("{}").expect("parse");
        assert!(body.translated_text.is_empty());

        let body: TranslateResponse =
            serde_json::from_str(r#"{"translatedText":"猫"}"#).expect("parse");
        assert_eq!(body.translated_text, "猫");
    }
}
