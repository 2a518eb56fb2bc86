use std::sync::Arc;

use async_trait::async_trait;

/// Narrow surface over an external script-conversion engine. The engine
/// itself (analyzer, dictionaries) lives outside this crate; hosts wire
/// candidates in at startup.
#[async_trait]
pub trait SentenceAnnotator: Send + Sync {
    /// Whether the underlying engine finished initializing.
    fn ready(&self) -> bool;

    /// Annotates a sentence with phonetic guides.
    async fn annotate(&self, sentence: &str) -> String;
}

/// Resolved once per process. `Unavailable` passes sentences through
/// untouched so display never depends on the optional engine.
#[derive(Clone)]
pub enum FuriganaConverter {
    Active(Arc<dyn SentenceAnnotator>),
    Unavailable,
}

impl FuriganaConverter {
    /// Probes candidate engines in order and keeps the first ready one.
    pub fn resolve(engines: Vec<Arc<dyn SentenceAnnotator>>) -> Self {
        for engine in engines {
            if engine.ready() {
                return Self::Active(engine);
            }
        }
        tracing::info!("no furigana engine available, sentences stay plain");
        Self::Unavailable
    }

    pub fn ready(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub async fn convert(&self, sentence: &str) -> String {
        match self {
            Self::Active(engine) => engine.annotate(sentence).await,
            Self::Unavailable => sentence.to_string(),
        }
    }

    pub async fn convert_all(&self, sentences: &[String]) -> Vec<String> {
        let mut converted = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            converted.push(self.convert(sentence).await);
        }
        converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEngine {
        ready: bool,
        tag: &'static str,
    }

    #[async_trait]
    impl SentenceAnnotator for FakeEngine {
        fn ready(&self) -> bool {
            self.ready
        }

        async fn annotate(&self, sentence: &str) -> String {
            format!("{}:{}", self.tag, sentence)
        }
    }

    #[tokio::test]
    async fn no_engines_degrades_to_pass_through() {
        let converter = FuriganaConverter::resolve(Vec::new());
        assert!(!converter.ready());
        assert_eq!(converter.convert("猫がいる。").await, "猫がいる。");
    }

    #[tokio::test]
    async fn first_ready_engine_wins() {
        let converter = FuriganaConverter::resolve(vec![
            Arc::new(FakeEngine {
                ready: false,
                tag: "a",
            }),
            Arc::new(FakeEngine {
                ready: true,
                tag: "b",
            }),
            Arc::new(FakeEngine {
                ready: true,
                tag: "c",
            }),
        ]);

        assert!(converter.ready());
        assert_eq!(converter.convert("猫").await, "b:猫");
    }

    #[tokio::test]
    async fn convert_all_keeps_order() {
        let converter = FuriganaConverter::resolve(vec![Arc::new(FakeEngine {
            ready: true,
            tag: "x",
        })]);

        let out = converter
            .convert_all(&["一".to_string(), "二".to_string()])
            .await;
        assert_eq!(out, vec!["x:一".to_string(), "x:二".to_string()]);
    }
}
