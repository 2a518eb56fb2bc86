use std::sync::Arc;

use kanal::AsyncReceiver;
use yomi_config::Config;
use yomi_core::store::unix_millis;
use yomi_core::{
    Aggregator, FuriganaConverter, JsonFileStore, LookupCache, QuizEngine, QuizReport,
    QuizSettingsStore, RecordStore, SentenceAnnotator, VocabStore,
};
use yomi_sources::{JishoClient, LibreTranslateClient, TatoebaClient};
use yomi_types::{AppEvent, LookupResult, PopupPayload, QuizSettings, SelectionRect, VocabEntry};

use crate::agent::{AgentError, PageAgent};
use crate::state::AppState;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    agent: Arc<dyn PageAgent>,
    events: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let mut session = {
        let config = state.config.read().await;
        Session::from_config(&config, agent)
    };

    tracing::info!("event loop started, waiting for agent commands");
    loop {
        let event = events.recv().await?;
        tracing::debug!("event received: {event:?}");

        // A failed operation leaves state unchanged but never ends the loop.
        if let Err(err) = session.handle(event).await {
            tracing::error!("event handling failed: {err:#}");
        }
    }
}

/// Everything one orchestrating session owns: remote clients, persisted
/// collections, the quiz session, and the last displayed lookup.
pub struct Session {
    agent: Arc<dyn PageAgent>,
    aggregator: Aggregator,
    cache: LookupCache,
    vocab: VocabStore,
    settings: QuizSettingsStore,
    furigana: FuriganaConverter,
    quiz: QuizEngine,
    last_result: Option<LookupResult>,
}

impl Session {
    pub fn from_config(config: &Config, agent: Arc<dyn PageAgent>) -> Self {
        let store: Arc<dyn RecordStore> =
            Arc::new(JsonFileStore::new(config.storage.data_path.clone()));

        let aggregator = Aggregator::new(
            Arc::new(JishoClient::new(config.sources.dictionary_url.clone())),
            Arc::new(LibreTranslateClient::new(
                config.sources.translate_url.clone(),
                config.sources.translate_fallback_url.clone(),
                config.sources.translate_source.clone(),
                config.sources.translate_target.clone(),
            )),
            Arc::new(TatoebaClient::new(
                config.sources.sentence_url.clone(),
                config.sources.sentence_lang.clone(),
            )),
        );

        // No annotation engine ships with the orchestrator; hosts that
        // embed one register it before the converter is resolved.
        let annotators: Vec<Arc<dyn SentenceAnnotator>> = Vec::new();

        Self::new(agent, aggregator, store, FuriganaConverter::resolve(annotators))
    }

    pub fn new(
        agent: Arc<dyn PageAgent>,
        aggregator: Aggregator,
        store: Arc<dyn RecordStore>,
        furigana: FuriganaConverter,
    ) -> Self {
        Self {
            agent,
            aggregator,
            cache: LookupCache::new(store.clone()),
            vocab: VocabStore::new(store.clone()),
            settings: QuizSettingsStore::new(store),
            furigana,
            quiz: QuizEngine::new(),
            last_result: None,
        }
    }

    pub async fn handle(&mut self, event: AppEvent) -> anyhow::Result<()> {
        match event {
            AppEvent::LookupSelection => self.handle_lookup().await?,
            AppEvent::SaveWord => self.handle_save().await?,
            AppEvent::RemoveWord(word) => {
                self.vocab.remove(&word).await?;
                tracing::info!("removed from vocabulary: {word}");
            }
            AppEvent::QuizStart => {
                let items = self.vocab.list().await?;
                let mixed = self.quiz_mixed().await;
                let report = self.quiz.start(items, mixed);
                self.push_quiz(report).await?;
            }
            AppEvent::QuizNext => {
                let mixed = self.quiz_mixed().await;
                let report = self.quiz.next(mixed);
                self.push_quiz(report).await?;
            }
            AppEvent::QuizAnswer(answer) => match self.quiz.check(&answer) {
                Some(report) => self.push_quiz(report).await?,
                None => tracing::debug!("answer with no posed question, ignoring"),
            },
            AppEvent::QuizSettingChanged { mixed } => {
                self.settings.save(QuizSettings { mixed }).await?;
            }
        }

        Ok(())
    }

    /// The full selection-to-popup pipeline: selection RPC, loading state,
    /// cache consult, aggregation, write-through, ready state.
    async fn handle_lookup(&mut self) -> anyhow::Result<()> {
        let selection = match self.agent.request_selection().await {
            Ok(selection) => selection,
            Err(err @ (AgentError::NoSelection | AgentError::Timeout)) => {
                tracing::warn!("selection request failed: {err}");
                self.agent
                    .show_popup(PopupPayload::Error {
                        error: "No selection detected.".to_string(),
                        selection_rect: None,
                    })
                    .await?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        self.agent
            .show_popup(PopupPayload::Loading {
                word: selection.text.clone(),
                selection_rect: Some(selection.rect),
            })
            .await?;

        // The raw selection text is the cache key.
        match self.cache.get(&selection.text).await {
            Ok(Some(result)) => {
                tracing::debug!("cache hit for {:?}", selection.text);
                self.last_result = Some(result.clone());
                return self.show_ready(result, selection.rect).await;
            }
            Ok(None) => {}
            Err(err) => tracing::error!("cache read failed: {err}"),
        }

        let result = match self.aggregator.lookup(&selection.text).await {
            Ok(result) => result,
            Err(err) => {
                self.agent
                    .show_popup(PopupPayload::Error {
                        error: err.to_string(),
                        selection_rect: Some(selection.rect),
                    })
                    .await?;
                return Ok(());
            }
        };

        if let Err(err) = self.cache.put(&selection.text, &result).await {
            tracing::error!("cache write failed: {err}");
        }

        self.last_result = Some(result.clone());
        self.show_ready(result, selection.rect).await
    }

    async fn show_ready(
        &self,
        mut result: LookupResult,
        rect: SelectionRect,
    ) -> anyhow::Result<()> {
        // Furigana is display-only; cache and vocabulary keep plain text.
        result.sentences = self.furigana.convert_all(&result.sentences).await;
        self.agent
            .show_popup(PopupPayload::Ready {
                selection_rect: Some(rect),
                result,
            })
            .await?;
        Ok(())
    }

    async fn handle_save(&mut self) -> anyhow::Result<()> {
        let Some(result) = &self.last_result else {
            tracing::debug!("save requested with no lookup shown");
            return Ok(());
        };

        let entry = VocabEntry::from_lookup(result, unix_millis());
        let word = entry.word.clone();
        if self.vocab.add(entry).await? {
            tracing::info!("saved to vocabulary: {word}");
        } else {
            tracing::debug!("already in vocabulary: {word}");
        }
        Ok(())
    }

    async fn quiz_mixed(&self) -> bool {
        match self.settings.load().await {
            Ok(settings) => settings.mixed,
            Err(err) => {
                tracing::error!("quiz settings read failed: {err}");
                QuizSettings::default().mixed
            }
        }
    }

    async fn push_quiz(&self, report: QuizReport) -> anyhow::Result<()> {
        match report {
            QuizReport::NoItems => {
                self.agent
                    .quiz_status("No vocab items to quiz.".to_string())
                    .await?;
            }
            QuizReport::NeedAnswer => {
                self.agent
                    .quiz_status("Enter an answer first.".to_string())
                    .await?;
            }
            QuizReport::Prompt {
                question,
                correct,
                total,
            } => {
                self.agent
                    .quiz_prompt(question, format!("Score {correct}/{total}"))
                    .await?;
            }
            QuizReport::Feedback {
                is_correct,
                expected,
                correct,
                total,
            } => {
                let verdict = if is_correct { "Correct" } else { "Incorrect" };
                self.agent
                    .quiz_status(format!("{verdict}. {expected} | Score {correct}/{total}"))
                    .await?;
            }
        }
        Ok(())
    }
}
