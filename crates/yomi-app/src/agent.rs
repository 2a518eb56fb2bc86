use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::{Mutex, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use yomi_types::{AgentReply, AgentRequest, AppEvent, PopupPayload, Selection};

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("no page agent connected")]
    NoResponder,

    #[error("page agent did not answer in time")]
    Timeout,

    #[error("agent reported no selection")]
    NoSelection,
}

/// The orchestrator's view of the page-embedded agent. Selection is a
/// request/response RPC; the rest are one-way pushes.
#[async_trait]
pub trait PageAgent: Send + Sync {
    async fn request_selection(&self) -> Result<Selection, AgentError>;
    async fn show_popup(&self, payload: PopupPayload) -> Result<(), AgentError>;
    async fn quiz_prompt(&self, question: String, status: String) -> Result<(), AgentError>;
    async fn quiz_status(&self, text: String) -> Result<(), AgentError>;
}

/// Outcome routed back to a pending selection request.
#[derive(Debug)]
enum SelectionOutcome {
    Selection(Selection),
    NoSelection,
}

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<SelectionOutcome>>>>;

/// Websocket-backed `PageAgent`. Requests carry a correlation id; a reply
/// that never arrives resolves to an explicit timeout instead of hanging.
pub struct WsAgent {
    outbound: AsyncSender<AgentRequest>,
    pending: PendingMap,
    next_id: AtomicU64,
    timeout: Duration,
}

impl WsAgent {
    pub fn new(timeout: Duration) -> (Self, AgentLink) {
        let (outbound, outbound_rx) = kanal::bounded_async(64);
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let link = AgentLink {
            outbound_rx,
            pending: pending.clone(),
        };

        (
            Self {
                outbound,
                pending,
                next_id: AtomicU64::new(1),
                timeout,
            },
            link,
        )
    }

    async fn push(&self, request: AgentRequest) -> Result<(), AgentError> {
        self.outbound
            .send(request)
            .await
            .map_err(|_| AgentError::NoResponder)
    }
}

#[async_trait]
impl PageAgent for WsAgent {
    async fn request_selection(&self) -> Result<Selection, AgentError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.lock().await.insert(id, reply_tx);

        if let Err(err) = self.push(AgentRequest::RequestSelection { id }).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(SelectionOutcome::Selection(selection))) => Ok(selection),
            Ok(Ok(SelectionOutcome::NoSelection)) => Err(AgentError::NoSelection),
            // The driver dropped the pending slot, e.g. the socket closed.
            Ok(Err(_)) => Err(AgentError::NoResponder),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(AgentError::Timeout)
            }
        }
    }

    async fn show_popup(&self, payload: PopupPayload) -> Result<(), AgentError> {
        self.push(AgentRequest::ShowPopup { payload }).await
    }

    async fn quiz_prompt(&self, question: String, status: String) -> Result<(), AgentError> {
        self.push(AgentRequest::QuizPrompt { question, status }).await
    }

    async fn quiz_status(&self, text: String) -> Result<(), AgentError> {
        self.push(AgentRequest::QuizStatus { text }).await
    }
}

/// Receiving half handed to the websocket driver task.
pub struct AgentLink {
    outbound_rx: AsyncReceiver<AgentRequest>,
    pending: PendingMap,
}

/// Drives the agent websocket: forwards orchestrator messages out, routes
/// selection replies to their pending request, and turns popup commands
/// into app events.
pub async fn agent_io(
    ws_url: String,
    link: AgentLink,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let result = drive(&ws_url, &link, &event_tx, &cancel).await;

    // Wake anything still waiting on a reply, whichever way the loop ended.
    // Dropped slots resolve as NoResponder instead of waiting out the timeout.
    link.pending.lock().await.clear();
    tracing::info!("agent io stopping");
    result
}

async fn drive(
    ws_url: &str,
    link: &AgentLink,
    event_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let (ws_stream, _) = connect_async(ws_url).await?;
    let (mut write, mut read) = ws_stream.split();
    tracing::info!("page agent connected on {ws_url}");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            outbound = link.outbound_rx.recv() => {
                let request = outbound?;
                let text = serde_json::to_string(&request)?;
                write.send(Message::text(text)).await?;
            }
            incoming = read.next() => {
                let Some(message) = incoming else { break };
                let message = message?;
                if message.is_text() {
                    handle_agent_text(message.to_text()?, &link.pending, event_tx).await;
                }
            }
        }
    }

    Ok(())
}

async fn handle_agent_text(text: &str, pending: &PendingMap, event_tx: &AsyncSender<AppEvent>) {
    let reply: AgentReply = match serde_json::from_str(text) {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!("undecodable agent message: {err}");
            return;
        }
    };

    let event = match reply {
        AgentReply::Selection { id, text, rect } => {
            let selection = Selection { text, rect };
            route_selection(pending, id, SelectionOutcome::Selection(selection)).await;
            return;
        }
        AgentReply::SelectionError { id, error } => {
            tracing::debug!("selection request {id} failed: {error}");
            route_selection(pending, id, SelectionOutcome::NoSelection).await;
            return;
        }
        AgentReply::LookupSelection => AppEvent::LookupSelection,
        AgentReply::SaveWord => AppEvent::SaveWord,
        AgentReply::RemoveWord { word } => AppEvent::RemoveWord(word),
        AgentReply::QuizStart => AppEvent::QuizStart,
        AgentReply::QuizAnswer { answer } => AppEvent::QuizAnswer(answer),
        AgentReply::QuizNext => AppEvent::QuizNext,
        AgentReply::QuizSetting { mixed } => AppEvent::QuizSettingChanged { mixed },
    };

    if let Err(err) = event_tx.send(event).await {
        tracing::error!("failed to forward agent command: {err}");
    }
}

async fn route_selection(pending: &PendingMap, id: u64, outcome: SelectionOutcome) {
    match pending.lock().await.remove(&id) {
        Some(slot) => {
            let _ = slot.send(outcome);
        }
        None => tracing::warn!("selection reply for unknown request {id}"),
    }
}
