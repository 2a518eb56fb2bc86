use serde::{Deserialize, Serialize};

use crate::types::{LookupResult, SelectionRect};

/// Messages sent from the orchestrator to the page agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AgentRequest {
    /// Ask for the current selection. Answered by `AgentReply::Selection`
    /// or `AgentReply::SelectionError` carrying the same id.
    RequestSelection { id: u64 },
    ShowPopup { payload: PopupPayload },
    QuizPrompt { question: String, status: String },
    QuizStatus { text: String },
}

/// Messages received from the page agent: replies to a selection request
/// plus user commands relayed from the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AgentReply {
    Selection {
        id: u64,
        text: String,
        rect: SelectionRect,
    },
    SelectionError {
        id: u64,
        error: String,
    },
    LookupSelection,
    SaveWord,
    RemoveWord {
        word: String,
    },
    QuizStart,
    QuizAnswer {
        answer: String,
    },
    QuizNext,
    QuizSetting {
        mixed: bool,
    },
}

/// Popup display states pushed to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PopupPayload {
    Loading {
        word: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        selection_rect: Option<SelectionRect>,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        selection_rect: Option<SelectionRect>,
    },
    Ready {
        #[serde(skip_serializing_if = "Option::is_none")]
        selection_rect: Option<SelectionRect>,
        #[serde(flatten)]
        result: LookupResult,
    },
}
