use serde::{Deserialize, Serialize};

fn default_ws_url() -> String {
    "ws://localhost:8080/agent".to_string()
}

fn default_request_timeout_ms() -> u64 {
    3000
}

/// Page-agent transport settings.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AgentConfig {
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// How long a selection request may wait for the agent's reply.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
