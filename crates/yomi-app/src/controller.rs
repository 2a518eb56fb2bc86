use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yomi_types::AppEvent;

use crate::agent::{WsAgent, agent_io};
use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub agent_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            agent_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let (ws_url, request_timeout) = {
            let config = self.state.config.read().await;
            (
                config.agent.ws_url.clone(),
                Duration::from_millis(config.agent.request_timeout_ms),
            )
        };

        let (ws_agent, link) = WsAgent::new(request_timeout);
        let agent = Arc::new(ws_agent);

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            agent,
            self.channels.agent_to_app.1.clone(),
        ));

        // Agent IO
        tasks.spawn(agent_io(
            ws_url,
            link,
            self.channels.agent_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
