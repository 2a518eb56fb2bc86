use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;
use yomi_config::Config;

pub mod agent;
pub mod controller;
pub mod events;
pub mod state;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::new();
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(Arc::clone(&state));
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => tracing::warn!("no tasks spawned"),
            }
        }
    }

    controller.shutdown();
    Ok(())
}
