// src/server/spawner.rs

//! Spawns the bridge's long-running background tasks.

use super::metrics_server;
use crate::core::state::ServerState;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::info;

/// Spawns all background tasks into the provided JoinSet.
pub async fn spawn_all(
    state: &Arc<ServerState>,
    shutdown_tx: &broadcast::Sender<()>,
    background_tasks: &mut JoinSet<Result<(), anyhow::Error>>,
) {
    let metrics_enabled = state.config.lock().await.metrics.enabled;
    if metrics_enabled {
        let metrics_state = state.clone();
        let shutdown_rx = shutdown_tx.subscribe();
        background_tasks
            .spawn(async move { metrics_server::run_metrics_server(metrics_state, shutdown_rx).await });
    } else {
        info!("Prometheus metrics server is disabled in the configuration.");
    }
}
