// src/server/mod.rs

use crate::config::Config;
use crate::connection::ConnectionHandler;
use crate::core::state::{ClientOrigin, LogReloadHandle, ServerState};
use anyhow::Result;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{info, warn};

mod connection_loop;
mod context;
mod initialization;
mod metrics_server;
mod spawner;
mod stream;

pub use stream::{AnyStream, StdioStream};

/// The TCP startup function, orchestrating all setup phases.
pub async fn run(
    config: Config,
    config_path: Option<String>,
    log_reload_handle: LogReloadHandle,
) -> Result<()> {
    // 1. Initialize state and bind the listener.
    let mut ctx = initialization::setup(config, config_path, log_reload_handle).await?;

    // 2. Spawn background tasks.
    spawner::spawn_all(&ctx.state, &ctx.shutdown_tx, &mut ctx.background_tasks).await;

    // 3. Accept connections until shutdown.
    connection_loop::run(ctx).await
}

/// Serves a single session over stdin/stdout, the way a front-end process talks to
/// a bridge it spawned itself. Returns when stdin reaches end of input or on Ctrl-C.
pub async fn run_stdio(
    config: Config,
    config_path: Option<String>,
    log_reload_handle: LogReloadHandle,
) -> Result<()> {
    initialization::log_startup_info(&config);
    let state = ServerState::initialize(config, config_path, log_reload_handle);

    let (shutdown_tx, global_shutdown_rx) = broadcast::channel(1);
    let mut background_tasks = JoinSet::new();
    spawner::spawn_all(&state, &shutdown_tx, &mut background_tasks).await;

    let (session_id, conn_shutdown_rx) = state.register_client(ClientOrigin::Stdio);
    let mut handler = ConnectionHandler::new(
        AnyStream::Stdio(StdioStream::new()),
        ClientOrigin::Stdio,
        state.clone(),
        session_id,
        conn_shutdown_rx,
        global_shutdown_rx,
    )
    .await;
    info!("Serving session {} on stdin/stdout.", session_id);

    let result = tokio::select! {
        res = handler.run() => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, ending stdio session.");
            Ok(())
        }
    };

    let _ = shutdown_tx.send(());
    background_tasks.shutdown().await;

    if let Err(e) = &result {
        warn!("Stdio session ended with error: {}", e);
    }
    Ok(result?)
}
