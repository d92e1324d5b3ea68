// src/server/initialization.rs

//! Handles bridge initialization: state setup and binding the listener.

use super::context::ServerContext;
use crate::config::Config;
use crate::core::state::{LogReloadHandle, ServerState};
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::info;

/// Initializes all bridge components before starting the accept loop.
pub async fn setup(
    config: Config,
    config_path: Option<String>,
    log_reload_handle: LogReloadHandle,
) -> Result<ServerContext> {
    log_startup_info(&config);
    let (shutdown_tx, _) = broadcast::channel(1);

    let (host, port) = (config.host.clone(), config.port);
    let state = ServerState::initialize(config, config_path, log_reload_handle);
    info!("Bridge state initialized.");

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    info!("gradebridge listening on {}", listener.local_addr()?);

    Ok(ServerContext {
        state,
        listener,
        shutdown_tx,
        background_tasks: JoinSet::new(),
    })
}

pub(super) fn log_startup_info(config: &Config) {
    info!(
        "gradebridge {} starting (max_clients={}, max_line_length={}, max_tests_per_view={})",
        env!("CARGO_PKG_VERSION"),
        config.max_clients,
        config.max_line_length,
        config.autograder.max_tests_per_view
    );
}
