// src/server/connection_loop.rs

//! Contains the accept loop and graceful shutdown handling.

use super::context::ServerContext;
use super::stream::AnyStream;
use crate::connection::ConnectionHandler;
use crate::core::metrics;
use crate::core::state::ClientOrigin;
use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::signal::unix::{SignalKind, signal};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Accepts connections until a termination signal arrives or a background task fails.
pub async fn run(mut ctx: ServerContext) -> Result<()> {
    let mut client_tasks = JoinSet::new();

    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    let mut sighup = signal(SignalKind::hangup()).context("Failed to register SIGHUP handler")?;

    loop {
        tokio::select! {
            biased;

            _ = sigint.recv() => {
                info!("SIGINT received, initiating graceful shutdown.");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, initiating graceful shutdown.");
                break;
            }
            _ = sighup.recv() => {
                info!("SIGHUP received, reloading configuration.");
                if let Err(e) = ctx.state.reload_config().await {
                    error!("Configuration reload failed: {:#}", e);
                }
            }

            Some(res) = ctx.background_tasks.join_next() => {
                match res {
                    Ok(Ok(())) => warn!("A background task finished unexpectedly without an error."),
                    Ok(Err(e)) => { error!("CRITICAL: Background task failed: {}. Shutting down.", e); break; }
                    Err(e) => { error!("CRITICAL: Background task panicked: {e:?}. Shutting down."); break; }
                }
            },

            res = ctx.listener.accept() => {
                let (mut socket, addr) = match res {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                info!("Accepted new connection from: {}", addr);
                metrics::CONNECTIONS_RECEIVED_TOTAL.inc();

                let max_clients = ctx.state.config.lock().await.max_clients;
                if ctx.state.clients.len() >= max_clients {
                    warn!("Rejecting {}: max number of clients ({}) reached", addr, max_clients);
                    let _ = socket.write_all(b"error:max number of clients reached\n").await;
                    continue;
                }

                let origin = ClientOrigin::Tcp(addr);
                let (session_id, conn_shutdown_rx) = ctx.state.register_client(origin.clone());
                let global_shutdown_rx = ctx.shutdown_tx.subscribe();
                let state_clone = ctx.state.clone();

                client_tasks.spawn(async move {
                    let mut handler = ConnectionHandler::new(
                        AnyStream::Tcp(socket),
                        origin,
                        state_clone,
                        session_id,
                        conn_shutdown_rx,
                        global_shutdown_rx,
                    )
                    .await;
                    if let Err(e) = handler.run().await {
                        warn!("Connection from {} terminated unexpectedly: {}", addr, e);
                    }
                });
            },

            Some(res) = client_tasks.join_next() => {
                if let Err(e) = res
                    && e.is_panic()
                {
                    error!("A client handler panicked: {e:?}");
                }
            },
        }
    }

    info!("Shutting down. Sending signal to all tasks.");
    if ctx.shutdown_tx.send(()).is_err() {
        info!("No tasks were listening for the shutdown signal.");
    }

    while client_tasks.join_next().await.is_some() {}
    info!("All client connections closed.");

    ctx.background_tasks.shutdown().await;
    info!("Shutdown complete. {} connections served.", ctx.state.stats.get_total_connections());
    Ok(())
}
