// src/core/state/core.rs

//! Defines the central `ServerState` struct, holding all shared bridge-wide state.

use super::client::*;
use super::stats::StatsState;
use crate::config::Config;
use crate::core::context::BackendContext;
use crate::core::gui::GuiRegistry;
use anyhow::{Context, Result};
use dashmap::DashMap;
use parking_lot::Mutex as SyncMutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, broadcast};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, reload};

/// The handle used to swap the active log filter at runtime.
pub type LogReloadHandle = Arc<reload::Handle<EnvFilter, tracing_subscriber::Registry>>;

/// The central struct holding all shared, bridge-wide state.
/// It is wrapped in an `Arc` and handed to every connection handler.
#[derive(Debug)]
pub struct ServerState {
    /// The bridge's runtime configuration. Replaced wholesale on reload.
    pub config: Arc<Mutex<Config>>,
    /// The file the configuration was loaded from, if any. Used for reloads.
    pub config_path: Option<String>,
    /// A map of all active sessions, keyed by session ID, with a shutdown sender
    /// for targeted termination.
    pub clients: ClientMap,
    /// Every results view, scoped by session.
    pub gui_registry: Arc<GuiRegistry>,
    pub stats: StatsState,
    pub log_reload_handle: LogReloadHandle,
    session_id_counter: AtomicU64,
}

impl ServerState {
    /// Builds the shared state from a validated configuration.
    pub fn initialize(
        config: Config,
        config_path: Option<String>,
        log_reload_handle: LogReloadHandle,
    ) -> Arc<Self> {
        let gui_registry = Arc::new(GuiRegistry::new(config.autograder.max_tests_per_view));
        Arc::new(Self {
            config: Arc::new(Mutex::new(config)),
            config_path,
            clients: Arc::new(DashMap::new()),
            gui_registry,
            stats: StatsState::new(),
            log_reload_handle,
            session_id_counter: AtomicU64::new(0),
        })
    }

    /// Allocates a fresh session and registers it in the client map.
    /// Returns the session ID and the receiver for targeted shutdown.
    pub fn register_client(&self, origin: ClientOrigin) -> (u64, broadcast::Receiver<()>) {
        let session_id = self.session_id_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let info = Arc::new(SyncMutex::new(ClientInfo::new(origin, session_id)));
        self.clients.insert(session_id, (info, shutdown_tx));
        self.stats.increment_total_connections();
        (session_id, shutdown_rx)
    }

    /// Creates the back-end context commands of `session_id` execute against.
    pub fn backend_context(&self, session_id: u64) -> BackendContext {
        BackendContext::new(session_id, self.gui_registry.clone())
    }

    /// Re-reads the configuration file and applies the settings that can change
    /// without a restart (currently the log level).
    pub async fn reload_config(&self) -> Result<()> {
        let Some(path) = self.config_path.as_deref() else {
            info!("No configuration file in use; nothing to reload.");
            return Ok(());
        };
        let new_config = Config::from_file(path)?;
        self.log_reload_handle
            .reload(EnvFilter::new(&new_config.log_level))
            .context("Failed to apply new log level")?;
        info!(
            "Configuration reloaded from \"{}\" (log_level={})",
            path, new_config.log_level
        );
        *self.config.lock().await = new_config;
        Ok(())
    }
}
