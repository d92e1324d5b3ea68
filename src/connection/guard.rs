// src/connection/guard.rs

//! Defines `ConnectionGuard`, an RAII guard for session resource management.

use crate::core::metrics;
use crate::core::state::{ClientOrigin, ServerState};
use std::sync::Arc;
use tracing::debug;

/// An RAII guard that releases everything a session owns when its handler exits,
/// however it exits.
pub struct ConnectionGuard {
    pub(crate) state: Arc<ServerState>,
    pub(crate) session_id: u64,
    pub(crate) origin: ClientOrigin,
}

impl ConnectionGuard {
    pub(crate) fn new(state: Arc<ServerState>, session_id: u64, origin: ClientOrigin) -> Self {
        metrics::CONNECTED_CLIENTS.inc();
        Self {
            state,
            session_id,
            origin,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        metrics::CONNECTED_CLIENTS.dec();

        let released = self.state.gui_registry.release_session(self.session_id);
        metrics::LIVE_RESULT_VIEWS.set(self.state.gui_registry.len() as f64);
        debug!(
            "Session {} ({}) closed, released {} results view(s)",
            self.session_id, self.origin, released
        );

        if self.state.clients.remove(&self.session_id).is_none() {
            debug!(
                "Session {} was not in the client map upon cleanup.",
                self.session_id
            );
        }
    }
}
