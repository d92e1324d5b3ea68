// src/core/context.rs

//! Defines `BackendContext`, the session-scoped handle every command executes against.

use crate::core::BridgeError;
use crate::core::gui::{GuiHandle, GuiMode, GuiRegistry};
use std::sync::Arc;

/// The running bridge as seen by one session.
///
/// Commands never reach results views through global state: they ask the context,
/// which scopes every lookup by the session it belongs to.
#[derive(Debug, Clone)]
pub struct BackendContext {
    session_id: u64,
    registry: Arc<GuiRegistry>,
}

impl BackendContext {
    pub fn new(session_id: u64, registry: Arc<GuiRegistry>) -> Self {
        Self {
            session_id,
            registry,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Resolves this session's view for `mode`, creating it on first use.
    pub fn gui(&self, mode: GuiMode) -> GuiHandle {
        self.registry.get_instance(self.session_id, mode)
    }

    /// Returns this session's view for `mode` without creating it.
    pub fn existing_gui(&self, mode: GuiMode) -> Option<GuiHandle> {
        self.registry.peek(self.session_id, mode)
    }

    /// Returns this session's view for `mode` if it already holds `test_name`.
    /// Never creates a view.
    pub fn gui_with_test(&self, mode: GuiMode, test_name: &str) -> Result<GuiHandle, BridgeError> {
        self.existing_gui(mode)
            .filter(|gui| gui.lock().test(test_name).is_some())
            .ok_or_else(|| BridgeError::UnknownTest(test_name.to_string()))
    }

    pub fn registry(&self) -> &Arc<GuiRegistry> {
        &self.registry
    }
}
