// src/core/gui/registry.rs

//! Session-scoped lookup of results views.
//!
//! Each session owns at most one view per `GuiMode`. Views are created lazily the
//! first time a command asks for them and live until the session is released.

use super::mode::GuiMode;
use super::results_view::AutograderGui;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tracing::debug;

/// A shared handle to one results view.
#[derive(Debug, Clone)]
pub struct GuiHandle(Arc<Mutex<AutograderGui>>);

impl GuiHandle {
    fn new(gui: AutograderGui) -> Self {
        Self(Arc::new(Mutex::new(gui)))
    }

    /// Locks the view for the duration of one operation.
    pub fn lock(&self) -> MutexGuard<'_, AutograderGui> {
        self.0.lock()
    }

    pub fn clear_test_results(&self) {
        self.lock().clear_test_results();
    }

    /// True if both handles point at the same view.
    pub fn ptr_eq(&self, other: &GuiHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The key under which a view is registered.
pub type GuiKey = (u64, GuiMode);

/// Maps `(session_id, mode)` to the view owned by that session.
#[derive(Debug, Default)]
pub struct GuiRegistry {
    views: DashMap<GuiKey, GuiHandle>,
    max_tests_per_view: usize,
}

impl GuiRegistry {
    pub fn new(max_tests_per_view: usize) -> Self {
        Self {
            views: DashMap::new(),
            max_tests_per_view,
        }
    }

    /// Returns the view for `(session_id, mode)`, creating it on first use.
    pub fn get_instance(&self, session_id: u64, mode: GuiMode) -> GuiHandle {
        self.views
            .entry((session_id, mode))
            .or_insert_with(|| {
                debug!("Session {}: creating {} results view", session_id, mode);
                GuiHandle::new(AutograderGui::new(mode, self.max_tests_per_view))
            })
            .clone()
    }

    /// Returns the view for `(session_id, mode)` only if it already exists.
    pub fn peek(&self, session_id: u64, mode: GuiMode) -> Option<GuiHandle> {
        self.views.get(&(session_id, mode)).map(|v| v.clone())
    }

    /// Drops every view owned by `session_id`, returning how many were removed.
    pub fn release_session(&self, session_id: u64) -> usize {
        [GuiMode::Functional, GuiMode::StyleCheck]
            .into_iter()
            .filter(|mode| self.views.remove(&(session_id, *mode)).is_some())
            .count()
    }

    /// The number of live views across all sessions.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
