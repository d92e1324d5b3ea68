// src/core/state/stats.rs

//! Contains counters for bridge-wide statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Bridge-wide counters, readable without touching the metrics registry.
#[derive(Debug, Default)]
pub struct StatsState {
    total_connections: AtomicU64,
    total_commands: AtomicU64,
    total_failed_requests: AtomicU64,
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total_connections(&self) {
        self.total_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_connections(&self) -> u64 {
        self.total_connections.load(Ordering::Relaxed)
    }

    pub fn increment_total_commands(&self) {
        self.total_commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_commands(&self) -> u64 {
        self.total_commands.load(Ordering::Relaxed)
    }

    /// Counts a request line answered with an `error:` reply.
    pub fn increment_failed_requests(&self) {
        self.total_failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_failed_requests(&self) -> u64 {
        self.total_failed_requests.load(Ordering::Relaxed)
    }
}
