// src/core/metrics.rs

//! Defines and registers Prometheus metrics for bridge monitoring.
//!
//! This module uses `lazy_static` to ensure that metrics are registered only once
//! globally for the entire application lifecycle.

use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, TextEncoder, register_counter, register_counter_vec,
    register_gauge, register_histogram,
};

lazy_static! {
    // --- Gauges ---
    /// The number of front-end sessions currently connected.
    pub static ref CONNECTED_CLIENTS: Gauge =
        register_gauge!("gradebridge_connected_clients", "Number of currently connected sessions.").unwrap();
    /// The number of live results views across all sessions.
    pub static ref LIVE_RESULT_VIEWS: Gauge =
        register_gauge!("gradebridge_live_result_views", "Number of results views currently held by sessions.").unwrap();

    // --- Counters ---
    /// The total number of commands executed, labeled by command name.
    pub static ref COMMANDS_PROCESSED_TOTAL: CounterVec =
        register_counter_vec!("gradebridge_commands_processed_total", "Total number of commands processed, labeled by command.", &["command"]).unwrap();
    /// The total number of request lines rejected by the token validation steps.
    pub static ref PARSE_ERRORS_TOTAL: Counter =
        register_counter!("gradebridge_parse_errors_total", "Total number of request lines that failed to parse.").unwrap();
    /// The total number of commands that parsed but failed during execution.
    pub static ref COMMAND_ERRORS_TOTAL: Counter =
        register_counter!("gradebridge_command_errors_total", "Total number of commands that failed during execution.").unwrap();
    /// The total number of connections accepted since startup.
    pub static ref CONNECTIONS_RECEIVED_TOTAL: Counter =
        register_counter!("gradebridge_connections_received_total", "Total number of connections received.").unwrap();

    // --- Histograms ---
    /// A histogram of command execution latencies.
    pub static ref COMMAND_LATENCY_SECONDS: Histogram =
        register_histogram!("gradebridge_command_latency_seconds", "Latency of command processing in seconds.").unwrap();
}

/// Gathers all registered metrics and encodes them in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode_to_string(&metric_families).unwrap_or_default()
}
