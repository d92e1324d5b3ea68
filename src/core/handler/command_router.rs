// src/core/handler/command_router.rs

//! The central component for routing parsed commands to their implementations.
//!
//! The `Router` receives a request line from the `ConnectionHandler`, parses it
//! into a `Command`, executes it against the session's `BackendContext`, and
//! records metrics. Every failure is turned into a `BridgeError` for the caller to
//! report; the router never ends a session by itself.

use crate::core::commands::command_trait::{CommandExt, CommandFlags};
use crate::core::context::BackendContext;
use crate::core::metrics;
use crate::core::protocol::{ReplyFrame, RequestFrame};
use crate::core::{BridgeError, Command};
use std::time::Instant;
use tracing::{debug, info_span, warn};

/// Routes commands for a single session.
pub struct Router<'a> {
    ctx: &'a BackendContext,
}

impl<'a> Router<'a> {
    pub fn new(ctx: &'a BackendContext) -> Self {
        Self { ctx }
    }

    /// Parses a raw request line into a `Command`.
    pub fn parse(&self, line: &str) -> Result<Command, BridgeError> {
        RequestFrame::parse(line)
            .and_then(|request| Command::from_request(&request))
            .inspect_err(|e| {
                if e.is_parse_error() {
                    metrics::PARSE_ERRORS_TOTAL.inc();
                }
            })
    }

    /// Executes an already parsed command and records its metrics.
    pub fn route(&self, command: &Command) -> Result<ReplyFrame, BridgeError> {
        let command_name = command.name();
        let span = info_span!(
            "command",
            name = command_name,
            session_id = self.ctx.session_id()
        );
        let _enter = span.enter();

        let start = Instant::now();
        let result = command.execute(self.ctx);
        metrics::COMMAND_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());
        metrics::COMMANDS_PROCESSED_TOTAL
            .with_label_values(&[command_name])
            .inc();

        match &result {
            Ok(_) if command.get_flags().contains(CommandFlags::MUTATES_GUI) => {
                metrics::LIVE_RESULT_VIEWS.set(self.ctx.registry().len() as f64);
                debug!("Applied {}", command.spec().to_request_line());
            }
            Ok(_) => {}
            Err(e) => {
                metrics::COMMAND_ERRORS_TOTAL.inc();
                warn!("Command {} failed: {}", command_name, e);
            }
        }
        result
    }

    /// Parses and executes one request line, producing the reply to send.
    pub fn dispatch(&self, line: &str) -> Result<ReplyFrame, BridgeError> {
        let command = self.parse(line)?;
        self.route(&command)
    }
}
