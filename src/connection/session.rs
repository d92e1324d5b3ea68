// src/connection/session.rs

//! Defines the state associated with a single front-end session.

use crate::core::context::BackendContext;

/// Holds the state specific to a single session.
#[derive(Debug)]
pub struct SessionState {
    /// The context every command of this session executes against.
    pub ctx: BackendContext,
    /// Request lines answered with `result:`.
    pub succeeded: u64,
    /// Request lines answered with `error:`.
    pub failed: u64,
}

impl SessionState {
    pub(crate) fn new(ctx: BackendContext) -> Self {
        Self {
            ctx,
            succeeded: 0,
            failed: 0,
        }
    }
}
