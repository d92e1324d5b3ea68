// src/core/mod.rs

//! The central module containing the bridge's protocol, commands, and state.

pub mod commands;
pub mod context;
pub mod errors;
pub mod gui;
pub mod handler;
pub mod metrics;
pub mod protocol;
pub mod state;

pub use commands::Command;
pub use context::BackendContext;
pub use errors::BridgeError;
