// src/core/commands/command_trait.rs

//! Defines the core traits for all executable commands.

use crate::core::BridgeError;
use crate::core::context::BackendContext;
use crate::core::protocol::{ReplyFrame, TokenScanner};
use bitflags::bitflags;

bitflags! {
    /// Flags that describe the properties and behavior of a command.
    /// These are used by the router when recording and logging commands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CommandFlags: u32 {
        /// The command changes the state of a results view.
        const MUTATES_GUI    = 1 << 0;
    }
}

/// A composite trait implemented on the main `Command` enum.
pub trait CommandExt {
    /// Returns the flags for the command.
    fn get_flags(&self) -> CommandFlags;

    /// Executes the command against a session's back-end context.
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError>;
}

/// A trait for the actual execution logic of a command.
/// Implemented by each command's struct (e.g., `ClearTestResults`).
pub trait ExecutableCommand {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError>;
}

/// A trait for parsing a command's arguments from a token stream.
///
/// Implementations consume exactly their own grammar, starting at the opening
/// parenthesis. Checking for trailing input is left to the caller.
pub trait ParseCommand: Sized {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError>;
}
