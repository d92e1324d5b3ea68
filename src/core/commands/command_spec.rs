// src/core/commands/command_spec.rs

//! Defines the `CommandSpec` trait, which provides metadata about a command.

use crate::core::commands::command_trait::CommandFlags;
use crate::core::gui::GuiMode;

/// A trait for describing a command's properties and how to write it back out.
pub trait CommandSpec {
    /// The protocol name of the command, without namespace (e.g. `clearTestResults`).
    fn name(&self) -> &'static str;

    /// The number of comma-separated arguments inside the parentheses.
    fn arity(&self) -> usize;

    /// A bitmask of flags describing the command's behavior.
    fn flags(&self) -> CommandFlags;

    /// The results view the command targets.
    fn mode(&self) -> GuiMode;

    /// Converts the parsed command back into a request line.
    fn to_request_line(&self) -> String;
}
