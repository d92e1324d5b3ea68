// src/core/commands/mod.rs

//! This module defines all supported commands and provides the central `Command`
//! enum that encapsulates their parsed state. The `define_commands!` macro is
//! used to generate the enum and its core implementations.

use crate::core::BridgeError;
use crate::core::commands::command_trait::{
    CommandExt, CommandFlags, ExecutableCommand, ParseCommand,
};
use crate::core::context::BackendContext;
use crate::core::protocol::{ReplyFrame, RequestFrame, TokenScanner};

pub use command_spec::CommandSpec;

#[macro_use]
mod command_def;

pub mod autograder;
pub mod command_spec;
pub mod command_trait;
pub mod helpers;

define_commands! {
    (AddTest, AddTest, autograder),
    (SetTestResult, SetTestResult, autograder),
    (SetTestDetails, SetTestDetails, autograder),
    (SetTestRuntime, SetTestRuntime, autograder),
    (ClearTestResults, ClearTestResults, autograder),
    (SetTestingCompleted, SetTestingCompleted, autograder),
    (SetVisible, SetVisible, autograder),
    (GetTestCounts, GetTestCounts, autograder),
}

impl Command {
    /// The protocol name of the command, without namespace.
    pub fn name(&self) -> &'static str {
        self.spec().name()
    }

    /// Resolves a request's command name and parses its arguments.
    ///
    /// The whole argument list must be consumed; anything left after the closing
    /// parenthesis is a parse error.
    pub fn from_request(request: &RequestFrame) -> Result<Self, BridgeError> {
        let name = helpers::strip_namespace(&request.name);
        let mut scanner = TokenScanner::new(request.args.clone());
        let command = Self::parse_by_name(name, &mut scanner)?
            .ok_or_else(|| BridgeError::UnknownCommand(request.name.clone()))?;
        scanner.expect_end()?;
        Ok(command)
    }
}

impl TryFrom<&str> for Command {
    type Error = BridgeError;

    /// Parses a complete request line such as `ClearTestResults(true)`.
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        Command::from_request(&RequestFrame::parse(line)?)
    }
}
