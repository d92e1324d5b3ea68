// src/core/commands/autograder/set_testing_completed.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{format_request, parse_trailing_mode};
use crate::core::context::BackendContext;
use crate::core::gui::GuiMode;
use crate::core::protocol::{ReplyFrame, TokenScanner};
use tracing::debug;

/// Represents the `setTestingCompleted(completed, isStyleCheck)` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTestingCompleted {
    pub completed: bool,
    pub mode: GuiMode,
}

impl SetTestingCompleted {
    pub const NAME: &'static str = "setTestingCompleted";
}

impl ParseCommand for SetTestingCompleted {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let completed = scanner.next_bool()?;
        let mode = parse_trailing_mode(scanner)?;
        Ok(SetTestingCompleted { completed, mode })
    }
}

impl ExecutableCommand for SetTestingCompleted {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        debug!(
            "Session {}: {} testing completed = {}",
            ctx.session_id(),
            self.mode,
            self.completed
        );
        ctx.gui(self.mode).lock().set_testing_completed(self.completed);
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for SetTestingCompleted {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn arity(&self) -> usize {
        2
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::MUTATES_GUI
    }

    fn mode(&self) -> GuiMode {
        self.mode
    }

    fn to_request_line(&self) -> String {
        format_request(
            Self::NAME,
            &[
                self.completed.to_string(),
                self.mode.is_style_check().to_string(),
            ],
        )
    }
}
