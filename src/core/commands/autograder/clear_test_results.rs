// src/core/commands/autograder/clear_test_results.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::format_request;
use crate::core::context::BackendContext;
use crate::core::gui::GuiMode;
use crate::core::protocol::{ReplyFrame, TokenScanner};
use tracing::info;

/// Represents the `clearTestResults(isStyleCheck)` command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearTestResults {
    pub is_style_check: bool,
}

impl ClearTestResults {
    pub const NAME: &'static str = "clearTestResults";
}

impl ParseCommand for ClearTestResults {
    /// Parses `( <bool> )`.
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let is_style_check = scanner.next_bool()?;
        scanner.close_paren()?;
        Ok(ClearTestResults { is_style_check })
    }
}

impl ExecutableCommand for ClearTestResults {
    /// Resolves the session's view for the requested mode and clears it.
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        let mode = self.mode();
        info!(
            "Session {}: clearing {} test results",
            ctx.session_id(),
            mode
        );
        ctx.gui(mode).clear_test_results();
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for ClearTestResults {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn arity(&self) -> usize {
        1
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::MUTATES_GUI
    }

    fn mode(&self) -> GuiMode {
        GuiMode::from(self.is_style_check)
    }

    fn to_request_line(&self) -> String {
        format_request(Self::NAME, &[self.is_style_check.to_string()])
    }
}
