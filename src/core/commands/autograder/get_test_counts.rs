// src/core/commands/autograder/get_test_counts.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::format_request;
use crate::core::context::BackendContext;
use crate::core::gui::{GuiMode, TestCounts};
use crate::core::protocol::{ReplyFrame, TokenScanner};

/// Represents the `getTestCounts(isStyleCheck)` command.
///
/// Replies with `passed,failed,total`. Querying a view that was never created
/// reports zeros without creating it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetTestCounts {
    pub is_style_check: bool,
}

impl GetTestCounts {
    pub const NAME: &'static str = "getTestCounts";
}

impl ParseCommand for GetTestCounts {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let is_style_check = scanner.next_bool()?;
        scanner.close_paren()?;
        Ok(GetTestCounts { is_style_check })
    }
}

impl ExecutableCommand for GetTestCounts {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        let counts = ctx
            .existing_gui(self.mode())
            .map(|gui| gui.lock().counts())
            .unwrap_or_else(TestCounts::default);
        Ok(ReplyFrame::Value(counts.to_string()))
    }
}

impl CommandSpec for GetTestCounts {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn arity(&self) -> usize {
        1
    }

    fn flags(&self) -> CommandFlags {
        CommandFlags::empty()
    }

    fn mode(&self) -> GuiMode {
        GuiMode::from(self.is_style_check)
    }

    fn to_request_line(&self) -> String {
        format_request(Self::NAME, &[self.is_style_check.to_string()])
    }
}
