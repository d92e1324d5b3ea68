// src/core/commands/autograder/set_test_result.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{format_request, parse_trailing_mode, quote};
use crate::core::context::BackendContext;
use crate::core::gui::{GuiMode, TestResult};
use crate::core::protocol::{ReplyFrame, TokenScanner};

/// Represents the `setTestResult(name, result, isStyleCheck)` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTestResult {
    pub test_name: String,
    pub result: TestResult,
    pub mode: GuiMode,
}

impl SetTestResult {
    pub const NAME: &'static str = "setTestResult";
}

impl ParseCommand for SetTestResult {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let test_name = scanner.next_string()?;
        scanner.comma()?;
        let result = TestResult::parse(&scanner.next_string()?)?;
        let mode = parse_trailing_mode(scanner)?;
        Ok(SetTestResult {
            test_name,
            result,
            mode,
        })
    }
}

impl ExecutableCommand for SetTestResult {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        ctx.gui_with_test(self.mode, &self.test_name)?
            .lock()
            .set_test_result(&self.test_name, self.result)?;
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for SetTestResult {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn arity(&self) -> usize {
        3
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
                quote(&self.test_name),
                self.result.to_string(),
                self.mode.is_style_check().to_string(),
            ],
        )
    }
}
