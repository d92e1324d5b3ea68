// src/core/commands/autograder/set_test_runtime.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{format_request, parse_trailing_mode, quote};
use crate::core::context::BackendContext;
use crate::core::gui::GuiMode;
use crate::core::protocol::{ReplyFrame, TokenScanner};

/// Represents the `setTestRuntime(name, millis, isStyleCheck)` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTestRuntime {
    pub test_name: String,
    pub runtime_ms: u64,
    pub mode: GuiMode,
}

impl SetTestRuntime {
    pub const NAME: &'static str = "setTestRuntime";
}

impl ParseCommand for SetTestRuntime {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let test_name = scanner.next_string()?;
        scanner.comma()?;
        let raw = scanner.next_int()?;
        let runtime_ms =
            u64::try_from(raw).map_err(|_| BridgeError::InvalidInteger(raw.to_string()))?;
        let mode = parse_trailing_mode(scanner)?;
        Ok(SetTestRuntime {
            test_name,
            runtime_ms,
            mode,
        })
    }
}

impl ExecutableCommand for SetTestRuntime {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        ctx.gui_with_test(self.mode, &self.test_name)?
            .lock()
            .set_test_runtime(&self.test_name, self.runtime_ms)?;
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for SetTestRuntime {
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
                self.runtime_ms.to_string(),
                self.mode.is_style_check().to_string(),
            ],
        )
    }
}
