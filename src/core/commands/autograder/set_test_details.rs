// src/core/commands/autograder/set_test_details.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{format_request, parse_trailing_mode, quote};
use crate::core::context::BackendContext;
use crate::core::gui::GuiMode;
use crate::core::protocol::{ReplyFrame, TokenScanner};

/// Represents the `setTestDetails(name, details, isStyleCheck)` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTestDetails {
    pub test_name: String,
    pub details: String,
    pub mode: GuiMode,
}

impl SetTestDetails {
    pub const NAME: &'static str = "setTestDetails";
}

impl ParseCommand for SetTestDetails {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let test_name = scanner.next_string()?;
        scanner.comma()?;
        let details = scanner.next_string()?;
        let mode = parse_trailing_mode(scanner)?;
        Ok(SetTestDetails {
            test_name,
            details,
            mode,
        })
    }
}

impl ExecutableCommand for SetTestDetails {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        ctx.gui_with_test(self.mode, &self.test_name)?
            .lock()
            .set_test_details(&self.test_name, &self.details)?;
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for SetTestDetails {
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
                quote(&self.details),
                self.mode.is_style_check().to_string(),
            ],
        )
    }
}
