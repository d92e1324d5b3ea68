// src/core/commands/autograder/set_visible.rs

use crate::core::BridgeError;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand};
use crate::core::commands::helpers::{format_request, parse_trailing_mode};
use crate::core::context::BackendContext;
use crate::core::gui::GuiMode;
use crate::core::protocol::{ReplyFrame, TokenScanner};

/// Represents the `setVisible(visible, isStyleCheck)` command.
#[derive(Debug, Clone, PartialEq)]
pub struct SetVisible {
    pub visible: bool,
    pub mode: GuiMode,
}

impl SetVisible {
    pub const NAME: &'static str = "setVisible";
}

impl ParseCommand for SetVisible {
    fn parse(scanner: &mut TokenScanner) -> Result<Self, BridgeError> {
        scanner.open_paren()?;
        let visible = scanner.next_bool()?;
        let mode = parse_trailing_mode(scanner)?;
        Ok(SetVisible { visible, mode })
    }
}

impl ExecutableCommand for SetVisible {
    fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
        ctx.gui(self.mode).lock().set_visible(self.visible);
        Ok(ReplyFrame::Ok)
    }
}

impl CommandSpec for SetVisible {
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
                self.visible.to_string(),
                self.mode.is_style_check().to_string(),
            ],
        )
    }
}
