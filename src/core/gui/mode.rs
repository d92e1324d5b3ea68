// src/core/gui/mode.rs

use std::fmt;

/// Selects one of the two independent result views a session owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuiMode {
    /// Functional unit-test results.
    Functional,
    /// Style-check results, tracked separately from functional results.
    StyleCheck,
}

impl GuiMode {
    pub fn is_style_check(self) -> bool {
        matches!(self, GuiMode::StyleCheck)
    }
}

impl From<bool> for GuiMode {
    /// Maps the protocol's `isStyleCheck` flag to a mode.
    fn from(is_style_check: bool) -> Self {
        if is_style_check {
            GuiMode::StyleCheck
        } else {
            GuiMode::Functional
        }
    }
}

impl fmt::Display for GuiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuiMode::Functional => f.write_str("functional"),
            GuiMode::StyleCheck => f.write_str("style-check"),
        }
    }
}
