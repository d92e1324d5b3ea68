// src/core/commands/helpers.rs

//! Provides helper functions shared by the command parsers and serializers.

use crate::core::BridgeError;
use crate::core::gui::GuiMode;
use crate::core::protocol::TokenScanner;

/// The namespace every autograder command name may carry on the wire.
pub const AUTOGRADER_NAMESPACE: &str = "AutograderUnitTest";

/// Strips an optional `AutograderUnitTest.` prefix (in any letter case) from a
/// command name.
pub fn strip_namespace(name: &str) -> &str {
    let prefix_len = AUTOGRADER_NAMESPACE.len();
    if name.len() > prefix_len
        && name.is_char_boundary(prefix_len)
        && name[..prefix_len].eq_ignore_ascii_case(AUTOGRADER_NAMESPACE)
        && name[prefix_len..].starts_with('.')
    {
        &name[prefix_len + 1..]
    } else {
        name
    }
}

/// Parses the trailing `, isStyleCheck)` shared by most commands.
pub fn parse_trailing_mode(scanner: &mut TokenScanner) -> Result<GuiMode, BridgeError> {
    scanner.comma()?;
    let is_style_check = scanner.next_bool()?;
    scanner.close_paren()?;
    Ok(GuiMode::from(is_style_check))
}

/// Writes a string as a quoted literal that the lexer reads back unchanged.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Builds a namespaced request line from already formatted arguments.
pub fn format_request(name: &str, args: &[String]) -> String {
    format!("{AUTOGRADER_NAMESPACE}.{name}({})", args.join(", "))
}
