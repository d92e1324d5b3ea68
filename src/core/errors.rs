// src/core/errors.rs

//! Defines the primary error type for the entire bridge.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures within the bridge.
///
/// The first group of variants forms the parse-error class: they are raised while
/// validating a command's token stream and are reported back to the client without
/// ending the session.
#[derive(Error, Debug)]
pub enum BridgeError {
    // --- Parse errors ---
    #[error("expected '{expected}' but found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("expected '{expected}' but reached the end of the command")]
    UnexpectedEnd { expected: String },

    #[error("'{0}' is not a boolean literal")]
    InvalidBoolean(String),

    #[error("'{0}' is not an integer or out of range")]
    InvalidInteger(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence '\\{0}' in string literal")]
    InvalidEscape(char),

    #[error("unexpected trailing input '{0}'")]
    TrailingTokens(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("'{0}' is not a valid test result")]
    InvalidTestResult(String),

    // --- Dispatch and domain errors ---
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("no test named '{0}' in this view")]
    UnknownTest(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    // --- Transport errors ---
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("request line exceeds {0} bytes")]
    LineTooLong(usize),
}

impl BridgeError {
    /// Returns true for errors raised while validating a command's tokens.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            BridgeError::UnexpectedToken { .. }
                | BridgeError::UnexpectedEnd { .. }
                | BridgeError::InvalidBoolean(_)
                | BridgeError::InvalidInteger(_)
                | BridgeError::UnterminatedString
                | BridgeError::InvalidEscape(_)
                | BridgeError::TrailingTokens(_)
                | BridgeError::MalformedRequest(_)
                | BridgeError::InvalidTestResult(_)
        )
    }

    /// Returns true if the error leaves the connection unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BridgeError::Io(_) | BridgeError::LineTooLong(_))
    }
}

// `std::io::Error` is not cloneable, so it is shared behind an `Arc`.
impl Clone for BridgeError {
    fn clone(&self) -> Self {
        match self {
            BridgeError::UnexpectedToken { expected, found } => BridgeError::UnexpectedToken {
                expected: expected.clone(),
                found: found.clone(),
            },
            BridgeError::UnexpectedEnd { expected } => BridgeError::UnexpectedEnd {
                expected: expected.clone(),
            },
            BridgeError::InvalidBoolean(s) => BridgeError::InvalidBoolean(s.clone()),
            BridgeError::InvalidInteger(s) => BridgeError::InvalidInteger(s.clone()),
            BridgeError::UnterminatedString => BridgeError::UnterminatedString,
            BridgeError::InvalidEscape(c) => BridgeError::InvalidEscape(*c),
            BridgeError::TrailingTokens(s) => BridgeError::TrailingTokens(s.clone()),
            BridgeError::MalformedRequest(s) => BridgeError::MalformedRequest(s.clone()),
            BridgeError::UnknownCommand(s) => BridgeError::UnknownCommand(s.clone()),
            BridgeError::UnknownTest(s) => BridgeError::UnknownTest(s.clone()),
            BridgeError::InvalidTestResult(s) => BridgeError::InvalidTestResult(s.clone()),
            BridgeError::LimitExceeded(s) => BridgeError::LimitExceeded(s.clone()),
            BridgeError::Io(e) => BridgeError::Io(Arc::clone(e)),
            BridgeError::LineTooLong(n) => BridgeError::LineTooLong(*n),
        }
    }
}

impl PartialEq for BridgeError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BridgeError::Io(a), BridgeError::Io(b)) => a.kind() == b.kind(),
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(e: std::io::Error) -> Self {
        BridgeError::Io(Arc::new(e))
    }
}
