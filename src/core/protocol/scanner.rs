// src/core/protocol/scanner.rs

//! An explicit cursor over a command's argument tokens.
//!
//! Every command parses its arguments through a `TokenScanner`. All methods
//! return a `BridgeError` from the parse class instead of panicking, so a
//! malformed command never reaches execution.

use super::token::{Token, tokenize};
use crate::core::BridgeError;

/// A helper struct to consume command tokens sequentially.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenScanner {
    /// Creates a new scanner over an already tokenized argument list.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Tokenizes `input` and creates a scanner over the result.
    pub fn from_input(input: &str) -> Result<Self, BridgeError> {
        Ok(Self::new(tokenize(input)?))
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Consumes and returns the next token, if any.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    /// Consumes the next token and checks that it equals `expected`.
    pub fn verify_token(&mut self, expected: &Token) -> Result<(), BridgeError> {
        match self.next_token() {
            Some(ref found) if found == expected => Ok(()),
            Some(found) => Err(BridgeError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            }),
            None => Err(BridgeError::UnexpectedEnd {
                expected: expected.to_string(),
            }),
        }
    }

    pub fn open_paren(&mut self) -> Result<(), BridgeError> {
        self.verify_token(&Token::OpenParen)
    }

    pub fn close_paren(&mut self) -> Result<(), BridgeError> {
        self.verify_token(&Token::CloseParen)
    }

    pub fn comma(&mut self) -> Result<(), BridgeError> {
        self.verify_token(&Token::Comma)
    }

    /// Consumes a boolean literal.
    ///
    /// Accepts `true`/`false` in any letter case, as well as `1`/`0`.
    pub fn next_bool(&mut self) -> Result<bool, BridgeError> {
        match self.next_token() {
            Some(Token::Word(w)) => {
                parse_bool_literal(&w).ok_or(BridgeError::InvalidBoolean(w))
            }
            Some(other) => Err(BridgeError::InvalidBoolean(other.to_string())),
            None => Err(BridgeError::UnexpectedEnd {
                expected: "boolean".to_string(),
            }),
        }
    }

    /// Consumes a signed decimal integer.
    pub fn next_int(&mut self) -> Result<i64, BridgeError> {
        match self.next_token() {
            Some(Token::Word(w)) => w.parse().map_err(|_| BridgeError::InvalidInteger(w)),
            Some(other) => Err(BridgeError::InvalidInteger(other.to_string())),
            None => Err(BridgeError::UnexpectedEnd {
                expected: "integer".to_string(),
            }),
        }
    }

    /// Consumes a string argument. Both quoted literals and bare words are accepted.
    pub fn next_string(&mut self) -> Result<String, BridgeError> {
        match self.next_token() {
            Some(Token::Str(s)) | Some(Token::Word(s)) => Ok(s),
            Some(other) => Err(BridgeError::UnexpectedToken {
                expected: "string".to_string(),
                found: other.to_string(),
            }),
            None => Err(BridgeError::UnexpectedEnd {
                expected: "string".to_string(),
            }),
        }
    }

    /// Fails if any tokens are left unconsumed.
    pub fn expect_end(&self) -> Result<(), BridgeError> {
        if self.is_exhausted() {
            return Ok(());
        }
        let rest: Vec<String> = self.tokens[self.cursor..]
            .iter()
            .map(ToString::to_string)
            .collect();
        Err(BridgeError::TrailingTokens(rest.join(" ")))
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// The number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.cursor)
    }
}

/// Interprets a bare word as a boolean literal.
pub fn parse_bool_literal(word: &str) -> Option<bool> {
    if word.eq_ignore_ascii_case("true") || word == "1" {
        Some(true)
    } else if word.eq_ignore_ascii_case("false") || word == "0" {
        Some(false)
    } else {
        None
    }
}
