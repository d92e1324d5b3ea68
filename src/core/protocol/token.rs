// src/core/protocol/token.rs

//! Lexical units of a command line and the lexer that produces them.

use crate::core::BridgeError;
use std::fmt;

/// A single lexical unit of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Comma,
    /// A bare run of characters: identifiers, numbers and literals such as `true`.
    Word(String),
    /// A double-quoted string literal with its escapes already resolved.
    Str(String),
}

impl Token {
    /// Convenience constructor for a bare word token.
    pub fn word(s: impl Into<String>) -> Self {
        Token::Word(s.into())
    }

    /// Convenience constructor for a quoted string token.
    pub fn string(s: impl Into<String>) -> Self {
        Token::Str(s.into())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Word(w) => f.write_str(w),
            Token::Str(s) => write!(f, "{s:?}"),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | ',' | '"')
}

/// Splits a command line into tokens.
///
/// Whitespace separates tokens and is otherwise ignored. Delimiters are always
/// single tokens, even when not surrounded by whitespace.
pub fn tokenize(input: &str) -> Result<Vec<Token>, BridgeError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '"' => {
                chars.next();
                tokens.push(Token::Str(read_string_literal(&mut chars)?));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || is_delimiter(c) {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    Ok(tokens)
}

/// Reads the body of a string literal whose opening quote was already consumed.
fn read_string_literal<I>(chars: &mut std::iter::Peekable<I>) -> Result<String, BridgeError>
where
    I: Iterator<Item = char>,
{
    let mut out = String::new();
    loop {
        match chars.next() {
            None => return Err(BridgeError::UnterminatedString),
            Some('"') => return Ok(out),
            Some('\\') => match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => return Err(BridgeError::InvalidEscape(other)),
                None => return Err(BridgeError::UnterminatedString),
            },
            Some(c) => out.push(c),
        }
    }
}
