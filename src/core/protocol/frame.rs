// src/core/protocol/frame.rs

//! Implements the line-oriented request/reply framing and the corresponding
//! `Encoder` and `Decoder` for network communication.
//!
//! A request is one line such as `AutograderUnitTest.clearTestResults(true)`.
//! Every request produces exactly one reply line, either `result:<value>` or
//! `error:<message>`.

use super::token::{Token, tokenize};
use crate::core::BridgeError;
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The default upper bound for a single request line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// A request line split into its command name and argument tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFrame {
    pub name: String,
    pub args: Vec<Token>,
}

impl RequestFrame {
    /// Splits a request line. The first token must be a bare word naming the command;
    /// everything after it belongs to the command's own argument grammar.
    pub fn parse(line: &str) -> Result<Self, BridgeError> {
        let mut tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Err(BridgeError::MalformedRequest("empty request".to_string()));
        }
        match tokens.remove(0) {
            Token::Word(name) => Ok(Self { name, args: tokens }),
            other => Err(BridgeError::MalformedRequest(format!(
                "expected a command name but found '{other}'"
            ))),
        }
    }
}

/// A single reply line sent back to the front-end.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyFrame {
    /// The command completed and has nothing to report.
    Ok,
    /// The command completed and produced a value.
    Value(String),
    /// The command failed.
    Error(String),
}

impl From<&BridgeError> for ReplyFrame {
    fn from(e: &BridgeError) -> Self {
        ReplyFrame::Error(e.to_string())
    }
}

/// Escapes embedded line breaks so that a payload always fits on one line.
fn escape_line(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// A `tokio_util::codec` implementation that decodes request lines and encodes
/// `ReplyFrame`s.
///
/// `max_line_length` bounds the content of a line; the `\r\n` or `\n`
/// terminator is not counted.
#[derive(Debug, Clone)]
pub struct BridgeCodec {
    max_line_length: usize,
    /// How far into the buffer a newline has already been searched for.
    next_index: usize,
}

impl BridgeCodec {
    pub fn new(max_line_length: usize) -> Self {
        Self {
            max_line_length,
            next_index: 0,
        }
    }

    /// The length of a raw line without its terminator.
    fn content_len(raw: &[u8]) -> usize {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        raw.strip_suffix(b"\r").unwrap_or(raw).len()
    }

    fn check_length(&self, raw: &[u8]) -> Result<(), BridgeError> {
        if Self::content_len(raw) > self.max_line_length {
            return Err(BridgeError::LineTooLong(self.max_line_length));
        }
        Ok(())
    }

    /// Removes the line terminator and converts the raw bytes, replacing
    /// invalid UTF-8 sequences.
    fn finish_line(raw: &[u8]) -> String {
        let mut line = raw;
        if let Some(stripped) = line.strip_suffix(b"\n") {
            line = stripped;
        }
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        String::from_utf8_lossy(line).into_owned()
    }
}

impl Default for BridgeCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl Decoder for BridgeCodec {
    type Item = String;
    type Error = BridgeError;

    /// Decodes the next non-blank line from the buffer. Blank lines are consumed
    /// and skipped.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let start = self.next_index.min(src.len());
            let Some(offset) = src[start..].iter().position(|b| *b == b'\n') else {
                self.next_index = src.len();
                // One extra byte may still be the '\r' of a pending "\r\n".
                if src.len() > self.max_line_length + 1 {
                    return Err(BridgeError::LineTooLong(self.max_line_length));
                }
                return Ok(None);
            };

            let newline = start + offset;
            self.next_index = 0;
            let raw = src.split_to(newline + 1);
            self.check_length(&raw)?;

            let line = Self::finish_line(&raw);
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some(line));
        }
    }

    /// Treats unterminated input at end of stream as a final line.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }
        self.next_index = 0;
        self.check_length(&src[..])?;
        let line = Self::finish_line(&src[..]);
        src.advance(src.len());
        if line.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

impl Encoder<ReplyFrame> for BridgeCodec {
    type Error = BridgeError;

    fn encode(&mut self, item: ReplyFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = match item {
            ReplyFrame::Ok => "result:ok".to_string(),
            ReplyFrame::Value(v) => format!("result:{}", escape_line(&v)),
            ReplyFrame::Error(e) => format!("error:{}", escape_line(&e)),
        };
        dst.reserve(line.len() + 1);
        dst.put_slice(line.as_bytes());
        dst.put_u8(b'\n');
        Ok(())
    }
}
