// src/core/protocol/mod.rs

pub mod frame;
pub mod scanner;
pub mod token;

pub use frame::{BridgeCodec, ReplyFrame, RequestFrame};
pub use scanner::TokenScanner;
pub use token::{Token, tokenize};
