//! Inline `[MAP:...]` directive recognition and decoding.
//!
//! The lexer turns one directive's parameter string into a token stream,
//! the scanner splits raw prose into text/map segments, and the decoder
//! walks the token stream to build a [`crate::MapConfig`].

pub mod decoder;
pub mod lexer;
pub mod scanner;

pub use decoder::decode;
pub use lexer::{lex, Section, Token, TokenKind};
pub use scanner::{scan, Segment};
