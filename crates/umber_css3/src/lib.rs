//! Front end of a CSS parser: a byte-to-code-point decoder fused with the
//! input preprocessor, and the tokenizer of
//! [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/).
//!
//! The three stages compose in a linear pipeline. The decoder turns a raw
//! byte buffer into code points (sniffing the byte order mark, substituting
//! U+FFFD on malformed UTF-8 and folding newlines), and the tokenizer turns
//! the preprocessed stream into the token sequence later parsing stages
//! consume. All parse errors the syntax specification marks as recoverable
//! are recovered; the only hard failures are an unsupported (UTF-16)
//! encoding and an unterminated block comment.

use umber_shared::byte_stream::{CodePointStream, Location};
use umber_shared::errors::Result;

pub mod tokenizer;
pub mod unicode;

pub use umber_shared::byte_stream;
pub use umber_shared::errors;

use crate::tokenizer::{Token, Tokenizer};

/// Tokenizes a raw byte buffer, optionally prefixed with a UTF-8 byte order
/// mark.
///
/// This is the primary entry point: it decodes and preprocesses the buffer,
/// then runs the tokenizer over the resulting code points.
pub fn tokenize(buffer: &[u8]) -> Result<Vec<Token>> {
    let stream = CodePointStream::from_bytes(buffer)?;
    let mut tokenizer = Tokenizer::new(&stream, Location::default());
    tokenizer.tokenize()
}

/// Tokenizes a string slice. Strings cannot carry a byte order mark or a
/// decode error, so only tokenizer-level failures remain possible.
pub fn tokenize_str(data: &str) -> Result<Vec<Token>> {
    let stream = CodePointStream::from(data);
    let mut tokenizer = Tokenizer::new(&stream, Location::default());
    tokenizer.tokenize()
}
