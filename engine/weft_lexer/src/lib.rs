//! Pattern tokenizer for the weft regex engine.
//!
//! Turns pattern text into a [`TokenList`](weft_ir::TokenList) in a single
//! left-to-right pass: metacharacters become single-kind tokens, bracketed
//! sets and counted repetitions are scanned to their closing delimiter,
//! escapes are classified (backreference, meta class, or forced literal),
//! and successive literal runes coalesce into one `Word` token.
//!
//! # Architecture
//!
//! - [`PatternBuffer`]: owns a sentinel-terminated copy of the pattern so
//!   the scanner never bounds-checks in the common case.
//! - [`Cursor`]: `Copy` byte cursor over the buffer with memchr-backed
//!   delimiter skips.
//! - [`Scanner`] / [`tokenize`]: the single-pass dispatch loop.
//!
//! # Usage
//!
//! ```
//! use weft_ir::TokenKind;
//! use weft_lexer::tokenize;
//!
//! let tokens = tokenize("a+b").unwrap();
//! assert_eq!(tokens.kind(0), Some(TokenKind::Word));
//! assert_eq!(tokens.kind(1), Some(TokenKind::Plus));
//! assert_eq!(tokens.kind(2), Some(TokenKind::Word));
//! ```

mod buffer;
mod cursor;
mod scanner;

pub use buffer::PatternBuffer;
pub use cursor::Cursor;
pub use scanner::{tokenize, Scanner};
