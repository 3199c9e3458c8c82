//! Shared data model for the weft regex engine front end.
//!
//! This crate defines the types that flow between the pipeline stages:
//!
//! - [`Span`]: compact byte-offset location into the pattern text.
//! - [`Token`] / [`TokenKind`] / [`TokenList`]: output of the tokenizer
//!   (`weft_lexer`), input to the structure analyzer and lowerer
//!   (`weft_parse`).
//! - [`Inst`] / [`Op`] / [`Program`]: the flat instruction stream the
//!   lowerer emits and the JIT backend consumes.
//! - [`Flags`]: match-time configuration (`ICASE`, `DOTALL`), settable by
//!   the caller and by inline `(?i)` / `(?s)` groups.
//! - [`ParseError`] / [`ErrorKind`]: the single error currency of the
//!   front end. Parsing reports the first error and stops.
//!
//! # Stability
//!
//! The instruction stream layout is a contract with the backend: a flat
//! `Vec<Inst>` ending in a single [`Op::Null`], with all inter-instruction
//! links expressed as stream indices (never pointers, so the stream can be
//! relocated freely).

mod error;
mod flags;
mod inst;
mod span;
mod token;

pub use error::{ErrorKind, ParseError};
pub use flags::Flags;
pub use inst::{ClassBody, Inst, Op, Payload, Program, VARIABLE};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
