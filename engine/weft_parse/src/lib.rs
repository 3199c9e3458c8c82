//! Parser and IR lowerer for the weft regex engine.
//!
//! Turns a textual pattern into the flat instruction stream the JIT
//! backend consumes, in three stages over the token list produced by
//! `weft_lexer`:
//!
//! 1. [`analyze`]: one pass building the suffix and alternation maps — the
//!    forward knowledge that lets the lowerer emit quantifiers before the
//!    atoms they wrap and forks before their first arm.
//! 2. Lowering: one pass emitting instructions, patching composite end
//!    indices at every `)`, interpreting `(?...)` prefixes, and expanding
//!    character classes ([`expand_class`]).
//! 3. Width analysis, woven into lowering: every closed composite and
//!    every counted repetition caches its fixed match width, and every
//!    lookbehind body is required to have one.
//!
//! # Usage
//!
//! ```
//! use weft_ir::{Flags, Op};
//! use weft_parse::parse;
//!
//! let program = parse("(ab)+c", Flags::empty()).unwrap();
//! assert_eq!(program.groups, 1);
//! assert_eq!(program.insts[0].op, Op::Plus);
//! ```
//!
//! The stack ceiling is configurable through [`Parser`] for callers that
//! need to accept deeper nesting than the default 256 frames.

mod analysis;
mod class;
mod lower;
mod width;

pub use analysis::{analyze, Analysis, PipeSlot, DEFAULT_DEPTH_LIMIT};
pub use class::expand_class;

use tracing::debug;
use weft_ir::{Flags, ParseError, Program};
use weft_lexer::tokenize;

/// Configurable front-end entry point.
///
/// Holds the two knobs the front end has: the initial [`Flags`] and the
/// ceiling on group/alternation nesting.
#[derive(Clone, Copy, Debug)]
pub struct Parser {
    flags: Flags,
    depth_limit: usize,
}

impl Parser {
    /// Create a parser with empty flags and the default depth ceiling.
    pub fn new() -> Self {
        Parser {
            flags: Flags::empty(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Set the initial flags (inline `(?...)` groups may add more).
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the ceiling on simultaneously-open groups and alternations.
    #[must_use]
    pub fn depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Parse a pattern into a [`Program`].
    pub fn parse(&self, pattern: &str) -> Result<Program, ParseError> {
        debug!(pattern_len = pattern.len(), "parsing pattern");
        let tokens = tokenize(pattern)?;
        let analysis = analysis::analyze(&tokens, self.depth_limit)?;
        let program =
            lower::Lowerer::new(pattern, &tokens, &analysis, self.flags, self.depth_limit).run()?;
        debug!(
            insts = program.len(),
            groups = program.groups,
            max_depth = program.max_depth,
            "lowered pattern"
        );
        Ok(program)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

/// Parse a pattern with the given flags and the default depth ceiling.
pub fn parse(pattern: &str, flags: Flags) -> Result<Program, ParseError> {
    Parser::new().flags(flags).parse(pattern)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
