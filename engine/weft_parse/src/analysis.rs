//! Structure analysis pre-pass.
//!
//! The grammar is non-linear in two places: a suffix operator binds to the
//! *preceding* atom (or to a whole group, whose opening `(` sits arbitrarily
//! far back), and an alternation fork must be emitted *before* its first
//! arm. This pass walks the token list once and produces the forward
//! knowledge the lowerer needs:
//!
//! - `suffix[i]`: the suffix operator binding the atom at token `i`, so the
//!   lowerer can emit the quantifier before the atom it wraps.
//! - `pipes[i]`: the alternation record at fork position `i` — where the
//!   second arm begins and which token closes the alternation.

#![allow(
    clippy::cast_possible_truncation,
    reason = "token indices fit in u32 for any pattern the lexer accepts"
)]

use smallvec::SmallVec;
use weft_ir::{ParseError, TokenKind, TokenList};

/// Default ceiling on simultaneously-open groups and alternations.
pub const DEFAULT_DEPTH_LIMIT: usize = 256;

/// Alternation record at a fork position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipeSlot {
    /// Token index where the second arm begins (the token after the `|`),
    /// or `None` when no fork sits at this position.
    pub mid: Option<u32>,
    /// Token index of the `)` closing the alternation, or `None` when it
    /// runs to the end of the pattern.
    pub end: Option<u32>,
}

/// Output of the structure pre-pass: two arrays parallel to the token list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    /// `suffix[i]` is the index of the suffix operator binding the atom at
    /// token `i`. For a group, the binding is recorded at the opening `(`.
    pub suffix: Vec<Option<u32>>,
    /// `pipes[i]` is the alternation record whose fork instruction belongs
    /// at token `i` (one past the enclosing `(`, or the start of the
    /// pattern / of the previous arm).
    pub pipes: Vec<PipeSlot>,
}

/// A pending alternation awaiting its closing token.
struct PipeFrame {
    /// Fork position the record was stored at.
    fork: u32,
    /// Token index where this frame's second arm begins.
    mid: u32,
    /// Group depth the `|` appeared at.
    depth: usize,
}

/// Analyze the token list, producing the suffix and pipe maps.
///
/// Both bookkeeping stacks are bounded by `depth_limit`; deeper nesting is
/// a [`DepthExceeded`](weft_ir::ErrorKind::DepthExceeded) error.
///
/// A suffix operator with no preceding atom is a syntax error, with one
/// deliberate exception: a stray `?` is silently ignored. That is what
/// keeps `(?...)` prefixed groups parseable once the lowerer has consumed
/// the prefix, and it also means `?abc` parses as `abc`.
pub fn analyze(tokens: &TokenList, depth_limit: usize) -> Result<Analysis, ParseError> {
    let n = tokens.len();
    let mut suffix: Vec<Option<u32>> = vec![None; n];
    let mut pipes: Vec<PipeSlot> = vec![PipeSlot::default(); n];

    let mut groups: SmallVec<[u32; 16]> = SmallVec::new();
    let mut pending: SmallVec<[PipeFrame; 16]> = SmallVec::new();
    let mut prev: Option<u32> = None;

    for (i, token) in tokens.iter().enumerate() {
        let idx = i as u32;
        match token.kind {
            TokenKind::LParen => {
                if groups.len() >= depth_limit {
                    return Err(ParseError::depth_exceeded(token.span.start));
                }
                groups.push(idx);
                prev = None;
            }
            TokenKind::RParen => {
                let Some(open) = groups.pop() else {
                    return Err(ParseError::unbalanced(token.span.start));
                };
                // Close every alternation opened inside this group; a
                // chained `a|b|c` leaves one frame per `|`.
                while pending.last().is_some_and(|p| p.depth > groups.len()) {
                    if let Some(frame) = pending.pop() {
                        pipes[frame.fork as usize].end = Some(idx);
                    }
                }
                // A following suffix binds the whole group.
                prev = Some(open);
            }
            kind if kind.is_suffix() => match prev {
                Some(atom) => {
                    suffix[atom as usize] = Some(idx);
                    prev = None;
                }
                // Stray `?` is ignored; see the function docs.
                None if kind == TokenKind::Question => {}
                None => return Err(ParseError::syntax(token.span.start)),
            },
            TokenKind::Pipe => {
                if i + 1 == n {
                    return Err(ParseError::syntax(token.span.start));
                }
                if pending.len() >= depth_limit {
                    return Err(ParseError::depth_exceeded(token.span.start));
                }
                // The fork for a chained `|` at the same depth sits where
                // the previous arm began, nesting the alternation to the
                // right. Otherwise it sits one past the enclosing `(`, or
                // at the start of the pattern.
                let fork = match pending.last() {
                    Some(top) if top.depth == groups.len() => top.mid,
                    _ => groups.last().map_or(0, |open| open + 1),
                };
                pipes[fork as usize] = PipeSlot {
                    mid: Some(idx + 1),
                    end: None,
                };
                pending.push(PipeFrame {
                    fork,
                    mid: idx + 1,
                    depth: groups.len(),
                });
                prev = None;
            }
            _ => prev = Some(idx),
        }
    }

    Ok(Analysis { suffix, pipes })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
