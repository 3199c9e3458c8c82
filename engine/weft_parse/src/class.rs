//! Character class expansion.
//!
//! Turns the body of a `[...]` class (leading `^` already stripped by the
//! tokenizer) into an explicit rune enumeration with per-rune width tags.

#![allow(
    clippy::cast_possible_truncation,
    reason = "class body offsets fit in u32 for any pattern the lexer accepts"
)]

use weft_ir::{ClassBody, ParseError};

/// Expand a class body into its member runes.
///
/// `base` is the byte offset of `body` inside the pattern; error positions
/// are reported relative to it.
///
/// Rules:
/// - `\` escapes the following rune, which joins the class literally.
/// - `a-b` appends the runes after `a` up to and including `b` (`a` itself
///   was appended by the preceding iteration). `a > b` is a
///   [`BadRange`](weft_ir::ErrorKind::BadRange) error at the `-`.
/// - A `-` that is first, last, or immediately after a completed range is
///   a literal dash.
pub fn expand_class(body: &str, base: u32) -> Result<ClassBody, ParseError> {
    let mut out = ClassBody::new();
    let mut chars = body.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        let rune = match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => escaped,
                // The tokenizer never ends a class body on a lone escape.
                None => break,
            },
            _ => c,
        };
        out.push(rune);

        let Some(&(dash_off, '-')) = chars.peek() else {
            continue;
        };
        // Look past the dash without committing: a trailing `-` is literal.
        let mut ahead = chars.clone();
        ahead.next(); // the '-'
        let Some((_, high_raw)) = ahead.next() else {
            continue;
        };
        let high = match high_raw {
            '\\' => match ahead.next() {
                Some((_, escaped)) => escaped,
                None => high_raw,
            },
            _ => high_raw,
        };
        if rune > high {
            return Err(ParseError::bad_range(base + dash_off as u32));
        }
        for point in (rune as u32 + 1)..=(high as u32) {
            // Skip the surrogate gap when a range crosses it.
            if let Some(member) = char::from_u32(point) {
                out.push(member);
            }
        }
        chars = ahead;
    }

    Ok(out)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
