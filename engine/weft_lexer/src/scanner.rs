//! Single-pass pattern scanner.
//!
//! Dispatches on the current byte; each arm consumes one token's worth of
//! input and appends to the token list. Errors carry the byte offset of the
//! opening delimiter that failed to close.

use weft_ir::{ParseError, Span, Token, TokenKind, TokenList};

use crate::{Cursor, PatternBuffer};

/// Tokenize a pattern.
///
/// Produces tokens in pattern order with literal runs coalesced: no two
/// adjacent tokens are both [`TokenKind::Word`].
pub fn tokenize(pattern: &str) -> Result<TokenList, ParseError> {
    let buffer = PatternBuffer::new(pattern);
    Scanner::new(buffer.cursor()).run()
}

/// Single-pass scanner over a pattern cursor.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    tokens: TokenList,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner from a cursor.
    pub fn new(cursor: Cursor<'a>) -> Self {
        // Worst case one token per pattern byte.
        let capacity = cursor.pattern_len() as usize;
        Self {
            cursor,
            tokens: TokenList::with_capacity(capacity),
        }
    }

    /// Scan the whole pattern, returning the token list or the first error.
    pub fn run(mut self) -> Result<TokenList, ParseError> {
        loop {
            let start = self.cursor.pos();
            match self.cursor.current() {
                0 if self.cursor.is_eop() => break,
                b'+' => self.single(TokenKind::Plus),
                b'*' => self.single(TokenKind::Star),
                b'?' => self.single(TokenKind::Question),
                b'^' => self.single(TokenKind::Caret),
                b'$' => self.single(TokenKind::Dollar),
                b'.' => self.single(TokenKind::Dot),
                b'|' => self.single(TokenKind::Pipe),
                b'(' => self.single(TokenKind::LParen),
                b')' => self.single(TokenKind::RParen),
                b'[' => self.set(start)?,
                b'{' => self.repeat(start)?,
                b'\\' => self.escape(start),
                _ => self.word(start),
            }
        }
        Ok(self.tokens)
    }

    /// Emit a single-byte token of the given kind.
    fn single(&mut self, kind: TokenKind) {
        let start = self.cursor.pos();
        self.cursor.advance();
        self.tokens
            .push(Token::new(kind, Span::new(start, start + 1)));
    }

    /// Scan a `[...]` class.
    ///
    /// The emitted span covers only the body, starting past the `[` and
    /// past an optional leading `^`; the parser recovers negation from the
    /// byte before the span. Escaped `]` bytes do not close the class.
    fn set(&mut self, open: u32) -> Result<(), ParseError> {
        self.cursor.advance(); // consume '['
        if self.cursor.current() == b'^' {
            self.cursor.advance();
        }
        let body_start = self.cursor.pos();
        loop {
            match self.cursor.skip_to_class_delim() {
                0 => return Err(ParseError::unbalanced(open)),
                b'\\' => {
                    // Step over the escape and the rune it escapes.
                    self.cursor.advance();
                    self.cursor.advance_rune();
                }
                _ => break, // ']'
            }
        }
        let body_end = self.cursor.pos();
        self.cursor.advance(); // consume ']'
        self.tokens
            .push(Token::new(TokenKind::Set, Span::new(body_start, body_end)));
        Ok(())
    }

    /// Scan a `{...}` counted repetition. The span includes the braces;
    /// the lowerer parses the counts.
    fn repeat(&mut self, open: u32) -> Result<(), ParseError> {
        self.cursor.advance(); // consume '{'
        if self.cursor.skip_to_repeat_close() == 0 {
            return Err(ParseError::unbalanced(open));
        }
        let close = self.cursor.pos();
        self.cursor.advance(); // consume '}'
        self.tokens
            .push(Token::new(TokenKind::Repeat, Span::new(open, close + 1)));
        Ok(())
    }

    /// Classify a `\` escape: backreference, meta class, or forced
    /// literal. A lone trailing backslash is dropped.
    fn escape(&mut self, start: u32) {
        match self.cursor.peek() {
            b'0'..=b'9' => {
                self.cursor.advance_n(2);
                self.tokens
                    .push(Token::new(TokenKind::Backref, Span::new(start, start + 2)));
            }
            b's' | b'S' | b'w' | b'W' | b'd' | b'D' => {
                self.cursor.advance_n(2);
                self.tokens.push(Token::new(
                    TokenKind::MetaClass,
                    Span::new(start, start + 2),
                ));
            }
            0 if start + 1 >= self.cursor.pattern_len() => {
                // Trailing backslash with nothing to escape.
                self.cursor.advance();
            }
            escaped => {
                // The next rune is forced literal. The word span keeps the
                // backslash; the lowerer cooks it out.
                let width = Cursor::rune_width(escaped);
                self.cursor.advance_n(1 + width);
                self.push_word(Span::new(start, start + 1 + width));
            }
        }
    }

    /// Scan one literal rune.
    fn word(&mut self, start: u32) {
        self.cursor.advance_rune();
        self.push_word(Span::new(start, self.cursor.pos()));
    }

    /// Append literal content, extending the previous token when it is
    /// also a `Word` so runs coalesce into one token.
    fn push_word(&mut self, span: Span) {
        if let Some(last) = self.tokens.last_mut() {
            if last.kind == TokenKind::Word {
                last.span.end = span.end;
                return;
            }
        }
        self.tokens.push(Token::new(TokenKind::Word, span));
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
