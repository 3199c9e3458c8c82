//! The lowerer: tokens + structure analysis to instruction stream.
//!
//! A single pass over the token list emits the flat stream. Composites are
//! emitted open (their end index zeroed) and patched when their closing
//! token arrives; the group and alternation stacks hold what is awaiting
//! closure. A counter of open lookbehinds gates the fixed-width checks.
//!
//! Per-token order: record nesting depth, patch pending alternations whose
//! mid/end position is this token, emit a pending fork, then emit the
//! quantifier (before the atom it wraps) and the atom itself. Counted
//! repetitions defer their width check until the body is complete.

#![allow(
    clippy::cast_possible_truncation,
    reason = "instruction and token indices fit in u32 for any pattern the lexer accepts"
)]

use smallvec::SmallVec;
use tracing::trace;
use weft_ir::{
    Flags, Inst, Op, ParseError, Payload, Program, Token, TokenKind, TokenList, VARIABLE,
};

use crate::analysis::Analysis;
use crate::class::expand_class;
use crate::width::{next_sibling, node_width, repeat_width, seq_width};

/// An emitted composite awaiting its closing `)`.
struct GroupFrame {
    /// Stream index of the composite instruction.
    inst: u32,
    /// Byte position of the group body start, for diagnostics.
    body_pos: u32,
    /// Whether this frame is a lookbehind (gates the fixed-width check).
    lookbehind: bool,
    /// Quantifier wrapping this group, finished when the group closes.
    quant: Option<PendingQuant>,
}

/// A quantifier emitted ahead of its body.
#[derive(Clone, Copy)]
struct PendingQuant {
    /// Stream index of the quantifier instruction.
    inst: u32,
    /// Byte position of the quantified atom, for diagnostics.
    atom_pos: u32,
}

/// An emitted alternation fork awaiting its mid/end patches.
struct OrFrame {
    /// Stream index of the fork instruction.
    inst: u32,
    /// Token index where the second arm begins.
    mid_tok: u32,
    /// Token index closing the alternation; `None` runs to end of pattern.
    end_tok: Option<u32>,
    /// Byte position of the fork, for diagnostics.
    fork_pos: u32,
}

/// Single-pass lowerer.
pub(crate) struct Lowerer<'a> {
    pattern: &'a str,
    tokens: &'a TokenList,
    analysis: &'a Analysis,
    depth_limit: usize,
    insts: Vec<Inst>,
    groups: u32,
    max_depth: u32,
    flags: Flags,
    /// Number of currently-open lookbehinds.
    lbh: u32,
    group_stack: SmallVec<[GroupFrame; 16]>,
    pipe_stack: SmallVec<[OrFrame; 16]>,
    /// Prefix bytes to drop from an upcoming `Word` token, set when a
    /// `(?...` prefix has consumed the word's leading runes.
    strip: Option<(usize, u32)>,
    /// Skip tokens up to and including this index (inline flag groups).
    skip_until: Option<usize>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(
        pattern: &'a str,
        tokens: &'a TokenList,
        analysis: &'a Analysis,
        flags: Flags,
        depth_limit: usize,
    ) -> Self {
        Lowerer {
            pattern,
            tokens,
            analysis,
            depth_limit,
            // Worst case: one instruction per token, plus one extra when a
            // quantified literal run splits, plus the terminator.
            insts: Vec::with_capacity(tokens.len() + 2),
            groups: 0,
            max_depth: 0,
            flags,
            lbh: 0,
            group_stack: SmallVec::new(),
            pipe_stack: SmallVec::new(),
            strip: None,
            skip_until: None,
        }
    }

    /// Lower the whole token list into a [`Program`].
    pub(crate) fn run(mut self) -> Result<Program, ParseError> {
        let n = self.tokens.len();
        let mut i = 0usize;
        while i < n {
            if self.skip_until.is_some_and(|until| i <= until) {
                i += 1;
                continue;
            }
            let Some(&token) = self.tokens.get(i) else {
                return Err(ParseError::internal(0));
            };
            let mut token = token;
            if let Some((target, bytes)) = self.strip {
                if target == i {
                    token.span.start += bytes;
                    self.strip = None;
                    if token.span.is_empty() {
                        i += 1;
                        continue;
                    }
                }
            }
            trace!(kind = ?token.kind, index = i, "lowering token");

            self.max_depth = self.max_depth.max(self.group_stack.len() as u32);
            self.patch_pipes(i as u32)?;
            self.emit_fork(i, &token)?;
            self.dispatch(i, &token)?;
            i += 1;
        }
        self.finish()
    }

    // --- Per-token steps ---

    /// Patch pending alternations whose second arm or end lies at `tok`.
    fn patch_pipes(&mut self, tok: u32) -> Result<(), ParseError> {
        loop {
            let Some(top) = self.pipe_stack.last() else {
                return Ok(());
            };
            let (inst, mid_tok, end_tok, fork_pos) =
                (top.inst as usize, top.mid_tok, top.end_tok, top.fork_pos);
            let next = self.insts.len() as u32;
            if mid_tok == tok {
                // The second arm starts at the next instruction emitted.
                self.insts[inst].val = next;
            }
            if end_tok == Some(tok) {
                self.insts[inst].val2 = next;
                self.seal_or(inst)?;
                if self.lbh > 0 && self.insts[inst].len == VARIABLE {
                    return Err(ParseError::variable_lookbehind(fork_pos));
                }
                self.pipe_stack.pop();
                // A chained alternation closes several frames at one token.
                continue;
            }
            return Ok(());
        }
    }

    /// Emit the fork instruction recorded at token `i`, if any.
    fn emit_fork(&mut self, i: usize, token: &Token) -> Result<(), ParseError> {
        let Some(mid) = self.analysis.pipes[i].mid else {
            return Ok(());
        };
        if self.pipe_stack.len() >= self.depth_limit {
            return Err(ParseError::depth_exceeded(token.span.start));
        }
        let inst = self.emit(Inst::new(Op::Or));
        self.pipe_stack.push(OrFrame {
            inst,
            mid_tok: mid,
            end_tok: self.analysis.pipes[i].end,
            fork_pos: token.span.start,
        });
        Ok(())
    }

    /// Emit the atom at token `i`, preceded by its quantifier if one binds.
    fn dispatch(&mut self, i: usize, token: &Token) -> Result<(), ParseError> {
        let suffix = self.analysis.suffix[i];
        match token.kind {
            TokenKind::Word => self.word(token, suffix),
            TokenKind::Caret => self.simple_atom(token, suffix, anchor(Op::Begin)),
            TokenKind::Dollar => self.simple_atom(token, suffix, anchor(Op::End)),
            TokenKind::Dot => {
                let mut inst = Inst::new(Op::Dot);
                inst.len = 1;
                self.simple_atom(token, suffix, inst)
            }
            TokenKind::Set => {
                let negated = self.pattern.as_bytes()[token.span.start as usize - 1] == b'^';
                let body = expand_class(token.span.text(self.pattern), token.span.start)?;
                let mut inst = Inst::new(if negated { Op::NegSet } else { Op::Set });
                inst.len = 1;
                inst.payload = Payload::Class(body);
                self.simple_atom(token, suffix, inst)
            }
            TokenKind::MetaClass => {
                let letter = self.pattern.as_bytes()[token.span.start as usize + 1];
                let mut inst = Inst::new(Op::MetaClass);
                inst.val = u32::from(letter.to_ascii_lowercase());
                inst.val2 = u32::from(letter.is_ascii_uppercase());
                self.simple_atom(token, suffix, inst)
            }
            TokenKind::Backref => {
                let digit = self.pattern.as_bytes()[token.span.start as usize + 1] - b'0';
                if digit == 0 {
                    return Err(ParseError::syntax(token.span.start));
                }
                let mut inst = Inst::new(Op::Backref);
                inst.val = u32::from(digit) - 1;
                self.simple_atom(token, suffix, inst)
            }
            TokenKind::LParen => self.open_group(i, token, suffix),
            TokenKind::RParen => self.close_group(token),
            // Forks were emitted above; suffix operators are consumed
            // through the suffix map.
            TokenKind::Pipe
            | TokenKind::Question
            | TokenKind::Star
            | TokenKind::Plus
            | TokenKind::Repeat => Ok(()),
        }
    }

    /// Emit a single-instruction atom with its optional quantifier.
    fn simple_atom(
        &mut self,
        token: &Token,
        suffix: Option<u32>,
        inst: Inst,
    ) -> Result<(), ParseError> {
        let pending = self.emit_quant(token.span.start, suffix)?;
        self.emit(inst);
        self.finish_quant(pending)
    }

    /// Emit a literal run. A quantifier binds only the final rune, so a
    /// quantified multi-rune literal splits in two.
    fn word(&mut self, token: &Token, suffix: Option<u32>) -> Result<(), ParseError> {
        let cooked = cook_literal(token.span.text(self.pattern));
        let split = match suffix {
            Some(_) => cooked
                .char_indices()
                .last()
                .filter(|&(boundary, _)| boundary > 0)
                .map(|(boundary, _)| boundary),
            None => None,
        };
        match split {
            Some(boundary) => {
                self.emit_word(&cooked[..boundary]);
                // Diagnostics point at the final rune in the raw pattern.
                let raw = token.span.text(self.pattern);
                let quant_pos = raw
                    .char_indices()
                    .last()
                    .map_or(token.span.start, |(offset, _)| {
                        token.span.start + offset as u32
                    });
                let pending = self.emit_quant(quant_pos, suffix)?;
                self.emit_word(&cooked[boundary..]);
                self.finish_quant(pending)
            }
            None => {
                let pending = self.emit_quant(token.span.start, suffix)?;
                self.emit_word(&cooked);
                self.finish_quant(pending)
            }
        }
    }

    /// Open a group, recognizing a `(?...)` prefix.
    fn open_group(
        &mut self,
        i: usize,
        token: &Token,
        suffix: Option<u32>,
    ) -> Result<(), ParseError> {
        let pending = self.emit_quant(token.span.start, suffix)?;
        if self.group_stack.len() >= self.depth_limit {
            return Err(ParseError::depth_exceeded(token.span.start));
        }

        let prefixed = self.tokens.kind(i + 1) == Some(TokenKind::Question)
            && self.tokens.kind(i + 2) == Some(TokenKind::Word);
        if !prefixed {
            // Plain capturing group. A `(?` with nothing recognizable after
            // it also lands here: the stray `?` is simply ignored.
            let mut inst = Inst::new(Op::CapGroup);
            inst.val2 = self.groups;
            self.groups += 1;
            let idx = self.emit(inst);
            self.group_stack.push(GroupFrame {
                inst: idx,
                body_pos: token.span.end,
                lookbehind: false,
                quant: pending,
            });
            return Ok(());
        }

        let Some(&word) = self.tokens.get(i + 2) else {
            return Err(ParseError::internal(token.span.start));
        };
        let text = word.span.text(self.pattern);
        let mut runes = text.chars();
        let (op, consumed) = match runes.next() {
            Some(':') => (Op::Group, 1),
            Some('=') => (Op::Ahead, 1),
            Some('!') => (Op::NegAhead, 1),
            Some('<') => match runes.next() {
                Some('=') => (Op::Behind, 2),
                Some('!') => (Op::NegBehind, 2),
                _ => return Err(ParseError::syntax(word.span.start + 1)),
            },
            Some('s' | 'i') => return self.flag_group(i, &word, pending),
            _ => return Err(ParseError::syntax(word.span.start)),
        };

        let idx = self.emit(Inst::new(op));
        if op.is_lookbehind() {
            self.lbh += 1;
        }
        self.strip = Some((i + 2, consumed));
        self.group_stack.push(GroupFrame {
            inst: idx,
            body_pos: word.span.start + consumed,
            lookbehind: op.is_lookbehind(),
            quant: pending,
        });
        Ok(())
    }

    /// Handle an inline flag group `(?letters)`: mutate the parse-global
    /// flags, emit nothing, and skip past the closing `)`.
    fn flag_group(
        &mut self,
        i: usize,
        word: &Token,
        pending: Option<PendingQuant>,
    ) -> Result<(), ParseError> {
        if pending.is_some() {
            // A quantifier cannot bind a group that emits no instruction.
            return Err(ParseError::syntax(word.span.start));
        }
        let text = word.span.text(self.pattern);
        for (offset, letter) in text.char_indices() {
            match letter {
                's' => self.flags |= Flags::DOTALL,
                'i' => self.flags |= Flags::ICASE,
                _ => return Err(ParseError::syntax(word.span.start + offset as u32)),
            }
        }
        if self.tokens.kind(i + 3) != Some(TokenKind::RParen) {
            return Err(ParseError::syntax(word.span.end));
        }
        self.skip_until = Some(i + 3);
        Ok(())
    }

    /// Close the innermost group: patch its end index, cache its width,
    /// and enforce the lookbehind fixed-width requirement.
    fn close_group(&mut self, token: &Token) -> Result<(), ParseError> {
        let Some(frame) = self.group_stack.pop() else {
            return Err(ParseError::unbalanced(token.span.start));
        };
        let inst = frame.inst as usize;
        let next = self.insts.len() as u32;
        self.insts[inst].val = next;

        let body = seq_width(&self.insts, inst + 1, next as usize);
        if frame.lookbehind {
            self.lbh -= 1;
        }
        let op = self.insts[inst].op;
        let len = if op.is_lookaround() { 0 } else { body };
        self.insts[inst].len = len;
        self.stamp_children(frame.inst, next);

        if (frame.lookbehind && body == VARIABLE) || (self.lbh > 0 && len == VARIABLE) {
            return Err(ParseError::variable_lookbehind(frame.body_pos));
        }
        self.finish_quant(frame.quant)
    }

    /// Emit the terminator and resolve anything still open.
    fn finish(mut self) -> Result<Program, ParseError> {
        if !self.group_stack.is_empty() {
            return Err(ParseError::unbalanced(self.pattern.len() as u32));
        }
        let null_idx = self.insts.len() as u32;
        let mut null = Inst::new(Op::Null);
        null.len = 0;
        self.emit(null);

        // Alternations that ran to the end of the pattern close at the
        // terminator. Groups are balanced here, so no lookbehind is open.
        while let Some(frame) = self.pipe_stack.pop() {
            let inst = frame.inst as usize;
            self.insts[inst].val2 = null_idx;
            self.seal_or(inst)?;
        }

        Ok(Program {
            insts: self.insts,
            groups: self.groups,
            max_depth: self.max_depth,
            flags: self.flags,
        })
    }

    // --- Quantifiers ---

    /// Emit the quantifier bound to the atom at `atom_pos`, ahead of the
    /// atom itself. Uncounted quantifiers are variable-width by
    /// definition, so under an open lookbehind they fail immediately.
    fn emit_quant(
        &mut self,
        atom_pos: u32,
        suffix: Option<u32>,
    ) -> Result<Option<PendingQuant>, ParseError> {
        let Some(sfx) = suffix else {
            return Ok(None);
        };
        let Some(&sfx_token) = self.tokens.get(sfx as usize) else {
            return Err(ParseError::internal(atom_pos));
        };
        let lazy = self.tokens.kind(sfx as usize + 1) == Some(TokenKind::Question);
        let mut inst = match sfx_token.kind {
            TokenKind::Star => Inst::new(if lazy { Op::LazyStar } else { Op::Star }),
            TokenKind::Plus => Inst::new(if lazy { Op::LazyPlus } else { Op::Plus }),
            // `?` has no lazy form; `??` stays greedy-optional.
            TokenKind::Question => Inst::new(Op::Opt),
            TokenKind::Repeat => {
                let (min, max) = parse_counts(self.pattern, &sfx_token)?;
                let mut inst = Inst::new(Op::Repeat);
                inst.val = min;
                inst.val2 = max;
                inst
            }
            _ => return Err(ParseError::internal(sfx_token.span.start)),
        };
        inst.len = VARIABLE;
        let op = inst.op;
        let idx = self.emit(inst);
        if op != Op::Repeat && self.lbh > 0 {
            return Err(ParseError::variable_lookbehind(atom_pos));
        }
        Ok(Some(PendingQuant {
            inst: idx,
            atom_pos,
        }))
    }

    /// Finish a quantifier whose body is now fully emitted: cache the
    /// counted repetition's width, stamp the body's owner, and run the
    /// deferred lookbehind check the counted form needs.
    fn finish_quant(&mut self, pending: Option<PendingQuant>) -> Result<(), ParseError> {
        let Some(pending) = pending else {
            return Ok(());
        };
        let inst = pending.inst as usize;
        if self.insts[inst].op == Op::Repeat {
            let (body, _) = node_width(&self.insts, inst + 1);
            self.insts[inst].len = repeat_width(body, self.insts[inst].val, self.insts[inst].val2);
        }
        if inst + 1 < self.insts.len() {
            self.insts[inst + 1].owner = Some(pending.inst);
        }
        if self.lbh > 0 && self.insts[inst].len == VARIABLE {
            return Err(ParseError::variable_lookbehind(pending.atom_pos));
        }
        Ok(())
    }

    // --- Emission helpers ---

    /// Append an instruction, returning its stream index.
    fn emit(&mut self, inst: Inst) -> u32 {
        self.insts.push(inst);
        (self.insts.len() - 1) as u32
    }

    /// Emit a literal run instruction owning its cooked bytes.
    fn emit_word(&mut self, literal: &str) {
        let mut inst = Inst::new(Op::Word);
        inst.len = literal.len() as i32;
        inst.payload = Payload::Literal(literal.as_bytes().to_vec().into_boxed_slice());
        self.emit(inst);
    }

    /// Cache an alternation's width once both arms are delimited.
    fn seal_or(&mut self, inst: usize) -> Result<(), ParseError> {
        let mid = self.insts[inst].val as usize;
        let end = self.insts[inst].val2 as usize;
        if mid <= inst || end < mid {
            return Err(ParseError::internal(0));
        }
        let first = seq_width(&self.insts, inst + 1, mid);
        let second = seq_width(&self.insts, mid, end);
        self.insts[inst].len = if first == second { first } else { VARIABLE };
        Ok(())
    }

    /// Record `parent` as the owner of each of its direct children.
    fn stamp_children(&mut self, parent: u32, end: u32) {
        let mut idx = parent as usize + 1;
        while idx < end as usize {
            let next = next_sibling(&self.insts, idx);
            self.insts[idx].owner = Some(parent);
            if next <= idx {
                break;
            }
            idx = next;
        }
    }
}

/// Anchors are zero-width.
fn anchor(op: Op) -> Inst {
    let mut inst = Inst::new(op);
    inst.len = 0;
    inst
}

/// Copy a literal run out of the pattern, dropping each escape backslash.
fn cook_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse the counts of a `{m}` / `{m,n}` / `{m,}` token.
fn parse_counts(pattern: &str, token: &Token) -> Result<(u32, u32), ParseError> {
    let open = token.span.start;
    let text = token.span.text(pattern);
    // The tokenizer guarantees the braces are present.
    let inner = &text[1..text.len() - 1];
    match inner.split_once(',') {
        None => {
            let exact = parse_count(inner, open)?;
            Ok((exact, exact))
        }
        Some((low, high)) => {
            let min = parse_count(low, open)?;
            if high.is_empty() {
                // Open upper bound.
                return Ok((min, u32::MAX));
            }
            let max = parse_count(high, open)?;
            if max < min {
                return Err(ParseError::syntax(open));
            }
            Ok((min, max))
        }
    }
}

fn parse_count(digits: &str, open: u32) -> Result<u32, ParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::syntax(open));
    }
    digits.parse().map_err(|_| ParseError::syntax(open))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
