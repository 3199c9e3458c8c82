//! Fixed-width analysis over the instruction stream.
//!
//! The stream is logically a tree; these walkers follow each composite's
//! stored end index rather than recursing over a parallel structure. A
//! width of [`VARIABLE`] means the construct does not match the same
//! number of bytes on every success.
//!
//! | Instruction | Width |
//! |---|---|
//! | `Word` | byte length of the literal |
//! | `Set`, `NegSet`, `Dot` | 1 |
//! | `MetaClass`, `Backref`, uncounted quantifiers | variable |
//! | `Repeat` | body width × m when `m == n`, else variable |
//! | anchors, lookarounds | 0 |
//! | groups | sum of children, variable if any child is |
//! | `Or` | arm width when both arms agree, else variable |

use weft_ir::{Inst, Op, VARIABLE};

/// Width of the single node at `idx`, plus the index of its next sibling.
///
/// Composite nodes must already have their end indices patched; the
/// lowerer guarantees this by closing children before parents.
pub(crate) fn node_width(insts: &[Inst], idx: usize) -> (i32, usize) {
    let Some(inst) = insts.get(idx) else {
        return (0, idx + 1);
    };
    match inst.op {
        Op::Word => (inst.len, idx + 1),
        Op::Set | Op::NegSet | Op::Dot => (1, idx + 1),
        Op::MetaClass | Op::Backref => (VARIABLE, idx + 1),
        Op::Opt | Op::Star | Op::Plus | Op::LazyStar | Op::LazyPlus => {
            let (_, next) = node_width(insts, idx + 1);
            (VARIABLE, next)
        }
        Op::Repeat => {
            let (body, next) = node_width(insts, idx + 1);
            (repeat_width(body, inst.val, inst.val2), next)
        }
        Op::Begin | Op::End => (0, idx + 1),
        Op::Ahead | Op::NegAhead | Op::Behind | Op::NegBehind => (0, inst.val as usize),
        Op::Group | Op::CapGroup => {
            let end = inst.val as usize;
            (seq_width(insts, idx + 1, end), end)
        }
        Op::Or => {
            let mid = inst.val as usize;
            let end = inst.val2 as usize;
            let first = seq_width(insts, idx + 1, mid);
            let second = seq_width(insts, mid, end);
            let width = if first == second { first } else { VARIABLE };
            (width, end)
        }
        Op::Null => (0, idx + 1),
    }
}

/// Sum of the node widths in `start..end`; [`VARIABLE`] if any node is.
pub(crate) fn seq_width(insts: &[Inst], start: usize, end: usize) -> i32 {
    let mut total: i64 = 0;
    let mut idx = start;
    while idx < end {
        let (width, next) = node_width(insts, idx);
        if width == VARIABLE {
            return VARIABLE;
        }
        total += i64::from(width);
        if next <= idx {
            // Malformed link; refuse to spin.
            return VARIABLE;
        }
        idx = next;
    }
    i32::try_from(total).unwrap_or(VARIABLE)
}

/// Index of the node following the one at `idx`, skipping its sub-range.
pub(crate) fn next_sibling(insts: &[Inst], idx: usize) -> usize {
    node_width(insts, idx).1
}

/// Width of a counted repetition given its body width and counts.
/// Fixed only when the counts agree and the body itself is fixed.
pub(crate) fn repeat_width(body: i32, min: u32, max: u32) -> i32 {
    if min != max || body == VARIABLE {
        return VARIABLE;
    }
    let total = i64::from(body) * i64::from(min);
    i32::try_from(total).unwrap_or(VARIABLE)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
