use pretty_assertions::assert_eq;

use weft_ir::{Inst, Op, Payload, VARIABLE};

use super::{next_sibling, node_width, repeat_width, seq_width};

fn word(literal: &[u8]) -> Inst {
    let mut inst = Inst::new(Op::Word);
    inst.len = i32::try_from(literal.len()).unwrap();
    inst.payload = Payload::Literal(literal.to_vec().into_boxed_slice());
    inst
}

fn with_val(op: Op, val: u32) -> Inst {
    let mut inst = Inst::new(op);
    inst.val = val;
    inst
}

// === Leaves ===

#[test]
fn word_width_is_literal_length() {
    let insts = vec![word(b"abc")];
    assert_eq!(node_width(&insts, 0), (3, 1));
}

#[test]
fn single_byte_atoms() {
    for op in [Op::Set, Op::NegSet, Op::Dot] {
        let insts = vec![Inst::new(op)];
        assert_eq!(node_width(&insts, 0), (1, 1), "{}", op.name());
    }
}

#[test]
fn variable_leaves() {
    for op in [Op::MetaClass, Op::Backref] {
        let insts = vec![Inst::new(op)];
        assert_eq!(node_width(&insts, 0).0, VARIABLE, "{}", op.name());
    }
}

#[test]
fn zero_width_anchors() {
    for op in [Op::Begin, Op::End] {
        let insts = vec![Inst::new(op)];
        assert_eq!(node_width(&insts, 0), (0, 1), "{}", op.name());
    }
}

// === Quantifiers ===

#[test]
fn uncounted_quantifiers_are_variable_and_skip_their_body() {
    for op in [Op::Opt, Op::Star, Op::Plus, Op::LazyStar, Op::LazyPlus] {
        let insts = vec![Inst::new(op), word(b"ab")];
        assert_eq!(node_width(&insts, 0), (VARIABLE, 2), "{}", op.name());
    }
}

#[test]
fn exact_repeat_multiplies_body_width() {
    let mut rep = Inst::new(Op::Repeat);
    rep.val = 3;
    rep.val2 = 3;
    let insts = vec![rep, word(b"ab")];
    assert_eq!(node_width(&insts, 0), (6, 2));
}

#[test]
fn bounded_repeat_is_variable() {
    let mut rep = Inst::new(Op::Repeat);
    rep.val = 2;
    rep.val2 = 5;
    let insts = vec![rep, word(b"a")];
    assert_eq!(node_width(&insts, 0).0, VARIABLE);
}

#[test]
fn repeat_width_rules() {
    assert_eq!(repeat_width(2, 3, 3), 6);
    assert_eq!(repeat_width(2, 0, 0), 0);
    assert_eq!(repeat_width(2, 2, 5), VARIABLE);
    assert_eq!(repeat_width(VARIABLE, 3, 3), VARIABLE);
    // Overflowing widths degrade to variable rather than wrapping.
    assert_eq!(repeat_width(i32::MAX, 2, 2), VARIABLE);
}

// === Composites ===

#[test]
fn group_sums_children() {
    // Group(end=3), Word "ab", Dot
    let mut dot = Inst::new(Op::Dot);
    dot.len = 1;
    let insts = vec![with_val(Op::Group, 3), word(b"ab"), dot];
    assert_eq!(node_width(&insts, 0), (3, 3));
}

#[test]
fn group_with_variable_child_is_variable() {
    let insts = vec![with_val(Op::CapGroup, 3), Inst::new(Op::Star), word(b"a")];
    assert_eq!(node_width(&insts, 0), (VARIABLE, 3));
}

#[test]
fn lookarounds_are_zero_width_regardless_of_body() {
    for op in [Op::Ahead, Op::NegAhead, Op::Behind, Op::NegBehind] {
        let insts = vec![with_val(op, 2), word(b"abc")];
        assert_eq!(node_width(&insts, 0), (0, 2), "{}", op.name());
    }
}

#[test]
fn or_with_equal_arms_is_fixed() {
    // Or(mid=2, end=3), Word "x", Word "y"
    let mut or = Inst::new(Op::Or);
    or.val = 2;
    or.val2 = 3;
    let insts = vec![or, word(b"x"), word(b"y")];
    assert_eq!(node_width(&insts, 0), (1, 3));
}

#[test]
fn or_with_unequal_arms_is_variable() {
    let mut or = Inst::new(Op::Or);
    or.val = 2;
    or.val2 = 3;
    let insts = vec![or, word(b"x"), word(b"yz")];
    assert_eq!(node_width(&insts, 0).0, VARIABLE);
}

// === Sequences ===

#[test]
fn seq_width_sums_siblings() {
    let mut dot = Inst::new(Op::Dot);
    dot.len = 1;
    let insts = vec![word(b"ab"), dot, word(b"c")];
    assert_eq!(seq_width(&insts, 0, 3), 4);
}

#[test]
fn seq_width_is_variable_if_any_node_is() {
    let insts = vec![word(b"ab"), Inst::new(Op::Backref)];
    assert_eq!(seq_width(&insts, 0, 2), VARIABLE);
}

#[test]
fn empty_seq_is_zero() {
    let insts: Vec<Inst> = vec![];
    assert_eq!(seq_width(&insts, 0, 0), 0);
}

#[test]
fn next_sibling_skips_composite_bodies() {
    // Group(end=3), Word, Word, Word
    let insts = vec![with_val(Op::Group, 3), word(b"a"), word(b"b"), word(b"c")];
    assert_eq!(next_sibling(&insts, 0), 3);
    assert_eq!(next_sibling(&insts, 3), 4);
}
