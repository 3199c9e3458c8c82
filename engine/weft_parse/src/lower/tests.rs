use pretty_assertions::assert_eq;

use weft_ir::{ErrorKind, Flags, Op, Program, VARIABLE};

use crate::parse;

fn lower(pattern: &str) -> Program {
    parse(pattern, Flags::empty()).unwrap()
}

fn ops(program: &Program) -> Vec<Op> {
    program.iter().map(|inst| inst.op).collect()
}

fn literal(program: &Program, idx: usize) -> &[u8] {
    program.insts[idx].payload.literal().unwrap()
}

// === Literals ===

#[test]
fn literal_run_is_one_word() {
    let program = lower("abc");
    assert_eq!(ops(&program), vec![Op::Word, Op::Null]);
    assert_eq!(literal(&program, 0), b"abc");
    assert_eq!(program.insts[0].len, 3);
    assert_eq!(program.groups, 0);
}

#[test]
fn escapes_are_cooked_out_of_literals() {
    let program = lower(r"a\.b");
    assert_eq!(ops(&program), vec![Op::Word, Op::Null]);
    assert_eq!(literal(&program, 0), b"a.b");
    assert_eq!(program.insts[0].len, 3);
}

#[test]
fn multibyte_literal_length_is_in_bytes() {
    let program = lower("é🦀");
    assert_eq!(literal(&program, 0), "é🦀".as_bytes());
    assert_eq!(program.insts[0].len, 6);
}

// === Quantifiers ===

#[test]
fn quantifier_precedes_its_atom() {
    let program = lower("a+b");
    assert_eq!(ops(&program), vec![Op::Plus, Op::Word, Op::Word, Op::Null]);
    assert_eq!(literal(&program, 1), b"a");
    assert_eq!(literal(&program, 2), b"b");
    assert_eq!(program.insts[1].owner, Some(0));
    assert_eq!(program.max_depth, 0);
}

#[test]
fn quantifier_binds_only_the_final_rune_of_a_run() {
    let program = lower("ab+c");
    assert_eq!(
        ops(&program),
        vec![Op::Word, Op::Plus, Op::Word, Op::Word, Op::Null]
    );
    assert_eq!(literal(&program, 0), b"a");
    assert_eq!(literal(&program, 2), b"b");
    assert_eq!(literal(&program, 3), b"c");
}

#[test]
fn lazy_upgrades() {
    assert_eq!(
        ops(&lower("a*?")),
        vec![Op::LazyStar, Op::Word, Op::Null]
    );
    assert_eq!(
        ops(&lower("a+?")),
        vec![Op::LazyPlus, Op::Word, Op::Null]
    );
    // `?` has no lazy form.
    assert_eq!(ops(&lower("a??")), vec![Op::Opt, Op::Word, Op::Null]);
}

#[test]
fn exact_repeat_counts_and_width() {
    let program = lower("a{3}");
    assert_eq!(ops(&program), vec![Op::Repeat, Op::Word, Op::Null]);
    assert_eq!(program.insts[0].val, 3);
    assert_eq!(program.insts[0].val2, 3);
    assert_eq!(program.insts[0].len, 3);
}

#[test]
fn bounded_repeat_counts() {
    let program = lower("a{2,5}");
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].val2, 5);
    assert_eq!(program.insts[0].len, VARIABLE);
}

#[test]
fn open_repeat_has_max_bound() {
    let program = lower("a{2,}");
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].val2, u32::MAX);
    assert_eq!(program.insts[0].len, VARIABLE);
}

#[test]
fn malformed_repeat_counts_error_at_the_brace() {
    for pattern in ["a{}", "a{x}", "a{,5}", "a{5,2}", "a{1,2,3}"] {
        let err = parse(pattern, Flags::empty()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax, "pattern {pattern}");
        assert_eq!(err.pos, 1, "pattern {pattern}");
    }
}

// === Anchors, dot, classes ===

#[test]
fn anchors_are_zero_width() {
    let program = lower("^a$");
    assert_eq!(
        ops(&program),
        vec![Op::Begin, Op::Word, Op::End, Op::Null]
    );
    assert_eq!(program.insts[0].len, 0);
    assert_eq!(program.insts[2].len, 0);
}

#[test]
fn dot_is_one_byte_wide() {
    let program = lower(".");
    assert_eq!(ops(&program), vec![Op::Dot, Op::Null]);
    assert_eq!(program.insts[0].len, 1);
}

#[test]
fn positive_class() {
    let program = lower("[abc]");
    assert_eq!(ops(&program), vec![Op::Set, Op::Null]);
    let class = program.insts[0].payload.class().unwrap();
    assert_eq!(class.runes(), &['a', 'b', 'c']);
    assert_eq!(program.insts[0].len, 1);
}

#[test]
fn negated_class() {
    let program = lower("[^ab]");
    assert_eq!(ops(&program), vec![Op::NegSet, Op::Null]);
    let class = program.insts[0].payload.class().unwrap();
    assert_eq!(class.runes(), &['a', 'b']);
}

#[test]
fn meta_class_carries_letter_and_negation() {
    let program = lower(r"\s\D");
    assert_eq!(
        ops(&program),
        vec![Op::MetaClass, Op::MetaClass, Op::Null]
    );
    assert_eq!(program.insts[0].val, u32::from(b's'));
    assert_eq!(program.insts[0].val2, 0);
    assert_eq!(program.insts[1].val, u32::from(b'd'));
    assert_eq!(program.insts[1].val2, 1);
}

// === Backreferences ===

#[test]
fn backreference_is_zero_based() {
    let program = lower(r"(a)\1");
    assert_eq!(
        ops(&program),
        vec![Op::CapGroup, Op::Word, Op::Backref, Op::Null]
    );
    assert_eq!(program.insts[2].val, 0);
}

#[test]
fn backreference_zero_is_rejected() {
    let err = parse(r"\0", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.pos, 0);
}

// === Groups ===

#[test]
fn capture_group_end_and_index() {
    let program = lower("(ab)c");
    assert_eq!(
        ops(&program),
        vec![Op::CapGroup, Op::Word, Op::Word, Op::Null]
    );
    // End index points past the group body.
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].val2, 0);
    assert_eq!(program.insts[0].len, 2);
    assert_eq!(program.insts[1].owner, Some(0));
    assert_eq!(program.groups, 1);
    assert_eq!(program.max_depth, 1);
}

#[test]
fn capture_indices_are_dense_and_in_source_order() {
    let program = lower("(a)(b(c))");
    let captures: Vec<u32> = program
        .iter()
        .filter(|inst| inst.op == Op::CapGroup)
        .map(|inst| inst.val2)
        .collect();
    assert_eq!(captures, vec![0, 1, 2]);
    assert_eq!(program.groups, 3);
    assert_eq!(program.max_depth, 2);
}

#[test]
fn non_capturing_group_takes_no_index() {
    let program = lower("(?:ab)c");
    assert_eq!(
        ops(&program),
        vec![Op::Group, Op::Word, Op::Word, Op::Null]
    );
    assert_eq!(program.groups, 0);
}

#[test]
fn quantified_group_wraps_the_composite() {
    let program = lower("(ab)+c");
    assert_eq!(
        ops(&program),
        vec![Op::Plus, Op::CapGroup, Op::Word, Op::Word, Op::Null]
    );
    // The group's end points past its body, at the following literal.
    assert_eq!(program.insts[1].val, 3);
    assert_eq!(program.insts[1].owner, Some(0));
    assert_eq!(program.groups, 1);
    assert_eq!(program.max_depth, 1);
}

#[test]
fn unmatched_open_errors_at_end_of_pattern() {
    let err = parse("(ab", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unbalanced);
    assert_eq!(err.pos, 3);
}

#[test]
fn unmatched_close_errors_at_the_paren() {
    let err = parse("ab)", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unbalanced);
    assert_eq!(err.pos, 2);
}

// === Alternation ===

#[test]
fn top_level_alternation() {
    let program = lower("a|bc");
    assert_eq!(ops(&program), vec![Op::Or, Op::Word, Op::Word, Op::Null]);
    // Second arm starts at the second literal; end is the terminator.
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].val2, 3);
    assert_eq!(program.insts[0].len, VARIABLE);
}

#[test]
fn equal_arms_have_fixed_width() {
    let program = lower("a|b");
    assert_eq!(program.insts[0].len, 1);
}

#[test]
fn alternation_nests_inside_group() {
    let program = lower("(a|b)c");
    assert_eq!(
        ops(&program),
        vec![Op::CapGroup, Op::Or, Op::Word, Op::Word, Op::Word, Op::Null]
    );
    assert_eq!(program.insts[0].val, 4);
    assert_eq!(program.insts[1].val, 3);
    assert_eq!(program.insts[1].val2, 4);
}

#[test]
fn chained_alternation_nests_to_the_right() {
    let program = lower("a|b|c");
    assert_eq!(
        ops(&program),
        vec![Op::Or, Op::Word, Op::Or, Op::Word, Op::Word, Op::Null]
    );
    // Outer: first arm `a`, second arm is the inner alternation.
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].val2, 5);
    // Inner: arms `b` and `c`.
    assert_eq!(program.insts[2].val, 4);
    assert_eq!(program.insts[2].val2, 5);
    assert_eq!(program.insts[0].len, 1);
}

#[test]
fn empty_second_arm_is_allowed() {
    let program = lower("(a|)b");
    assert_eq!(
        ops(&program),
        vec![Op::CapGroup, Op::Or, Op::Word, Op::Word, Op::Null]
    );
    // Both fork indices land past the only arm.
    assert_eq!(program.insts[1].val, 3);
    assert_eq!(program.insts[1].val2, 3);
}

#[test]
fn quantified_first_atom_stays_inside_its_arm() {
    let program = lower("a|b+");
    assert_eq!(
        ops(&program),
        vec![Op::Or, Op::Word, Op::Plus, Op::Word, Op::Null]
    );
    // The second arm starts at the quantifier, not inside it.
    assert_eq!(program.insts[0].val, 2);
}

// === Prefixed groups ===

#[test]
fn lookahead_shapes() {
    let program = lower("(?=a)b");
    assert_eq!(
        ops(&program),
        vec![Op::Ahead, Op::Word, Op::Word, Op::Null]
    );
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].len, 0);

    assert_eq!(
        ops(&lower("(?!a)b")),
        vec![Op::NegAhead, Op::Word, Op::Word, Op::Null]
    );
}

#[test]
fn lookbehind_shapes() {
    let program = lower("(?<=ab)c");
    assert_eq!(
        ops(&program),
        vec![Op::Behind, Op::Word, Op::Word, Op::Null]
    );
    assert_eq!(program.insts[0].val, 2);
    assert_eq!(program.insts[0].len, 0);
    assert_eq!(program.max_depth, 1);

    assert_eq!(
        ops(&lower("(?<!ab)c")),
        vec![Op::NegBehind, Op::Word, Op::Word, Op::Null]
    );
}

#[test]
fn unknown_lookbehind_prefix_is_a_syntax_error() {
    let err = parse("(?<a)", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.pos, 3);
}

#[test]
fn variable_lookbehind_errors_at_the_offending_atom() {
    let err = parse("(?<=a+)b", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableLookbehind);
    assert_eq!(err.pos, 4);
}

#[test]
fn variable_counted_lookbehind_errors() {
    let err = parse("(?<=a{2,3})b", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableLookbehind);
}

#[test]
fn fixed_counted_lookbehind_is_accepted() {
    let program = lower("(?<=a{2})b");
    assert_eq!(
        ops(&program),
        vec![Op::Behind, Op::Repeat, Op::Word, Op::Word, Op::Null]
    );
}

#[test]
fn meta_class_lookbehind_is_variable() {
    let err = parse(r"(?<=\d)b", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableLookbehind);
}

#[test]
fn unequal_alternation_lookbehind_is_variable() {
    let err = parse("(?<=a|bc)d", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableLookbehind);
}

#[test]
fn equal_alternation_lookbehind_is_accepted() {
    let program = lower("(?<=a|b)c");
    assert_eq!(
        ops(&program),
        vec![Op::Behind, Op::Or, Op::Word, Op::Word, Op::Word, Op::Null]
    );
}

#[test]
fn nested_variable_group_under_lookbehind_errors() {
    let err = parse("(?<=(a+))b", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableLookbehind);
}

#[test]
fn lookahead_body_may_be_variable() {
    let program = lower("(?=a+)b");
    assert_eq!(
        ops(&program),
        vec![Op::Ahead, Op::Plus, Op::Word, Op::Word, Op::Null]
    );
}

// === Inline flags ===

#[test]
fn inline_icase_sets_flag_and_emits_nothing() {
    let program = lower("(?i)Ab");
    assert_eq!(ops(&program), vec![Op::Word, Op::Null]);
    assert_eq!(literal(&program, 0), b"Ab");
    assert!(program.flags.contains(Flags::ICASE));
    assert_eq!(program.groups, 0);
    assert_eq!(program.max_depth, 0);
}

#[test]
fn inline_dotall_sets_flag() {
    let program = lower("(?s)a.");
    assert!(program.flags.contains(Flags::DOTALL));
    assert_eq!(ops(&program), vec![Op::Word, Op::Dot, Op::Null]);
}

#[test]
fn combined_inline_flags() {
    let program = lower("(?si)x");
    assert!(program.flags.contains(Flags::ICASE));
    assert!(program.flags.contains(Flags::DOTALL));
}

#[test]
fn caller_flags_are_kept() {
    let program = parse("ab", Flags::DOTALL).unwrap();
    assert!(program.flags.contains(Flags::DOTALL));
    assert!(!program.flags.contains(Flags::ICASE));
}

#[test]
fn inline_flags_add_to_caller_flags() {
    let program = parse("(?i)ab", Flags::DOTALL).unwrap();
    assert!(program.flags.contains(Flags::ICASE));
    assert!(program.flags.contains(Flags::DOTALL));
}

#[test]
fn unknown_flag_letter_is_a_syntax_error() {
    let err = parse("(?x)a", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.pos, 2);
}

#[test]
fn unclosed_flag_group_is_a_syntax_error() {
    let err = parse("(?i", Flags::empty()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

// === Stray question mark (deliberate accommodation) ===

#[test]
fn leading_question_mark_is_ignored() {
    let program = lower("?abc");
    assert_eq!(ops(&program), vec![Op::Word, Op::Null]);
    assert_eq!(literal(&program, 0), b"abc");
}

// === Empty pattern ===

#[test]
fn empty_pattern_is_just_the_terminator() {
    let program = lower("");
    assert_eq!(ops(&program), vec![Op::Null]);
    assert_eq!(program.groups, 0);
    assert_eq!(program.max_depth, 0);
}
