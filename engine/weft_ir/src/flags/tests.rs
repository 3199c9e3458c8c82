use pretty_assertions::assert_eq;

use super::Flags;

#[test]
fn default_is_empty() {
    assert_eq!(Flags::default(), Flags::empty());
    assert!(!Flags::default().contains(Flags::ICASE));
    assert!(!Flags::default().contains(Flags::DOTALL));
}

#[test]
fn flags_combine() {
    let flags = Flags::ICASE | Flags::DOTALL;
    assert!(flags.contains(Flags::ICASE));
    assert!(flags.contains(Flags::DOTALL));
}

#[test]
fn inline_additions_accumulate() {
    let mut flags = Flags::ICASE;
    flags |= Flags::DOTALL;
    assert_eq!(flags, Flags::ICASE | Flags::DOTALL);
}
