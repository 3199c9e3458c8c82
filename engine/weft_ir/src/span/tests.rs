use pretty_assertions::assert_eq;

use super::Span;

#[test]
fn new_and_accessors() {
    let span = Span::new(2, 5);
    assert_eq!(span.start, 2);
    assert_eq!(span.end, 5);
    assert_eq!(span.len(), 3);
    assert!(!span.is_empty());
}

#[test]
fn point_is_empty() {
    let span = Span::point(7);
    assert_eq!(span.len(), 0);
    assert!(span.is_empty());
}

#[test]
fn contains_is_half_open() {
    let span = Span::new(1, 4);
    assert!(!span.contains(0));
    assert!(span.contains(1));
    assert!(span.contains(3));
    assert!(!span.contains(4));
}

#[test]
fn text_slices_pattern() {
    let pattern = "a[b-d]e";
    let span = Span::new(2, 5);
    assert_eq!(span.text(pattern), "b-d");
}

#[test]
fn debug_is_range_like() {
    assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
}
