// Mapping of byte spans onto the character columns used in error reports

use expr::error::Span;

#[test]
fn ascii_spans_map_one_to_one() {
    assert_eq!(Span::new(2, 3).char_range("1+a"), 2..3);
}

#[test]
fn multibyte_characters_count_as_one_column() {
    // 'é' is two bytes long
    assert_eq!(Span::new(2, 4).char_range("1+é"), 2..3);
    assert_eq!(Span::new(3, 4).char_range("é+1"), 2..3);
}

#[test]
fn end_of_input_points_past_last_character() {
    assert_eq!(Span::single(4).char_range("(1+2"), 4..5);
    assert_eq!(Span::single(3).char_range("é+"), 2..3);
}

#[test]
fn empty_source_still_has_a_column() {
    assert_eq!(Span::single(0).char_range(""), 0..1);
}

#[test]
fn lexer_reports_unexpected_multibyte_character() {
    let err = expr::evaluate_source("1+é").unwrap_err();
    assert_eq!(err.message, "Unexpected character: 'é'");
    assert_eq!(err.span, Span::new(2, 4));
    assert_eq!(err.span.char_range("1+é"), 2..3);
}
