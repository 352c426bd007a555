// Tree shape, reduce and token stream tests

use expr::ast::{BinaryOp, Expr, UnaryOp};
use expr::lexer::{lex, TokenType};
use expr::parser::Parser;

fn parse_str(source: &str) -> Expr {
    let tokens = lex(source).expect("lexing should succeed");
    Parser::new(tokens).parse().expect("parsing should succeed")
}

fn parse_raw_str(source: &str) -> Expr {
    let tokens = lex(source).expect("lexing should succeed");
    Parser::new(tokens).parse_raw().expect("parsing should succeed")
}

#[test]
fn lexer_produces_typed_tokens_with_lexemes() {
    let mut tokens = lex("12+(3 ^ 45)").unwrap();
    let expected = [
        (TokenType::Number, "12", 0, 2),
        (TokenType::Plus, "+", 2, 3),
        (TokenType::LeftParen, "(", 3, 4),
        (TokenType::Number, "3", 4, 5),
        (TokenType::Caret, "^", 6, 7),
        (TokenType::Number, "45", 8, 10),
        (TokenType::RightParen, ")", 10, 11),
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token_type, lexeme, start, end) in expected {
        let token = tokens.pop().unwrap();
        assert_eq!(token.token_type, token_type);
        assert_eq!(token.lexeme, lexeme);
        assert_eq!((token.span.start, token.span.end), (start, end));
    }
    assert!(tokens.is_empty());
}

#[test]
fn lexer_covers_every_operator() {
    let mut tokens = lex("+-*/^()").unwrap();
    let mut types = Vec::new();
    while !tokens.is_empty() {
        types.push(tokens.pop().unwrap().token_type);
    }
    assert_eq!(
        types,
        vec![
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Caret,
            TokenType::LeftParen,
            TokenType::RightParen,
        ]
    );
}

#[test]
fn token_stream_peek_does_not_consume() {
    let mut tokens = lex("1+2").unwrap();
    assert_eq!(tokens.peek().unwrap().lexeme, "1");
    assert_eq!(tokens.peek().unwrap().lexeme, "1");
    assert_eq!(tokens.pop().unwrap().lexeme, "1");
    assert_eq!(tokens.peek().unwrap().lexeme, "+");
}

#[test]
fn empty_token_stream_reports_end_of_input() {
    let mut tokens = lex("7").unwrap();
    tokens.pop().unwrap();

    let peek_err = tokens.peek().unwrap_err();
    assert!(peek_err.message.contains("Unexpected end of expression"));
    assert_eq!(peek_err.span.start, 1);

    let pop_err = tokens.pop().unwrap_err();
    assert!(pop_err.message.contains("Unexpected end of expression"));
}

#[test]
fn subtraction_folds_left() {
    assert_eq!(parse_str("8-3-2").to_string(), "((8 - 3) - 2)");
}

#[test]
fn power_nests_right() {
    assert_eq!(parse_str("2^3^2").to_string(), "(2 ^ (3 ^ 2))");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse_str("2+3*4").to_string(), "(2 + (3 * 4))");
    assert_eq!(parse_str("(2+3)*4").to_string(), "((2 + 3) * 4)");
}

#[test]
fn negation_wraps_only_the_next_atom() {
    match parse_str("-(1+2)*3") {
        Expr::Binary {
            left,
            operator: BinaryOp::Multiply,
            ..
        } => match *left {
            Expr::Unary {
                operator: UnaryOp::Negate,
                operand,
                ..
            } => assert_eq!(operand.to_string(), "(1 + 2)"),
            other => panic!("expected negation on the left, got {:?}", other),
        },
        other => panic!("expected multiplication at the root, got {:?}", other),
    }
}

#[test]
fn literals_are_never_signed() {
    match parse_str("-5") {
        Expr::Unary { operand, .. } => {
            assert!(matches!(*operand, Expr::Literal { value: 5, .. }));
        }
        other => panic!("expected negation, got {:?}", other),
    }
}

#[test]
fn raw_parse_keeps_grouping_placeholders() {
    let raw = parse_raw_str("((1))+(2*3)");
    assert!(!raw.is_reduced());

    match &raw {
        Expr::Binary { left, right, .. } => {
            assert!(matches!(left.as_ref(), Expr::Grouping { .. }));
            assert!(matches!(right.as_ref(), Expr::Grouping { .. }));
        }
        other => panic!("expected addition at the root, got {:?}", other),
    }
}

#[test]
fn reduce_removes_every_placeholder() {
    let reduced = parse_raw_str("((1))+(2*(3))").reduce();
    assert!(reduced.is_reduced());

    match reduced {
        Expr::Binary { left, right, .. } => {
            assert!(matches!(*left, Expr::Literal { value: 1, .. }));
            assert_eq!(right.to_string(), "(2 * 3)");
        }
        other => panic!("expected addition at the root, got {:?}", other),
    }
}

#[test]
fn reduce_is_idempotent() {
    for source in ["1", "(1)", "((2+3))*-(4)", "2^(3^(1+1))", "8-(3-2)"] {
        let once = parse_raw_str(source).reduce();
        let twice = once.clone().reduce();
        assert_eq!(once, twice, "reduce changed an already reduced tree for {}", source);
    }
}

#[test]
fn parse_returns_reduced_tree() {
    let tree = parse_str("(((7)))");
    assert!(matches!(tree, Expr::Literal { value: 7, .. }));
}

#[test]
fn raw_and_reduced_trees_evaluate_the_same() {
    for source in ["(1+2)*(3+4)", "-((2)^2)", "((8-3))-(2)"] {
        let raw = parse_raw_str(source);
        let reduced = raw.clone().reduce();
        assert_eq!(
            expr::evaluate(&raw).unwrap(),
            expr::evaluate(&reduced).unwrap(),
            "{}",
            source
        );
    }
}

#[test]
fn spans_cover_the_source_text() {
    let tree = parse_str("(1 + 2) * 3");
    assert_eq!((tree.span().start, tree.span().end), (0, 11));
}
