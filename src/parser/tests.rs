//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Type and function definitions
//! - Operator precedence and associativity
//! - Binding forms (lambda, let, if, case)
//! - Type annotations
//! - Syntax errors

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::Program,
        expressions::{CaseBranch, Expr, Operator, Pattern},
        types::Type,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.puc".to_string()))?;
    parse(tokens, Rc::new("test.puc".to_string()))
}

fn parse_main(source: &str) -> Expr {
    parse_source(source).unwrap().main
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse_main("42"), Expr::int(42));
    assert_eq!(parse_main("true"), Expr::bool(true));
    assert_eq!(parse_main("\"hi\""), Expr::text("hi"));
}

#[test]
fn test_parse_precedence() {
    let expected = Expr::binary(
        Expr::int(5),
        Operator::Add,
        Expr::binary(Expr::int(3), Operator::Mul, Expr::int(2)),
    );
    assert_eq!(parse_main("5 + 3 * 2"), expected);
}

#[test]
fn test_parse_left_associative() {
    let expected = Expr::binary(
        Expr::binary(Expr::int(10), Operator::Sub, Expr::int(3)),
        Operator::Sub,
        Expr::int(2),
    );
    assert_eq!(parse_main("10 - 3 - 2"), expected);
}

#[test]
fn test_parse_logical_precedence() {
    // && binds tighter than ||, == tighter than both
    let expected = Expr::binary(
        Expr::var("a"),
        Operator::Or,
        Expr::binary(
            Expr::var("b"),
            Operator::And,
            Expr::binary(Expr::var("c"), Operator::Eq, Expr::int(1)),
        ),
    );
    assert_eq!(parse_main("a || b && c == 1"), expected);
}

#[test]
fn test_parse_concat() {
    let expected = Expr::binary(Expr::text("a"), Operator::Concat, Expr::text("b"));
    assert_eq!(parse_main("\"a\" ++ \"b\""), expected);
}

#[test]
fn test_parse_parenthesized_expression() {
    let expected = Expr::binary(
        Expr::binary(Expr::int(5), Operator::Add, Expr::int(3)),
        Operator::Mul,
        Expr::int(2),
    );
    assert_eq!(parse_main("(5 + 3) * 2"), expected);
}

#[test]
fn test_parse_unary_minus() {
    let expected = Expr::binary(
        Expr::binary(Expr::int(0), Operator::Sub, Expr::var("x")),
        Operator::Add,
        Expr::int(1),
    );
    assert_eq!(parse_main("-x + 1"), expected);
}

#[test]
fn test_parse_application() {
    let expected = Expr::app(Expr::app(Expr::var("f"), Expr::int(1)), Expr::int(2));
    assert_eq!(parse_main("f(1)(2)"), expected);

    let expected = Expr::binary(
        Expr::var("n"),
        Operator::Add,
        Expr::app(
            Expr::var("sumTo"),
            Expr::binary(Expr::var("n"), Operator::Sub, Expr::int(1)),
        ),
    );
    assert_eq!(parse_main("n + sumTo(n - 1)"), expected);
}

#[test]
fn test_parse_lambda() {
    let expected = Expr::lambda(
        "x",
        Type::Integer,
        Expr::binary(Expr::var("x"), Operator::Add, Expr::int(1)),
    );
    assert_eq!(parse_main("\\x : Int => x + 1"), expected);
}

#[test]
fn test_parse_let_and_if() {
    let expected = Expr::let_(
        "x",
        Expr::int(1),
        Expr::if_(
            Expr::binary(Expr::var("x"), Operator::Eq, Expr::int(1)),
            Expr::text("one"),
            Expr::text("other"),
        ),
    );
    assert_eq!(
        parse_main("let x = 1 in if x == 1 then \"one\" else \"other\""),
        expected
    );
}

#[test]
fn test_parse_construction_and_case() {
    let source = r#"
        type Pair { MkPair(Int, Text) }
        case Pair::MkPair(3, "x") {
            Pair::MkPair(a, b) => a
        }
    "#;
    let program = parse_source(source).unwrap();

    assert_eq!(program.type_defs.len(), 1);
    assert_eq!(program.type_defs[0].name, "Pair");
    assert_eq!(
        program.type_defs[0].constructors[0].fields,
        vec![Type::Integer, Type::Text]
    );

    let expected = Expr::case(
        Expr::construction("Pair", "MkPair", vec![Expr::int(3), Expr::text("x")]),
        vec![CaseBranch::new(
            Pattern::new("Pair", "MkPair", &["a", "b"]),
            Expr::var("a"),
        )],
    );
    assert_eq!(program.main, expected);
}

#[test]
fn test_parse_case_branches_without_commas() {
    let source = r#"
        type Coin { Heads() Tails() }
        case c { Coin::Heads() => 1 Coin::Tails() => 2 }
    "#;
    let program = parse_source(source).unwrap();

    assert_eq!(program.type_defs[0].constructors.len(), 2);
    match program.main {
        Expr::Case { branches, .. } => {
            assert_eq!(branches.len(), 2);
            assert_eq!(branches[1].pattern.constructor, "Tails");
            assert_eq!(branches[1].body, Expr::int(2));
        }
        other => panic!("expected a case expression, got {:?}", other),
    }
}

#[test]
fn test_parse_function_definitions() {
    let source = r#"
        fn sumTo(n: Int): Int = if n == 0 then 0 else n + sumTo(n - 1)
        fn twice(f: Int -> Int): Int -> Int = \x : Int => f(f(x))
        sumTo(10)
    "#;
    let program = parse_source(source).unwrap();

    assert_eq!(program.fn_defs.len(), 2);
    assert_eq!(program.fn_defs[0].name, "sumTo");
    assert_eq!(program.fn_defs[0].param, "n");
    assert_eq!(
        program.fn_defs[1].signature(),
        Type::function(
            Type::function(Type::Integer, Type::Integer),
            Type::function(Type::Integer, Type::Integer)
        )
    );
    assert_eq!(program.main, Expr::app(Expr::var("sumTo"), Expr::int(10)));
}

#[test]
fn test_parse_function_types_are_right_associative() {
    let program = parse_source("fn f(g: (Int -> Bool) -> Text): Int = 0 f").unwrap();

    assert_eq!(
        program.fn_defs[0].param_type,
        Type::function(Type::function(Type::Integer, Type::Bool), Type::Text)
    );
}

#[test]
fn test_parse_syntax_error_missing_else() {
    let error = parse_source("if true then 1").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_syntax_error_trailing_tokens() {
    let error = parse_source("1 2").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_parse_syntax_error_integer_overflow() {
    let error = parse_source("99999999999999999999").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_source("").is_err());
}
