//! Unit tests for the type checker.

use super::{environment::StaticEnvironment, type_checker::check};
use crate::{
    ast::{
        ast::{Constructor, FnDef, Program, TypeDef},
        expressions::{CaseBranch, Expr, Operator, Pattern},
        types::Type,
    },
    errors::errors::{Namespace, TypeError},
};

fn adt(name: &str, constructors: &[(&str, Vec<Type>)]) -> TypeDef {
    TypeDef {
        name: name.to_string(),
        constructors: constructors
            .iter()
            .map(|(name, fields)| Constructor {
                name: name.to_string(),
                fields: fields.clone(),
            })
            .collect(),
    }
}

fn function(name: &str, param: &str, param_type: Type, result_type: Type, body: Expr) -> FnDef {
    FnDef {
        name: name.to_string(),
        param: param.to_string(),
        param_type,
        result_type,
        body,
    }
}

fn coin() -> TypeDef {
    adt("Coin", &[("Heads", vec![]), ("Tails", vec![])])
}

fn pair() -> TypeDef {
    adt("Pair", &[("MkPair", vec![Type::Integer, Type::Text])])
}

fn names(errors: &[TypeError]) -> Vec<&str> {
    errors.iter().map(|e| e.get_error_name()).collect()
}

fn check_expr(type_defs: Vec<TypeDef>, main: Expr) -> (Type, Vec<TypeError>) {
    check(&Program::new(type_defs, vec![], main))
}

fn sum_to() -> FnDef {
    // fn sumTo(n: Int): Int = if n == 0 then 0 else n + sumTo(n - 1)
    function(
        "sumTo",
        "n",
        Type::Integer,
        Type::Integer,
        Expr::if_(
            Expr::binary(Expr::var("n"), Operator::Eq, Expr::int(0)),
            Expr::int(0),
            Expr::binary(
                Expr::var("n"),
                Operator::Add,
                Expr::app(
                    Expr::var("sumTo"),
                    Expr::binary(Expr::var("n"), Operator::Sub, Expr::int(1)),
                ),
            ),
        ),
    )
}

#[test]
fn test_structural_type_equality() {
    let a = Type::function(Type::adt("Coin"), Type::function(Type::Integer, Type::Text));
    let b = Type::function(Type::adt("Coin"), Type::function(Type::Integer, Type::Text));
    let c = Type::function(Type::adt("Coin"), Type::function(Type::Integer, Type::Text));

    assert_eq!(a, a.clone());
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
    assert_ne!(a, Type::function(Type::adt("Pair"), Type::Integer));
}

#[test]
fn test_unknown_is_compatible_but_not_equal() {
    let ty = Type::function(Type::Unknown, Type::Integer);

    assert!(ty.is_compatible_with(&Type::function(Type::Text, Type::Integer)));
    assert!(!ty.is_compatible_with(&Type::function(Type::Text, Type::Bool)));
    assert_ne!(Type::Unknown, Type::Integer);
}

#[test]
fn test_type_display() {
    let ty = Type::function(
        Type::function(Type::Integer, Type::Bool),
        Type::function(Type::adt("Coin"), Type::Text),
    );
    assert_eq!(ty.to_string(), "(Int -> Bool) -> Coin -> Text");
}

#[test]
fn test_literals() {
    assert_eq!(check_expr(vec![], Expr::int(1)), (Type::Integer, vec![]));
    assert_eq!(check_expr(vec![], Expr::bool(true)), (Type::Bool, vec![]));
    assert_eq!(check_expr(vec![], Expr::text("x")), (Type::Text, vec![]));
}

#[test]
fn test_error_accumulation_in_traversal_order() {
    // let _ = 1 + true in (let _ = y in 0)
    let main = Expr::let_(
        "_",
        Expr::binary(Expr::int(1), Operator::Add, Expr::bool(true)),
        Expr::let_("_", Expr::var("y"), Expr::int(0)),
    );
    let (ty, errors) = check_expr(vec![], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(names(&errors), vec!["OperandTypeMismatch", "UnboundVariable"]);
    assert_eq!(
        errors[1],
        TypeError::UnboundVariable {
            name: "y".to_string()
        }
    );
}

#[test]
fn test_unbound_variable_does_not_cascade() {
    let main = Expr::binary(Expr::var("y"), Operator::Add, Expr::int(1));
    let (ty, errors) = check_expr(vec![], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(names(&errors), vec!["UnboundVariable"]);
}

#[test]
fn test_division_by_zero_is_well_typed() {
    let main = Expr::binary(Expr::int(10), Operator::Div, Expr::int(0));
    assert_eq!(check_expr(vec![], main), (Type::Integer, vec![]));
}

#[test]
fn test_operators() {
    let cases = vec![
        (Expr::binary(Expr::int(1), Operator::Mul, Expr::int(2)), Type::Integer),
        (Expr::binary(Expr::text("a"), Operator::Eq, Expr::text("b")), Type::Bool),
        (Expr::binary(Expr::bool(true), Operator::And, Expr::bool(false)), Type::Bool),
        (Expr::binary(Expr::bool(true), Operator::Or, Expr::bool(false)), Type::Bool),
        (Expr::binary(Expr::text("a"), Operator::Concat, Expr::text("b")), Type::Text),
    ];

    for (expr, expected) in cases {
        assert_eq!(check_expr(vec![], expr), (expected, vec![]));
    }
}

#[test]
fn test_operand_mismatch_keeps_nominal_type() {
    let main = Expr::binary(Expr::int(1), Operator::Concat, Expr::text("a"));
    let (ty, errors) = check_expr(vec![], main);
    assert_eq!(ty, Type::Text);
    assert_eq!(
        errors,
        vec![TypeError::OperandTypeMismatch {
            operator: Operator::Concat,
            left: Type::Integer,
            right: Type::Text,
        }]
    );

    let main = Expr::binary(Expr::int(1), Operator::Eq, Expr::bool(true));
    let (ty, errors) = check_expr(vec![], main);
    assert_eq!(ty, Type::Bool);
    assert_eq!(names(&errors), vec!["OperandTypeMismatch"]);
}

#[test]
fn test_lambda_and_application() {
    let main = Expr::app(
        Expr::lambda(
            "x",
            Type::Integer,
            Expr::binary(Expr::var("x"), Operator::Add, Expr::int(1)),
        ),
        Expr::int(2),
    );
    assert_eq!(check_expr(vec![], main), (Type::Integer, vec![]));

    let lambda = Expr::lambda("x", Type::Text, Expr::var("x"));
    assert_eq!(
        check_expr(vec![], lambda),
        (Type::function(Type::Text, Type::Text), vec![])
    );
}

#[test]
fn test_argument_mismatch_keeps_result_type() {
    let main = Expr::binary(
        Expr::app(Expr::lambda("x", Type::Integer, Expr::var("x")), Expr::text("no")),
        Operator::Add,
        Expr::int(1),
    );
    let (ty, errors) = check_expr(vec![], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(
        errors,
        vec![TypeError::ArgumentTypeMismatch {
            expected: Type::Integer,
            found: Type::Text,
        }]
    );
}

#[test]
fn test_not_a_function_still_checks_argument() {
    let main = Expr::app(Expr::int(1), Expr::var("missing"));
    let (ty, errors) = check_expr(vec![], main);

    assert_eq!(ty, Type::Unknown);
    assert_eq!(names(&errors), vec!["NotAFunction", "UnboundVariable"]);
}

#[test]
fn test_self_recursive_function() {
    let program = Program::new(
        vec![],
        vec![sum_to()],
        Expr::app(Expr::var("sumTo"), Expr::int(10)),
    );
    assert_eq!(check(&program), (Type::Integer, vec![]));
}

#[test]
fn test_mutually_recursive_functions() {
    let is_even = function(
        "isEven",
        "n",
        Type::Integer,
        Type::Bool,
        Expr::if_(
            Expr::binary(Expr::var("n"), Operator::Eq, Expr::int(0)),
            Expr::bool(true),
            Expr::app(
                Expr::var("isOdd"),
                Expr::binary(Expr::var("n"), Operator::Sub, Expr::int(1)),
            ),
        ),
    );
    let is_odd = function(
        "isOdd",
        "n",
        Type::Integer,
        Type::Bool,
        Expr::if_(
            Expr::binary(Expr::var("n"), Operator::Eq, Expr::int(0)),
            Expr::bool(false),
            Expr::app(
                Expr::var("isEven"),
                Expr::binary(Expr::var("n"), Operator::Sub, Expr::int(1)),
            ),
        ),
    );
    let program = Program::new(
        vec![],
        vec![is_even, is_odd],
        Expr::app(Expr::var("isEven"), Expr::int(4)),
    );

    assert_eq!(check(&program), (Type::Bool, vec![]));
}

#[test]
fn test_return_type_mismatch() {
    let program = Program::new(
        vec![],
        vec![function("f", "x", Type::Integer, Type::Text, Expr::var("x"))],
        Expr::app(Expr::var("f"), Expr::int(1)),
    );
    let (ty, errors) = check(&program);

    assert_eq!(ty, Type::Text);
    assert_eq!(
        errors,
        vec![TypeError::ReturnTypeMismatch {
            function: "f".to_string(),
            expected: Type::Text,
            found: Type::Integer,
        }]
    );
}

#[test]
fn test_duplicate_definitions() {
    let program = Program::new(
        vec![
            coin(),
            adt("Coin", &[("Edge", vec![])]),
            adt("Dup", &[("A", vec![]), ("A", vec![Type::Integer])]),
        ],
        vec![
            function("f", "x", Type::Integer, Type::Integer, Expr::var("x")),
            function("f", "y", Type::Text, Type::Text, Expr::var("y")),
        ],
        Expr::app(Expr::var("f"), Expr::int(1)),
    );
    let (ty, errors) = check(&program);

    // the first definition of `f` wins
    assert_eq!(ty, Type::Integer);
    assert_eq!(
        errors[..3],
        [
            TypeError::DuplicateDefinition {
                namespace: Namespace::Type,
                name: "Coin".to_string()
            },
            TypeError::DuplicateDefinition {
                namespace: Namespace::Constructor,
                name: "Dup::A".to_string()
            },
            TypeError::DuplicateDefinition {
                namespace: Namespace::Function,
                name: "f".to_string()
            },
        ]
    );
}

#[test]
fn test_same_constructor_name_in_different_types() {
    let program = Program::new(
        vec![adt("A", &[("Mk", vec![])]), adt("B", &[("Mk", vec![])])],
        vec![],
        Expr::construction("B", "Mk", vec![]),
    );
    assert_eq!(check(&program), (Type::adt("B"), vec![]));
}

#[test]
fn test_unknown_types_in_annotations() {
    let program = Program::new(
        vec![adt("Box", &[("MkBox", vec![Type::adt("Missing")])])],
        vec![function("f", "x", Type::adt("Nope"), Type::Integer, Expr::int(0))],
        Expr::lambda("y", Type::adt("Gone"), Expr::int(0)),
    );
    let (_, errors) = check(&program);

    assert_eq!(
        errors,
        vec![
            TypeError::UnknownType {
                name: "Missing".to_string()
            },
            TypeError::UnknownType {
                name: "Nope".to_string()
            },
            TypeError::UnknownType {
                name: "Gone".to_string()
            },
        ]
    );
}

#[test]
fn test_static_environment_tables() {
    let program = Program::new(vec![coin(), pair()], vec![sum_to()], Expr::int(0));
    let (statics, errors) = StaticEnvironment::build(&program);

    assert!(errors.is_empty());
    assert_eq!(
        statics.get_adt("Coin"),
        Some(&vec!["Heads".to_string(), "Tails".to_string()])
    );
    assert_eq!(
        statics.get_constructor("Pair", "MkPair"),
        Some(&vec![Type::Integer, Type::Text])
    );
    assert_eq!(
        statics.get_function("sumTo"),
        Some(&Type::function(Type::Integer, Type::Integer))
    );
    assert_eq!(statics.get_constructor("Coin", "MkPair"), None);
}

#[test]
fn test_construction_checks_every_field() {
    let main = Expr::construction("Pair", "MkPair", vec![Expr::text("a"), Expr::int(1)]);
    let (ty, errors) = check_expr(vec![pair()], main);

    assert_eq!(ty, Type::adt("Pair"));
    assert_eq!(names(&errors), vec!["FieldTypeMismatch", "FieldTypeMismatch"]);
}

#[test]
fn test_construction_arity_mismatch() {
    let main = Expr::construction(
        "Pair",
        "MkPair",
        vec![Expr::bool(true), Expr::text("a"), Expr::var("z")],
    );
    let (ty, errors) = check_expr(vec![pair()], main);

    assert_eq!(ty, Type::adt("Pair"));
    assert_eq!(
        names(&errors),
        vec!["ArityMismatch", "FieldTypeMismatch", "UnboundVariable"]
    );
}

#[test]
fn test_unknown_constructor() {
    let main = Expr::construction("Coin", "Edge", vec![]);
    let (ty, errors) = check_expr(vec![coin()], main);

    assert_eq!(ty, Type::adt("Coin"));
    assert_eq!(names(&errors), vec!["UnknownConstructor"]);
}

#[test]
fn test_round_trip_construction_and_matching() {
    let main = Expr::case(
        Expr::construction("Pair", "MkPair", vec![Expr::int(3), Expr::text("x")]),
        vec![CaseBranch::new(
            Pattern::new("Pair", "MkPair", &["a", "b"]),
            Expr::var("a"),
        )],
    );
    assert_eq!(check_expr(vec![pair()], main), (Type::Integer, vec![]));
}

#[test]
fn test_pattern_binders_get_field_types() {
    let main = Expr::case(
        Expr::construction("Pair", "MkPair", vec![Expr::int(3), Expr::text("x")]),
        vec![CaseBranch::new(
            Pattern::new("Pair", "MkPair", &["a", "b"]),
            Expr::var("b"),
        )],
    );
    assert_eq!(check_expr(vec![pair()], main), (Type::Text, vec![]));
}

#[test]
fn test_non_exhaustive_match() {
    let main = Expr::case(
        Expr::construction("Coin", "Tails", vec![]),
        vec![CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::int(1))],
    );
    let (ty, errors) = check_expr(vec![coin()], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(
        errors,
        vec![TypeError::NonExhaustiveMatch {
            type_name: "Coin".to_string(),
            constructor: "Tails".to_string(),
        }]
    );
}

#[test]
fn test_duplicate_branch() {
    let main = Expr::case(
        Expr::construction("Coin", "Heads", vec![]),
        vec![
            CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::int(1)),
            CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::int(2)),
            CaseBranch::new(Pattern::new("Coin", "Tails", &[]), Expr::int(3)),
        ],
    );
    let (_, errors) = check_expr(vec![coin()], main);

    assert_eq!(names(&errors), vec!["DuplicateBranch"]);
}

#[test]
fn test_branch_type_mismatch_first_branch_wins() {
    let main = Expr::case(
        Expr::construction("Coin", "Heads", vec![]),
        vec![
            CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::int(1)),
            CaseBranch::new(Pattern::new("Coin", "Tails", &[]), Expr::text("two")),
        ],
    );
    let (ty, errors) = check_expr(vec![coin()], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(
        errors,
        vec![TypeError::BranchTypeMismatch {
            expected: Type::Integer,
            found: Type::Text,
        }]
    );
}

#[test]
fn test_pattern_arity_mismatch() {
    let main = Expr::case(
        Expr::construction("Pair", "MkPair", vec![Expr::int(3), Expr::text("x")]),
        vec![CaseBranch::new(
            Pattern::new("Pair", "MkPair", &["a", "b", "c"]),
            Expr::var("c"),
        )],
    );
    let (ty, errors) = check_expr(vec![pair()], main);

    // `c` has no field behind it, so it is bound to the placeholder
    assert_eq!(ty, Type::Unknown);
    assert_eq!(names(&errors), vec!["ArityMismatch"]);
}

#[test]
fn test_pattern_type_mismatch() {
    let main = Expr::case(
        Expr::construction("Coin", "Heads", vec![]),
        vec![
            CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::int(1)),
            CaseBranch::new(Pattern::new("Coin", "Tails", &[]), Expr::int(2)),
            CaseBranch::new(
                Pattern::new("Pair", "MkPair", &["a", "b"]),
                Expr::var("a"),
            ),
        ],
    );
    let (ty, errors) = check_expr(vec![coin(), pair()], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(
        errors,
        vec![TypeError::PatternTypeMismatch {
            expected: "Coin".to_string(),
            found: "Pair".to_string(),
        }]
    );
}

#[test]
fn test_case_on_non_adt_falls_back_to_pattern_type() {
    let main = Expr::case(
        Expr::int(5),
        vec![CaseBranch::new(Pattern::new("Coin", "Heads", &[]), Expr::text("h"))],
    );
    let (ty, errors) = check_expr(vec![coin()], main);

    assert_eq!(ty, Type::Text);
    assert_eq!(names(&errors), vec!["NotAnADT", "NonExhaustiveMatch"]);
}

#[test]
fn test_if_rules() {
    let main = Expr::if_(Expr::int(1), Expr::int(2), Expr::text("three"));
    let (ty, errors) = check_expr(vec![], main);

    assert_eq!(ty, Type::Integer);
    assert_eq!(names(&errors), vec!["ConditionNotBool", "BranchTypeMismatch"]);
}

#[test]
fn test_let_binding_shadows() {
    let main = Expr::let_(
        "x",
        Expr::int(1),
        Expr::let_("x", Expr::text("s"), Expr::var("x")),
    );
    assert_eq!(check_expr(vec![], main), (Type::Text, vec![]));
}

#[test]
fn test_local_bindings_go_out_of_scope() {
    // the lambda parameter is not visible after the lambda
    let main = Expr::binary(
        Expr::app(Expr::lambda("x", Type::Integer, Expr::var("x")), Expr::int(1)),
        Operator::Add,
        Expr::var("x"),
    );
    let (_, errors) = check_expr(vec![], main);
    assert_eq!(names(&errors), vec!["UnboundVariable"]);
}
