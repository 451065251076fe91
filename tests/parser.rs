use std::collections::HashMap;

use rsimplex::error::LpError;
use rsimplex::eval::{Value, constant_value, evaluate};
use rsimplex::expr::{BinaryOp, Expr, Sense};
use rsimplex::number::Number;
use rsimplex::typing::{BOOL_FOUND_BUT_NUM_EXPECTED, NUM_FOUND_BUT_BOOL_EXPECTED, check_math};
use rsimplex::{parse_constraint, parse_expr, parse_objective};

fn context(values: &[(&str, i64)]) -> HashMap<String, Value> {
    values
        .iter()
        .map(|(name, v)| (name.to_string(), Value::Number(Number::integer(*v))))
        .collect()
}

#[test]
fn renders_parsed_trees_faithfully() {
    let cases = [
        ("2*x + 3*y <= 4", "2*x + 3*y <= 4"),
        ("x1, x2 >= 0", "x1, x2 >= 0"),
        ("1.5*x", "3/2*x"),
        ("max z = x1 + 2*x2", "max z = x1 + 2*x2"),
        ("min -z = x", "min -z = x"),
        ("not x or y", "(not x) or y"),
        ("2*(x + 1)", "2*(x + 1)"),
        ("x - y - 1", "x - y - 1"),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_expr(input).unwrap().to_string(), expected, "{input}");
    }
}

#[test]
fn operators_bind_by_precedence() {
    let expr = parse_expr("x + 2*y <= 3 and y >= 1").unwrap();
    let Expr::Binary(BinaryOp::And, left, right) = expr else {
        panic!("expected a conjunction");
    };
    assert!(left.is_binary(BinaryOp::Le));
    assert!(right.is_binary(BinaryOp::Ge));

    let objective = parse_objective("max z = x").unwrap();
    assert!(matches!(objective, Expr::Objective(Sense::Max, _, _)));
}

#[test]
fn identifiers_accept_symbols() {
    let expr = parse_expr("$cost + _tmp + @n1").unwrap();
    assert_eq!(expr.variables(), vec!["$cost", "_tmp", "@n1"]);
}

#[test]
fn reports_syntax_errors() {
    for input in ["x +", "(x + 1", "max = x", "x <= <= 1"] {
        assert!(matches!(parse_expr(input), Err(LpError::Parse(_))), "{input}");
    }
}

#[test]
fn rejects_literal_zero_division() {
    assert_eq!(parse_expr("x / 0"), Err(LpError::DivisionByZero));
}

#[test]
fn obvious_type_errors() {
    assert_eq!(
        parse_expr("(x <= 1) + 2"),
        Err(LpError::Type(BOOL_FOUND_BUT_NUM_EXPECTED.into()))
    );
    assert_eq!(
        parse_expr("(x + 1) and y"),
        Err(LpError::Type(NUM_FOUND_BUT_BOOL_EXPECTED.into()))
    );
    assert_eq!(
        parse_constraint("x + 1"),
        Err(LpError::Type(NUM_FOUND_BUT_BOOL_EXPECTED.into()))
    );
    assert!(matches!(check_math(&parse_expr("x <= 1").unwrap()), Err(LpError::Type(_))));
}

#[test]
fn nonlinear_constraints_are_rejected() {
    assert!(matches!(parse_constraint("x*y <= 1"), Err(LpError::NonLinear(_))));
    assert!(matches!(parse_constraint("1/x <= 1"), Err(LpError::NonLinear(_))));
}

#[test]
fn objective_shape_is_checked() {
    assert!(matches!(parse_objective("x + 1"), Err(LpError::Objective(_))));
    assert!(matches!(parse_objective("max z = z + 1"), Err(LpError::Objective(_))));
    assert!(matches!(parse_objective("max x + y = 1"), Err(LpError::Objective(_))));
    assert!(matches!(parse_objective("max 0*z = x"), Err(LpError::Objective(_))));
    assert!(parse_objective("max 2*z = x").is_ok());
}

#[test]
fn evaluates_arithmetic_and_comparisons() {
    let ctx = context(&[("x", 3), ("y", 1)]);
    let value = evaluate(&parse_expr("2*x + y/2").unwrap(), &ctx).unwrap();
    assert_eq!(value, Value::Number(Number::fraction(13, 2)));

    let value = evaluate(&parse_expr("x >= 3 and not (y > 1)").unwrap(), &ctx).unwrap();
    assert_eq!(value, Value::Bool(true));

    let value = evaluate(&parse_expr("x xor y == 1").unwrap(), &ctx);
    assert!(matches!(value, Err(LpError::TypeMismatch(_))));
}

#[test]
fn list_comparisons_broadcast() {
    let ctx = context(&[("x", 1), ("y", -1)]);
    let expr = parse_expr("x, y >= 0").unwrap();
    assert_eq!(evaluate(&expr, &ctx).unwrap(), Value::Bool(false));

    let ctx = context(&[("x", 1), ("y", 0)]);
    assert_eq!(evaluate(&expr, &ctx).unwrap(), Value::Bool(true));
}

#[test]
fn evaluation_errors() {
    let ctx = context(&[("x", 1)]);
    assert_eq!(
        evaluate(&parse_expr("x + z").unwrap(), &ctx),
        Err(LpError::UnknownVariable("z".into()))
    );
    assert!(matches!(
        constant_value(&parse_expr("inf - inf").unwrap()),
        Err(LpError::Indeterminate(_))
    ));
    assert_eq!(
        constant_value(&parse_expr("inf + 1").unwrap()),
        Ok(Number::PosInfinity)
    );
    assert!(matches!(
        constant_value(&parse_expr("1 <= 2").unwrap()),
        Err(LpError::TypeMismatch(_))
    ));
}
