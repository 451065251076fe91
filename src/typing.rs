//! Construction-time checks run once over a freshly parsed tree.

use crate::error::{LpError, Result};
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};

pub const BOOL_FOUND_BUT_NUM_EXPECTED: &str =
    "Expression appears to be Boolean, but a numeric expression was expected";
pub const NUM_FOUND_BUT_BOOL_EXPECTED: &str =
    "Expression appears to be numeric, but a Boolean expression was expected";
const BOOL_IN_MATH: &str = "Invalid Boolean operator in numerical expression";

fn is_obvious_math(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Literal::Number(_)) => true,
        Expr::Binary(op, _, _) => op.is_arithmetic(),
        Expr::Unary(op, _) => *op == UnaryOp::Neg,
        _ => false,
    }
}

fn is_obvious_bool(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Literal::Bool(_)) => true,
        Expr::Binary(op, _, _) => {
            op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
        }
        Expr::Unary(op, _) => *op == UnaryOp::Not,
        _ => false,
    }
}

/// Visit every node bottom-up, stopping at the first error.
fn visit(expr: &Expr, check: &mut impl FnMut(&Expr) -> Result<()>) -> Result<()> {
    match expr {
        Expr::Unary(_, inner) => visit(inner, check)?,
        Expr::Binary(_, a, b) | Expr::Objective(_, a, b) => {
            visit(a, check)?;
            visit(b, check)?;
        }
        Expr::List(items) => {
            for item in items {
                visit(item, check)?;
            }
        }
        Expr::Literal(_) | Expr::Variable(_) => {}
    }
    check(expr)
}

/// Reject operands whose type is evident from their head operator.
pub fn check_obvious_types(expr: &Expr) -> Result<()> {
    visit(expr, &mut |node: &Expr| match node {
        Expr::Binary(op, left, right) => {
            let numeric_op = op.is_arithmetic()
                || matches!(op, BinaryOp::Le | BinaryOp::Ge | BinaryOp::Lt | BinaryOp::Gt);
            if numeric_op && (is_obvious_bool(left) || is_obvious_bool(right)) {
                return Err(LpError::Type(BOOL_FOUND_BUT_NUM_EXPECTED.into()));
            }
            if matches!(op, BinaryOp::And | BinaryOp::Or)
                && (is_obvious_math(left) || is_obvious_math(right))
            {
                return Err(LpError::Type(NUM_FOUND_BUT_BOOL_EXPECTED.into()));
            }
            Ok(())
        }
        Expr::Unary(UnaryOp::Neg, inner) if is_obvious_bool(inner) => {
            Err(LpError::Type(BOOL_FOUND_BUT_NUM_EXPECTED.into()))
        }
        Expr::Unary(UnaryOp::Not, inner) if is_obvious_math(inner) => {
            Err(LpError::Type(NUM_FOUND_BUT_BOOL_EXPECTED.into()))
        }
        _ => Ok(()),
    })
}

/// Reject products of two variable terms and variables in denominators.
pub fn check_linear(expr: &Expr) -> Result<()> {
    visit(expr, &mut |node: &Expr| match node {
        Expr::Binary(BinaryOp::Mul, a, b) if a.contains_variable() && b.contains_variable() => {
            Err(LpError::NonLinear(node.to_string()))
        }
        Expr::Binary(BinaryOp::Div, _, b) if b.contains_variable() => {
            Err(LpError::NonLinear(node.to_string()))
        }
        _ => Ok(()),
    })
}

/// Numeric tree: no Boolean operator anywhere.
pub fn check_math(expr: &Expr) -> Result<()> {
    check_obvious_types(expr)?;
    check_linear(expr)?;
    visit(expr, &mut |node: &Expr| {
        if is_obvious_bool(node) {
            Err(LpError::Type(BOOL_IN_MATH.into()))
        } else {
            Ok(())
        }
    })
}

/// Boolean tree: the root must not be evidently numeric.
pub fn check_bool(expr: &Expr) -> Result<()> {
    check_obvious_types(expr)?;
    check_linear(expr)?;
    if is_obvious_math(expr) {
        return Err(LpError::Type(NUM_FOUND_BUT_BOOL_EXPECTED.into()));
    }
    Ok(())
}

/// Name of the decision variable an objective maximises or minimises.
///
/// Accepts `z`, `-z` and `c*z` for a finite non-zero literal `c`.
pub fn objective_variable(var: &Expr) -> Option<&str> {
    match var {
        Expr::Variable(name) => Some(name),
        Expr::Unary(UnaryOp::Neg, inner) => inner.as_variable(),
        Expr::Binary(BinaryOp::Mul, c, inner)
            if c.as_number().is_some_and(|c| c.is_finite() && !c.is_zero()) =>
        {
            inner.as_variable()
        }
        _ => None,
    }
}

/// Objective tree: `sense var = value` with a numeric value free of `var`.
pub fn check_objective(expr: &Expr) -> Result<()> {
    check_obvious_types(expr)?;
    check_linear(expr)?;
    let Expr::Objective(_, var, value) = expr else {
        return Err(LpError::Objective(
            "Invalid expression in objective function".into(),
        ));
    };
    let Some(name) = objective_variable(var) else {
        return Err(LpError::Objective(
            "Invalid expression in objective function variable".into(),
        ));
    };
    visit(value, &mut |node: &Expr| {
        if is_obvious_bool(node) {
            Err(LpError::Type(BOOL_IN_MATH.into()))
        } else {
            Ok(())
        }
    })?;
    if value.variables().iter().any(|v| v == name) {
        return Err(LpError::Objective(
            "Invalid variable in objective expression".into(),
        ));
    }
    Ok(())
}
