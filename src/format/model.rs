use crate::expr::{BinaryOp, Expr, Literal};
use crate::model::{Model, Program, StandardForm};
use crate::order::prefix_sort;

/// Objective first, then general constraints, then sign constraints grouped
/// as `x1, x2 <= 0` and `x1, x2 >= 0`.
pub fn listing(objective: &Expr, constraints: &[Expr]) -> Vec<String> {
    let mut out = vec![objective.to_string()];
    let mut nonpositive = Vec::new();
    let mut nonnegative = Vec::new();
    for constraint in constraints {
        match bound_of(constraint) {
            Some((BinaryOp::Le, name)) => nonpositive.push(name),
            Some((_, name)) => nonnegative.push(name),
            None => out.push(constraint.to_string()),
        }
    }
    if !nonpositive.is_empty() {
        out.push(format!("{} <= 0", prefix_sort(&nonpositive).join(", ")));
    }
    if !nonnegative.is_empty() {
        out.push(format!("{} >= 0", prefix_sort(&nonnegative).join(", ")));
    }
    out
}

/// `x <= 0` or `x >= 0`.
fn bound_of(constraint: &Expr) -> Option<(BinaryOp, &str)> {
    let Expr::Binary(op @ (BinaryOp::Le | BinaryOp::Ge), left, right) = constraint else {
        return None;
    };
    let Expr::Variable(name) = &**left else {
        return None;
    };
    matches!(&**right, Expr::Literal(Literal::Number(n)) if n.is_zero()).then_some((*op, name.as_str()))
}

pub fn model(model: &Model) -> String {
    listing(model.objective(), model.constraints()).join("\n")
}

pub fn program(program: &Program) -> String {
    listing(program.objective(), program.constraints()).join("\n")
}

pub fn standard_form(standard: &StandardForm) -> String {
    listing(standard.objective(), &standard.constraints()).join("\n")
}
