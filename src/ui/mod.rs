//! String-based helpers for quick usage and rendering.

use crate::error::Result;
use crate::expr::Expr;
use crate::model::Model;
use crate::order::{VariableOrder, prefix_sort};
use crate::parser::parse_expr;
use crate::rewrite::{canonical as canonical_expr, normalize as normalize_expr};
use crate::solver::{Solution, SolverConfig, solve_with as solve_model};
use crate::typing::check_objective;

/// Parse any expression; objective statements also get their shape checked.
pub fn parse(input: &str) -> Result<Expr> {
    let expr = parse_expr(input)?;
    if matches!(expr, Expr::Objective(..)) {
        check_objective(&expr)?;
    }
    Ok(expr)
}

/// Order used when an expression is rewritten on its own.
fn order_of(expr: &Expr) -> VariableOrder {
    VariableOrder::new(&prefix_sort(&expr.variables()))
}

pub fn normalize(input: &str) -> Result<Expr> {
    let expr = parse(input)?;
    let order = order_of(&expr);
    normalize_expr(expr, &order)
}

pub fn norm(input: &str) -> Result<String> {
    Ok(normalize(input)?.to_string())
}

pub fn canonical(input: &str) -> Result<Expr> {
    let expr = parse(input)?;
    let order = order_of(&expr);
    canonical_expr(expr, &order)
}

pub fn canon(input: &str) -> Result<String> {
    Ok(canonical(input)?.to_string())
}

/// Solve a model written one statement per line.
pub fn solve(input: &str) -> Result<Solution> {
    solve_with(input, &SolverConfig::default())
}

pub fn solve_with(input: &str, config: &SolverConfig) -> Result<Solution> {
    let model = Model::parse(input)?;
    solve_model(&model, config)
}

/// Status line followed by `name = value` lines.
pub fn summary(input: &str) -> Result<String> {
    Ok(solve(input)?.summary.to_string())
}
