//! Term-rewriting normalizer.
//!
//! Traversal is bottom-up and self re-entrant: children are normalized first,
//! then the rebuilt node goes through the rule set, and every node a rule
//! builds is itself sent back through the rules before being returned.

mod arith;
mod canonical;
mod compare;
mod logic;
mod substitute;

use crate::error::Result;
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::number::Number;
use crate::order::VariableOrder;

pub use substitute::{substitute, substitute_all};

/// Rule set bound to one variable order for the duration of a pass.
pub struct Rewriter<'a> {
    order: &'a VariableOrder,
}

impl<'a> Rewriter<'a> {
    pub fn new(order: &'a VariableOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &VariableOrder {
        self.order
    }

    /// Rewrite `expr` into normal form.
    pub fn normalize(&self, expr: Expr) -> Result<Expr> {
        let rebuilt = match expr {
            Expr::Unary(op, inner) => Expr::unary(op, self.normalize(*inner)?),
            Expr::Binary(op, a, b) => {
                let a = self.normalize(*a)?;
                let b = self.normalize(*b)?;
                Expr::binary(op, a, b)?
            }
            Expr::List(items) => Expr::List(
                items
                    .into_iter()
                    .map(|e| self.normalize(e))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Expr::Objective(sense, var, value) => {
                let var = self.normalize(*var)?;
                let value = self.normalize(*value)?;
                Expr::objective(sense, var, value)
            }
            leaf => leaf,
        };
        self.visit(rebuilt)
    }

    /// Normal form, then `max` objectives and `<=`/`>=` comparisons only.
    pub fn canonical(&self, expr: Expr) -> Result<Expr> {
        let normal = self.normalize(expr)?;
        self.canonical_pass(normal)
    }

    /// Apply the rule set to a node whose children are already normal.
    pub(crate) fn visit(&self, node: Expr) -> Result<Expr> {
        match node {
            Expr::Objective(sense, var, value) => self.objective(sense, *var, *value),
            Expr::Unary(op, inner) => match *inner {
                Expr::List(items) => Ok(Expr::List(
                    items
                        .into_iter()
                        .map(|e| self.unaop(op, e))
                        .collect::<Result<Vec<_>>>()?,
                )),
                inner => match op {
                    UnaryOp::Neg => self.neg(inner),
                    UnaryOp::Not => self.not(inner),
                },
            },
            Expr::Binary(op, left, right) => match (*left, *right) {
                (Expr::List(items), right) => Ok(Expr::List(
                    items
                        .into_iter()
                        .map(|e| self.binop(op, e, right.clone()))
                        .collect::<Result<Vec<_>>>()?,
                )),
                (left, Expr::List(items)) => Ok(Expr::List(
                    items
                        .into_iter()
                        .map(|e| self.binop(op, left.clone(), e))
                        .collect::<Result<Vec<_>>>()?,
                )),
                (left, right) => self.binary(op, left, right),
            },
            other => Ok(other),
        }
    }

    fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Result<Expr> {
        match op {
            BinaryOp::Sub => {
                let right = self.unaop(UnaryOp::Neg, right)?;
                self.binop(BinaryOp::Add, left, right)
            }
            BinaryOp::Add => self.add(left, right),
            BinaryOp::Mul => self.mul(left, right),
            BinaryOp::Div => self.div(left, right),
            BinaryOp::Xor | BinaryOp::If | BinaryOp::Iif => self.expand(op, left, right),
            BinaryOp::And => self.and(left, right),
            BinaryOp::Or => self.or(left, right),
            _ => self.compare(op, left, right),
        }
    }

    pub(crate) fn binop(&self, op: BinaryOp, left: Expr, right: Expr) -> Result<Expr> {
        self.visit(Expr::binary(op, left, right)?)
    }

    pub(crate) fn unaop(&self, op: UnaryOp, operand: Expr) -> Result<Expr> {
        self.visit(Expr::unary(op, operand))
    }
}

/// Rewrite `expr` into normal form under `order`.
pub fn normalize(expr: Expr, order: &VariableOrder) -> Result<Expr> {
    Rewriter::new(order).normalize(expr)
}

/// Rewrite `expr` into canonical form under `order`.
pub fn canonical(expr: Expr, order: &VariableOrder) -> Result<Expr> {
    Rewriter::new(order).canonical(expr)
}

/// Built only from literals and operators.
pub fn is_almost_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(_) => true,
        Expr::Unary(_, inner) => is_almost_literal(inner),
        Expr::Binary(_, a, b) => is_almost_literal(a) && is_almost_literal(b),
        _ => false,
    }
}

/// A variable, possibly negated or scaled by a literal.
pub fn is_almost_variable(expr: &Expr) -> bool {
    match expr {
        Expr::List(items) => items.iter().all(is_almost_variable),
        Expr::Variable(_) => true,
        Expr::Unary(_, inner) => is_almost_variable(inner),
        Expr::Binary(BinaryOp::Mul, a, b) => is_almost_literal(a) && is_almost_variable(b),
        _ => false,
    }
}

/// `(coefficient, name)` of a linear term `x` or `c*x`.
pub(crate) fn linear_term(expr: &Expr) -> Option<(Number, &str)> {
    match expr {
        Expr::Variable(name) => Some((Number::one(), name)),
        Expr::Binary(BinaryOp::Mul, c, x) => Some((c.as_number()?.clone(), x.as_variable()?)),
        _ => None,
    }
}

pub(crate) fn is_number(expr: &Expr, pred: impl Fn(&Number) -> bool) -> bool {
    matches!(expr, Expr::Literal(Literal::Number(n)) if pred(n))
}
