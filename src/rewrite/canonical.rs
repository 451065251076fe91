use super::Rewriter;
use crate::error::Result;
use crate::expr::{BinaryOp, Expr, Sense, UnaryOp};
use crate::typing::objective_variable;

impl Rewriter<'_> {
    /// Scale the objective variable out of `c*z = value`.
    pub(super) fn objective(&self, sense: Sense, var: Expr, value: Expr) -> Result<Expr> {
        let scale = match &var {
            Expr::Binary(BinaryOp::Mul, c, _) => c
                .as_number()
                .filter(|n| n.is_finite() && !n.is_zero() && !n.is_minus_one())
                .cloned(),
            _ => None,
        };
        let (var, value) = match (scale, var) {
            (Some(c), Expr::Binary(_, _, z)) => {
                if c.is_positive() {
                    let value = self.binop(BinaryOp::Div, value, Expr::number(c))?;
                    (*z, value)
                } else {
                    let value = self.binop(BinaryOp::Div, value, Expr::number(-c))?;
                    (self.unaop(UnaryOp::Neg, *z)?, value)
                }
            }
            (_, var) => (var, value),
        };
        Ok(Expr::objective(sense, var, value))
    }

    /// One rewrite per node, bottom-up; nodes it builds are normalized.
    pub(super) fn canonical_pass(&self, expr: Expr) -> Result<Expr> {
        let rebuilt = match expr {
            Expr::Unary(op, inner) => Expr::unary(op, self.canonical_pass(*inner)?),
            Expr::Binary(op, a, b) => {
                Expr::binary(op, self.canonical_pass(*a)?, self.canonical_pass(*b)?)?
            }
            Expr::List(items) => Expr::List(
                items
                    .into_iter()
                    .map(|e| self.canonical_pass(e))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Expr::Objective(sense, var, value) => Expr::objective(
                sense,
                self.canonical_pass(*var)?,
                self.canonical_pass(*value)?,
            ),
            leaf => leaf,
        };

        match rebuilt {
            Expr::Objective(Sense::Min, var, value) if objective_variable(&var).is_some() => {
                let var = self.unaop(UnaryOp::Neg, *var)?;
                let value = self.unaop(UnaryOp::Neg, *value)?;
                Ok(Expr::objective(Sense::Max, var, value))
            }
            Expr::Binary(BinaryOp::Eq, l, r) => {
                let le = self.binop(BinaryOp::Le, (*l).clone(), (*r).clone())?;
                let ge = self.binop(BinaryOp::Ge, *l, *r)?;
                self.binop(BinaryOp::And, le, ge)
            }
            Expr::Binary(BinaryOp::Ne, l, r) => {
                let lt = self.binop(BinaryOp::Lt, (*l).clone(), (*r).clone())?;
                let gt = self.binop(BinaryOp::Gt, *l, *r)?;
                self.binop(BinaryOp::Or, lt, gt)
            }
            Expr::Binary(BinaryOp::Ge, l, r) => {
                let l = self.unaop(UnaryOp::Neg, *l)?;
                let r = self.unaop(UnaryOp::Neg, *r)?;
                self.binop(BinaryOp::Le, l, r)
            }
            other => Ok(other),
        }
    }
}
