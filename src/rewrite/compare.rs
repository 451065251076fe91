use std::collections::BTreeSet;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::{Rewriter, is_almost_literal, is_number};
use crate::error::{LpError, Result};
use crate::eval::{Context, Value, evaluate};
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::number::Number;

/// Leading coefficients of the terms of a linear sum.
///
/// Variables count as `1`; fractional literals contribute nothing.
pub(crate) fn nominators(expr: &Expr, acc: &mut BTreeSet<Number>) {
    match expr {
        Expr::Literal(Literal::Number(n)) if n.is_integer() || n.is_infinite() => {
            acc.insert(n.clone());
        }
        Expr::Variable(_) | Expr::List(_) => {
            acc.insert(Number::one());
        }
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub, a, b) => {
            nominators(a, acc);
            nominators(b, acc);
        }
        Expr::Binary(BinaryOp::Mul, a, _) => nominators(a, acc),
        _ => {}
    }
}

/// Denominators of the fractional coefficients of a linear sum.
pub(crate) fn denominators(expr: &Expr, acc: &mut BTreeSet<BigInt>) {
    match expr {
        Expr::Literal(Literal::Number(n)) if n.is_finite() && !n.is_integer() => {
            acc.insert(n.denom());
        }
        Expr::Unary(_, inner) => denominators(inner, acc),
        Expr::Binary(BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul, a, b) => {
            denominators(a, acc);
            denominators(b, acc);
        }
        _ => {}
    }
}

impl Rewriter<'_> {
    pub(super) fn compare(&self, op: BinaryOp, l: Expr, r: Expr) -> Result<Expr> {
        if is_almost_literal(&l) {
            if is_almost_literal(&r) {
                let node = Expr::binary(op, l, r)?;
                return match evaluate(&node, &Context::new())? {
                    Value::Bool(b) => Ok(Expr::boolean(b)),
                    other => Err(LpError::TypeMismatch(format!(
                        "comparison evaluated to \"{other}\""
                    ))),
                };
            }
            let l = self.unaop(UnaryOp::Neg, l)?;
            let r = self.unaop(UnaryOp::Neg, r)?;
            return self.binop(op, r, l);
        }
        if !is_almost_literal(&r) {
            let moved = self.binop(BinaryOp::Sub, l, r)?;
            return self.binop(op, moved, Expr::integer(0));
        }
        let l = match l {
            Expr::Binary(BinaryOp::Add, ll, lr) if is_almost_literal(&lr) => {
                let rhs = self.binop(BinaryOp::Sub, r, *lr)?;
                return self.binop(op, *ll, rhs);
            }
            l => l,
        };

        // clear fractions on the right, then on the left
        if let Some(n) = r.as_number().filter(|n| n.is_finite() && !n.is_integer()) {
            let scale = Expr::number(Number::integer(n.denom()));
            let l = self.binop(BinaryOp::Mul, scale.clone(), l)?;
            let r = self.binop(BinaryOp::Mul, scale, r)?;
            return self.binop(op, l, r);
        }
        let mut denoms = BTreeSet::new();
        denominators(&l, &mut denoms);
        if !denoms.is_empty() {
            let lcm = denoms.iter().fold(BigInt::one(), |acc, d| acc.lcm(d));
            let scale = Expr::number(Number::integer(lcm));
            let l = self.binop(BinaryOp::Mul, scale.clone(), l)?;
            let r = self.binop(BinaryOp::Mul, scale, r)?;
            return self.binop(op, l, r);
        }

        if let Some(g) = common_divisor(&l, &r) {
            let scale = Expr::number(Number::integer(g));
            let l = self.binop(BinaryOp::Div, l, scale.clone())?;
            let r = self.binop(BinaryOp::Div, r, scale)?;
            return self.binop(op, l, r);
        }

        match op {
            BinaryOp::Lt => self.binop(BinaryOp::Le, l, r),
            BinaryOp::Gt => self.binop(BinaryOp::Ge, l, r),
            BinaryOp::Ge | BinaryOp::Le if is_number(&r, Number::is_zero) => {
                self.sign_constraint(op, l, r)
            }
            _ => Expr::binary(op, l, r),
        }
    }

    /// `c*x >= 0` and `c*x <= 0` as a bound on `x` alone.
    fn sign_constraint(&self, op: BinaryOp, l: Expr, r: Expr) -> Result<Expr> {
        match l {
            Expr::Binary(BinaryOp::Mul, c, x) if c.as_number().is_some() => {
                let op = match (op, c.as_number().is_some_and(Number::is_positive)) {
                    (op, true) => op,
                    (BinaryOp::Ge, false) => BinaryOp::Le,
                    (_, false) => BinaryOp::Ge,
                };
                self.binop(op, *x, r)
            }
            l => Expr::binary(op, l, r),
        }
    }
}

/// Greater-than-one common divisor of every coefficient on both sides.
fn common_divisor(l: &Expr, r: &Expr) -> Option<BigInt> {
    let mut coefs = BTreeSet::new();
    nominators(l, &mut coefs);
    if coefs.contains(&Number::one()) {
        return None;
    }
    let mut rhs = BTreeSet::new();
    nominators(r, &mut rhs);
    if let Some(first) = rhs.into_iter().next() {
        if first.is_infinite() {
            return None;
        }
        if !first.is_zero() {
            coefs.insert(first);
        }
    }
    let mut g = BigInt::zero();
    for coef in &coefs {
        g = g.gcd(&coef.as_integer()?.abs());
    }
    (g > BigInt::one()).then_some(g)
}
