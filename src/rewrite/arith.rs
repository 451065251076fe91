use super::{Rewriter, is_almost_literal, is_number, linear_term};
use crate::error::{LpError, Result};
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::number::Number;

/// Exact arithmetic on two literals.
pub(super) fn fold(op: BinaryOp, a: &Number, b: &Number) -> Result<Expr> {
    let value = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div if b.is_zero() => return Err(LpError::DivisionByZero),
        BinaryOp::Div => a.checked_div(b),
        _ => None,
    };
    value
        .map(Expr::number)
        .ok_or_else(|| LpError::Indeterminate(format!("{a} {} {b}", op.symbol())))
}

impl Rewriter<'_> {
    pub(super) fn neg(&self, operand: Expr) -> Result<Expr> {
        match operand {
            Expr::Literal(Literal::Number(n)) => Ok(Expr::number(-n)),
            Expr::Variable(_) => self.binop(BinaryOp::Mul, Expr::integer(-1), operand),
            Expr::Unary(UnaryOp::Neg, inner) => Ok(*inner),
            Expr::Binary(op @ (BinaryOp::Mul | BinaryOp::Div), l, r) => {
                let l = self.unaop(UnaryOp::Neg, *l)?;
                self.binop(op, l, *r)
            }
            Expr::Binary(op @ (BinaryOp::Add | BinaryOp::Sub), l, r) => {
                let l = self.unaop(UnaryOp::Neg, *l)?;
                let r = self.unaop(UnaryOp::Neg, *r)?;
                self.binop(op, l, r)
            }
            other => Ok(Expr::unary(UnaryOp::Neg, other)),
        }
    }

    pub(super) fn mul(&self, l: Expr, r: Expr) -> Result<Expr> {
        if is_number(&r, Number::is_zero) {
            return Ok(r);
        }
        if is_number(&l, Number::is_zero) {
            return Ok(l);
        }
        if is_number(&l, Number::is_one) {
            return Ok(r);
        }
        if let Some(b) = r.as_number() {
            if let Some(a) = l.as_number() {
                return fold(BinaryOp::Mul, a, b);
            }
            return self.binop(BinaryOp::Mul, r, l);
        }
        if l.as_number().is_some() {
            match r {
                Expr::Binary(BinaryOp::Add, rl, rr) => {
                    let a = self.binop(BinaryOp::Mul, l.clone(), *rl)?;
                    let b = self.binop(BinaryOp::Mul, l, *rr)?;
                    return self.binop(BinaryOp::Add, a, b);
                }
                Expr::Binary(BinaryOp::Mul, rl, rr) => {
                    let a = self.binop(BinaryOp::Mul, l, *rl)?;
                    return self.binop(BinaryOp::Mul, a, *rr);
                }
                _ => {}
            }
        }
        match r {
            Expr::Binary(BinaryOp::Div, rl, rr) => {
                let a = self.binop(BinaryOp::Mul, l, *rl)?;
                self.binop(BinaryOp::Div, a, *rr)
            }
            r => Expr::binary(BinaryOp::Mul, l, r),
        }
    }

    pub(super) fn div(&self, l: Expr, r: Expr) -> Result<Expr> {
        if r.contains_variable() {
            return Err(LpError::NonLinear(format!("{l} / {r}")));
        }
        let l = match l {
            Expr::Variable(_) => {
                let inverse = self.binop(BinaryOp::Div, Expr::integer(1), r)?;
                return self.binop(BinaryOp::Mul, inverse, l);
            }
            Expr::Binary(BinaryOp::Mul, ll, lr) => {
                let a = self.binop(BinaryOp::Div, *ll, r)?;
                return self.binop(BinaryOp::Mul, a, *lr);
            }
            Expr::Binary(BinaryOp::Add, ll, lr) => {
                let a = self.binop(BinaryOp::Div, *ll, r.clone())?;
                let b = self.binop(BinaryOp::Div, *lr, r)?;
                return self.binop(BinaryOp::Add, a, b);
            }
            l => l,
        };
        if let (Some(a), Some(b)) = (l.as_number(), r.as_number()) {
            return fold(BinaryOp::Div, a, b);
        }
        if let Expr::Binary(BinaryOp::Div, ll, lr) = l {
            let denom = self.binop(BinaryOp::Mul, *lr, r)?;
            return self.binop(BinaryOp::Div, *ll, denom);
        }
        match r {
            Expr::Binary(BinaryOp::Div, rl, rr) => {
                let a = self.binop(BinaryOp::Mul, l, *rr)?;
                self.binop(BinaryOp::Div, a, *rl)
            }
            r => Expr::binary(BinaryOp::Div, l, r),
        }
    }

    pub(super) fn add(&self, l: Expr, r: Expr) -> Result<Expr> {
        // keep sums left-leaning
        let r = match r {
            Expr::Binary(BinaryOp::Add, rl, rr) => {
                let a = self.binop(BinaryOp::Add, l, *rl)?;
                return self.binop(BinaryOp::Add, a, *rr);
            }
            r => r,
        };
        if let Some(a) = l.as_number() {
            if let Some(b) = r.as_number() {
                return fold(BinaryOp::Add, a, b);
            }
            return self.binop(BinaryOp::Add, r, l);
        }
        if is_number(&r, Number::is_zero) {
            return Ok(l);
        }
        if matches!((&l, &r), (Expr::Variable(a), Expr::Variable(b)) if a == b) {
            return self.binop(BinaryOp::Mul, Expr::integer(2), r);
        }
        if is_almost_literal(&l) && !is_almost_literal(&r) {
            return self.binop(BinaryOp::Add, r, l);
        }
        if let Expr::Binary(BinaryOp::Div, ll, lr) = l {
            let scaled = self.binop(BinaryOp::Mul, (*lr).clone(), r)?;
            let numer = self.binop(BinaryOp::Add, *ll, scaled)?;
            return self.binop(BinaryOp::Div, numer, *lr);
        }

        if let Expr::Binary(BinaryOp::Add, ll, lr) = &l {
            if is_almost_literal(lr) {
                let (ll, lr) = ((**ll).clone(), (**lr).clone());
                if is_almost_literal(&r) {
                    let tail = self.binop(BinaryOp::Add, lr, r)?;
                    return self.binop(BinaryOp::Add, ll, tail);
                }
                let head = self.binop(BinaryOp::Add, ll, r)?;
                return self.binop(BinaryOp::Add, head, lr);
            }
            if let (Some((c1, x1)), Some((c2, x2))) = (linear_term(lr), linear_term(&r)) {
                if x1 == x2 {
                    let merged = self.merge_terms(&c1, &c2, x1)?;
                    return self.binop(BinaryOp::Add, (**ll).clone(), merged);
                }
                if self.order.is_unsorted(x1, x2) {
                    let (ll, lr) = ((**ll).clone(), (**lr).clone());
                    let head = self.binop(BinaryOp::Add, ll, r)?;
                    return self.binop(BinaryOp::Add, head, lr);
                }
            }
            return Expr::binary(BinaryOp::Add, l, r);
        }

        if let (Some((c1, x1)), Some((c2, x2))) = (linear_term(&l), linear_term(&r)) {
            if x1 == x2 {
                return self.merge_terms(&c1, &c2, x1);
            }
            if self.order.is_unsorted(x1, x2) {
                return self.binop(BinaryOp::Add, r, l);
            }
        }
        Expr::binary(BinaryOp::Add, l, r)
    }

    /// `c1*x + c2*x` as `(c1 + c2)*x`.
    fn merge_terms(&self, c1: &Number, c2: &Number, name: &str) -> Result<Expr> {
        let coef = fold(BinaryOp::Add, c1, c2)?;
        self.binop(BinaryOp::Mul, coef, Expr::var(name))
    }
}
