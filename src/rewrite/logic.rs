use super::{Rewriter, is_almost_variable};
use crate::error::Result;
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};

fn strip_not(expr: &Expr) -> &Expr {
    match expr {
        Expr::Unary(UnaryOp::Not, inner) => inner,
        other => other,
    }
}

impl Rewriter<'_> {
    pub(super) fn not(&self, operand: Expr) -> Result<Expr> {
        match operand {
            Expr::Literal(Literal::Bool(b)) => Ok(Expr::boolean(!b)),
            Expr::Unary(UnaryOp::Not, inner) => Ok(*inner),
            Expr::Binary(op @ (BinaryOp::And | BinaryOp::Or), l, r) => {
                let dual = if op == BinaryOp::And {
                    BinaryOp::Or
                } else {
                    BinaryOp::And
                };
                let l = self.unaop(UnaryOp::Not, *l)?;
                let r = self.unaop(UnaryOp::Not, *r)?;
                self.binop(dual, l, r)
            }
            Expr::Binary(op, l, r) => match op.negated() {
                Some(flipped) => self.binop(flipped, *l, *r),
                None => Ok(Expr::unary(UnaryOp::Not, Expr::Binary(op, l, r))),
            },
            other => Ok(Expr::unary(UnaryOp::Not, other)),
        }
    }

    /// `xor`, `if` and `iif` in terms of `and`, `or` and `not`.
    pub(super) fn expand(&self, op: BinaryOp, l: Expr, r: Expr) -> Result<Expr> {
        match op {
            BinaryOp::Xor => {
                let either = self.binop(BinaryOp::Or, l.clone(), r.clone())?;
                let both = self.binop(BinaryOp::And, l, r)?;
                let not_both = self.unaop(UnaryOp::Not, both)?;
                self.binop(BinaryOp::And, either, not_both)
            }
            BinaryOp::If => {
                let not_r = self.unaop(UnaryOp::Not, r)?;
                self.binop(BinaryOp::Or, l, not_r)
            }
            BinaryOp::Iif => {
                let forward = self.binop(BinaryOp::If, l.clone(), r.clone())?;
                let backward = self.binop(BinaryOp::If, r, l)?;
                self.binop(BinaryOp::And, forward, backward)
            }
            _ => Expr::binary(op, l, r),
        }
    }

    /// `l` is the negation of `r`, both being single (possibly negated) atoms.
    fn contradicts(&self, l: &Expr, r: &Expr) -> Result<bool> {
        if !(is_almost_variable(l) && is_almost_variable(r)) {
            return Ok(false);
        }
        Ok(*l == self.unaop(UnaryOp::Not, r.clone())?)
    }

    /// Whether `a` must be placed after `b` in a chain of `and`/`or`.
    fn out_of_order(&self, a: &Expr, b: &Expr) -> bool {
        match (strip_not(a), strip_not(b)) {
            (Expr::Variable(x), Expr::Variable(y)) => self.order.is_unsorted(x, y),
            _ => false,
        }
    }

    pub(super) fn and(&self, l: Expr, r: Expr) -> Result<Expr> {
        if l == r {
            return Ok(l);
        }
        if l.as_bool() == Some(true) || r.as_bool() == Some(false) {
            return Ok(r);
        }
        if l.as_bool() == Some(false) || r.as_bool() == Some(true) {
            return Ok(l);
        }
        if self.contradicts(&l, &r)? {
            return Ok(Expr::boolean(false));
        }
        self.chain(BinaryOp::And, l, r)
    }

    pub(super) fn or(&self, l: Expr, r: Expr) -> Result<Expr> {
        if l == r {
            return Ok(l);
        }
        if l.as_bool() == Some(true) || r.as_bool() == Some(false) {
            return Ok(l);
        }
        if l.as_bool() == Some(false) || r.as_bool() == Some(true) {
            return Ok(r);
        }
        if self.contradicts(&l, &r)? {
            return Ok(Expr::boolean(true));
        }
        if let Expr::Binary(BinaryOp::Or, ..) = r {
            return self.chain(BinaryOp::Or, l, r);
        }
        // distribute over conjunctions
        if let Expr::Binary(BinaryOp::And, rl, rr) = r {
            let a = self.binop(BinaryOp::Or, l.clone(), *rl)?;
            let b = self.binop(BinaryOp::Or, l, *rr)?;
            return self.binop(BinaryOp::And, a, b);
        }
        if let Expr::Binary(BinaryOp::And, ll, lr) = l {
            let a = self.binop(BinaryOp::Or, *ll, r.clone())?;
            let b = self.binop(BinaryOp::Or, *lr, r)?;
            return self.binop(BinaryOp::And, a, b);
        }
        self.chain(BinaryOp::Or, l, r)
    }

    /// Left-leaning, ordered chains of one associative operator.
    fn chain(&self, op: BinaryOp, l: Expr, r: Expr) -> Result<Expr> {
        let r = match r {
            Expr::Binary(o, rl, rr) if o == op => {
                let head = self.binop(op, l, *rl)?;
                return self.binop(op, head, *rr);
            }
            r => r,
        };
        match l {
            Expr::Binary(o, ll, lr) if o == op && self.out_of_order(&lr, &r) => {
                let head = self.binop(op, *ll, r)?;
                self.binop(op, head, *lr)
            }
            l => Expr::binary(op, l, r),
        }
    }
}
