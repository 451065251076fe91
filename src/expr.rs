//! Expression tree definitions and helpers.

use std::fmt;

use crate::error::{LpError, Result};
use crate::number::Number;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Number(Number),
    Bool(bool),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Xor,
    If,
    Iif,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::If => "if",
            BinaryOp::Iif => "iif",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }

    /// Word operators: `and`, `or`, `xor`, `if`, `iif`.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor | BinaryOp::If | BinaryOp::Iif
        )
    }

    /// Comparison holding exactly when `self` does not.
    pub fn negated(self) -> Option<BinaryOp> {
        match self {
            BinaryOp::Gt => Some(BinaryOp::Le),
            BinaryOp::Lt => Some(BinaryOp::Ge),
            BinaryOp::Ge => Some(BinaryOp::Lt),
            BinaryOp::Le => Some(BinaryOp::Gt),
            BinaryOp::Eq => Some(BinaryOp::Ne),
            BinaryOp::Ne => Some(BinaryOp::Eq),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sense {
    Min,
    Max,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Min => write!(f, "min"),
            Sense::Max => write!(f, "max"),
        }
    }
}

/// Expression node. Each node owns its children; trees are rebuilt, never shared.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// Syntactic list standing for per-item expansion (`x1, x2 >= 0`).
    List(Vec<Expr>),
    /// `sense variable = value`.
    Objective(Sense, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn number(value: impl Into<Number>) -> Self {
        Expr::Literal(Literal::Number(value.into()))
    }

    pub fn integer(value: i64) -> Self {
        Expr::number(Number::integer(value))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    /// Build a binary node, rejecting division by a literal zero.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Result<Self> {
        if op == BinaryOp::Div && right.as_number().is_some_and(Number::is_zero) {
            return Err(LpError::DivisionByZero);
        }
        Ok(Expr::Binary(op, left.boxed(), right.boxed()))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, operand.boxed())
    }

    pub fn objective(sense: Sense, var: Expr, value: Expr) -> Self {
        Expr::Objective(sense, var.boxed(), value.boxed())
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Expr::Literal(Literal::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Expr::Literal(Literal::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        if let Expr::Variable(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }

    pub fn is_binary(&self, op: BinaryOp) -> bool {
        matches!(self, Expr::Binary(o, _, _) if *o == op)
    }

    pub fn is_unary(&self, op: UnaryOp) -> bool {
        matches!(self, Expr::Unary(o, _) if *o == op)
    }

    /// Variable names in post-order, each listed at its first appearance.
    pub fn variables(&self) -> Vec<String> {
        fn walk(expr: &Expr, acc: &mut Vec<String>) {
            match expr {
                Expr::Literal(_) => {}
                Expr::Variable(name) => {
                    if !acc.iter().any(|v| v == name) {
                        acc.push(name.clone());
                    }
                }
                Expr::Unary(_, inner) => walk(inner, acc),
                Expr::Binary(_, a, b) | Expr::Objective(_, a, b) => {
                    walk(a, acc);
                    walk(b, acc);
                }
                Expr::List(items) => items.iter().for_each(|e| walk(e, acc)),
            }
        }

        let mut acc = Vec::new();
        walk(self, &mut acc);
        acc
    }

    pub fn contains_variable(&self) -> bool {
        match self {
            Expr::Literal(_) => false,
            Expr::Variable(_) => true,
            Expr::Unary(_, inner) => inner.contains_variable(),
            Expr::Binary(_, a, b) | Expr::Objective(_, a, b) => {
                a.contains_variable() || b.contains_variable()
            }
            Expr::List(items) => items.iter().any(Expr::contains_variable),
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::render(self))
    }
}

pub fn var(name: impl Into<String>) -> Expr {
    Expr::var(name)
}

pub fn int(value: i64) -> Expr {
    Expr::integer(value)
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Add, a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Sub, a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Mul, a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Result<Expr> {
    Expr::binary(BinaryOp::Div, a, b)
}

pub fn neg(a: Expr) -> Expr {
    Expr::Unary(UnaryOp::Neg, a.boxed())
}

pub fn not(a: Expr) -> Expr {
    Expr::Unary(UnaryOp::Not, a.boxed())
}

pub fn compare(op: BinaryOp, a: Expr, b: Expr) -> Expr {
    debug_assert!(op.is_comparison());
    Expr::Binary(op, a.boxed(), b.boxed())
}
