//! Direct evaluation of expression trees.

use std::collections::HashMap;
use std::fmt;

use crate::error::{LpError, Result};
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::number::Number;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Value {
    Number(Number),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::integer(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

pub type Context = HashMap<String, Value>;

/// Evaluate `expr` under `context`.
///
/// A comparison whose left operand evaluates to a list is broadcast over the
/// list and yields the conjunction of the per-item results.
pub fn evaluate(expr: &Expr, context: &Context) -> Result<Value> {
    match expr {
        Expr::Literal(Literal::Number(n)) => Ok(Value::Number(n.clone())),
        Expr::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
        Expr::Variable(name) => context
            .get(name)
            .cloned()
            .ok_or_else(|| LpError::UnknownVariable(name.clone())),
        Expr::List(items) => Ok(Value::List(
            items
                .iter()
                .map(|e| evaluate(e, context))
                .collect::<Result<Vec<_>>>()?,
        )),
        Expr::Objective(_, _, value) => evaluate(value, context),
        Expr::Unary(op, inner) => {
            let value = evaluate(inner, context)?;
            match (op, value) {
                (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
                (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                (op, other) => Err(mismatch(op.symbol(), &other)),
            }
        }
        Expr::Binary(op, left, right) => {
            let lval = evaluate(left, context)?;
            let rval = evaluate(right, context)?;
            if let Value::List(items) = lval {
                let mut all = true;
                for item in items {
                    let result = apply(*op, item, rval.clone())?;
                    all &= result
                        .as_bool()
                        .ok_or_else(|| mismatch(op.symbol(), &result))?;
                }
                return Ok(Value::Bool(all));
            }
            apply(*op, lval, rval)
        }
    }
}

/// Evaluate a variable-free expression to a number.
pub fn constant_value(expr: &Expr) -> Result<Number> {
    match evaluate(expr, &Context::new())? {
        Value::Number(n) => Ok(n),
        other => Err(LpError::TypeMismatch(format!(
            "expression evaluated to \"{other}\", but a numeric value was expected"
        ))),
    }
}

fn apply(op: BinaryOp, lval: Value, rval: Value) -> Result<Value> {
    use BinaryOp::*;

    match (op, &lval, &rval) {
        (Add | Sub | Mul | Div, Value::Number(a), Value::Number(b)) => {
            let result = match op {
                Add => a.checked_add(b),
                Sub => a.checked_sub(b),
                Mul => a.checked_mul(b),
                _ if b.is_zero() => return Err(LpError::DivisionByZero),
                _ => a.checked_div(b),
            };
            result
                .map(Value::Number)
                .ok_or_else(|| LpError::Indeterminate(format!("{a} {} {b}", op.symbol())))
        }
        (Lt, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
        (Gt, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),
        (Le, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),
        (Ge, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),
        (Eq, Value::Number(_), Value::Number(_)) | (Eq, Value::Bool(_), Value::Bool(_)) => {
            Ok(Value::Bool(lval == rval))
        }
        (Ne, Value::Number(_), Value::Number(_)) | (Ne, Value::Bool(_), Value::Bool(_)) => {
            Ok(Value::Bool(lval != rval))
        }
        (And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
        (Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
        (Xor, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a != b)),
        (If, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || !*b)),
        (Iif, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a == b)),
        _ => Err(LpError::TypeMismatch(format!(
            "unsupported operands for '{}': \"{lval}\" and \"{rval}\"",
            op.symbol()
        ))),
    }
}

fn mismatch(op: &str, value: &Value) -> LpError {
    LpError::TypeMismatch(format!("unsupported operand for '{op}': \"{value}\""))
}
