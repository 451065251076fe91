//! Values reported to the user once a solve ends.

use std::collections::HashMap;
use std::fmt;

use crate::error::{LpError, Result};
use crate::eval::{Context, Value, constant_value, evaluate};
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::model::Program;
use crate::number::Number;
use crate::rewrite::{normalize, substitute_all};
use crate::tableau::{CONSTANT, Tableau};

use super::status::Status;

/// Terminal status with the objective value first, then every user variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub status: Status,
    pub values: Vec<(String, Number)>,
}

impl Summary {
    pub fn infeasible() -> Self {
        Self {
            status: Status::Infeasible,
            values: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Number> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Read the result off a terminal tableau.
    pub(super) fn extract(
        status: Status,
        tableau: &Tableau,
        program: &Program,
        unbounded: Option<&str>,
    ) -> Result<Self> {
        let objective_name = program.objective_name().to_string();
        let minimizing = is_negated(tableau.objective_var());
        match status {
            Status::Unbounded => {
                let objective = if minimizing {
                    Number::NegInfinity
                } else {
                    Number::PosInfinity
                };
                let mut values = vec![(objective_name.clone(), objective)];
                if let Some(entering) = unbounded {
                    let ray = Ray::new(tableau, entering)?;
                    for var in program.initial_variables() {
                        if *var == objective_name {
                            continue;
                        }
                        let expr = match program.renames().get(var) {
                            Some(rename) => rename.clone(),
                            None => Expr::var(var.as_str()),
                        };
                        if let Some(value) = ray.limit(&expr)? {
                            values.push((var.clone(), value));
                        }
                    }
                }
                Ok(Self { status, values })
            }
            Status::Solved => {
                let mut exprs: HashMap<String, Expr> = tableau
                    .variables()
                    .iter()
                    .map(|v| (v.clone(), Expr::integer(0)))
                    .collect();
                for basic in tableau.basis() {
                    let row = tableau.row_for_basic(basic)?;
                    exprs.insert(basic.clone(), tableau.cell(row, CONSTANT)?.clone());
                }

                let value = tableau.objective_value()?;
                let objective = if minimizing { -value } else { value };
                let mut values = vec![(objective_name.clone(), objective)];
                for var in program.initial_variables() {
                    if *var == objective_name {
                        continue;
                    }
                    let value = match program.renames().get(var) {
                        Some(rename) => resolve(rename, &exprs, program)?,
                        None => match exprs.get(var) {
                            Some(expr) => constant_value(expr)?,
                            None => Number::zero(),
                        },
                    };
                    values.push((var.clone(), value));
                }
                Ok(Self { status, values })
            }
            Status::Infeasible => Ok(Self::infeasible()),
            Status::Unsolved => Err(LpError::Invariant(
                "summary requested before a terminal status".into(),
            )),
        }
    }
}

/// `-z`, as `-1*z` or `-(z)`.
fn is_negated(var: &Expr) -> bool {
    match var {
        Expr::Unary(UnaryOp::Neg, _) => true,
        Expr::Binary(BinaryOp::Mul, c, _) => c.as_number().is_some_and(Number::is_negative),
        _ => false,
    }
}

/// Half-line of feasible points along which `entering` grows without bound.
///
/// Non-basic variables stay at 0 and each basic variable moves by its
/// column coefficient, so every value is affine in the step `t`.
struct Ray {
    entering: String,
    origin: Vec<(String, Number)>,
    column: Vec<(String, Number)>,
    nonbasic: Vec<String>,
}

impl Ray {
    fn new(tableau: &Tableau, entering: &str) -> Result<Self> {
        Ok(Self {
            entering: entering.to_string(),
            origin: tableau.coefs_column(CONSTANT)?,
            column: tableau.coefs_column(entering)?,
            nonbasic: tableau.nonbasic(),
        })
    }

    fn point(&self, expr: &Expr, t: &Number) -> Result<Number> {
        let mut context: Context = self
            .nonbasic
            .iter()
            .chain(expr.variables().iter())
            .map(|v| (v.clone(), Value::Number(Number::zero())))
            .collect();
        for ((basic, value), (_, coef)) in self.origin.iter().zip(&self.column) {
            let moved = coef
                .checked_mul(t)
                .and_then(|step| value.checked_sub(&step))
                .ok_or_else(|| LpError::Indeterminate(format!("{basic} along the ray")))?;
            context.insert(basic.clone(), Value::Number(moved));
        }
        context.insert(self.entering.clone(), Value::Number(t.clone()));
        match evaluate(expr, &context)? {
            Value::Number(n) => Ok(n),
            other => Err(LpError::TypeMismatch(format!(
                "expression evaluated to \"{other}\", but a numeric value was expected"
            ))),
        }
    }

    /// Limit of `expr` along the ray, or `None` when it stays finite.
    fn limit(&self, expr: &Expr) -> Result<Option<Number>> {
        let start = self.point(expr, &Number::zero())?;
        let next = self.point(expr, &Number::one())?;
        let slope = next
            .checked_sub(&start)
            .ok_or_else(|| LpError::Indeterminate(format!("{expr} along the ray")))?;
        Ok(if slope.is_positive() {
            Some(Number::PosInfinity)
        } else if slope.is_negative() {
            Some(Number::NegInfinity)
        } else {
            None
        })
    }
}

/// Value of a back-substitution; variables absent from the tableau are 0.
fn resolve(rename: &Expr, exprs: &HashMap<String, Expr>, program: &Program) -> Result<Number> {
    let mut known = exprs.clone();
    for var in rename.variables() {
        known.entry(var).or_insert_with(|| Expr::integer(0));
    }
    let resolved = normalize(substitute_all(rename, &known), program.order())?;
    constant_value(&resolved)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        for (name, value) in &self.values {
            write!(f, "\n{name} = {value}")?;
        }
        Ok(())
    }
}
