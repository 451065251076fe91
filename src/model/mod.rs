//! Linear programs as parsed from text, and the pipeline that reduces them
//! to standard form.

mod program;
mod standard;

pub use program::Program;
pub use standard::StandardForm;

use tracing::debug;

use crate::error::{LpError, Result};
use crate::expr::{BinaryOp, Expr, Literal};
use crate::order::prefix_unique;
use crate::parser::{parse_constraint, parse_objective};
use crate::typing::objective_variable;

/// An objective and its constraints, exactly as the user wrote them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    objective: Expr,
    constraints: Vec<Expr>,
    variables: Vec<String>,
}

impl Model {
    /// Assemble a model from an objective tree and constraint trees.
    pub fn new(objective: Expr, constraints: Vec<Expr>) -> Result<Self> {
        let name = objective_name(&objective)?.to_string();
        let mut names = Vec::new();
        for constraint in &constraints {
            let vars = constraint.variables();
            if vars.contains(&name) {
                return Err(LpError::Model(format!(
                    "Constraint uses objective as variable: {constraint}"
                )));
            }
            names.extend(vars);
        }
        Ok(Self {
            objective,
            constraints,
            variables: prefix_unique(&names),
        })
    }

    /// Parse one statement per line. Blank lines and `#` comments are
    /// skipped; the objective line starts with `min` or `max` and must come
    /// before any constraint.
    pub fn parse(text: &str) -> Result<Self> {
        let mut objective = None;
        let mut constraints = Vec::new();
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            if starts_with_keyword(line, "min") || starts_with_keyword(line, "max") {
                if objective.is_some() {
                    return Err(LpError::Model("Multiple objective function found".into()));
                }
                objective = Some(parse_objective(line)?);
                continue;
            }
            if objective.is_none() {
                return Err(LpError::Model(
                    "Constraint found before objective function".into(),
                ));
            }
            debug!(line = lineno + 1, constraint = line, "parsed constraint");
            constraints.push(parse_constraint(line)?);
        }
        let objective =
            objective.ok_or_else(|| LpError::Model("No objective function found".into()))?;
        Self::new(objective, constraints)
    }

    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    pub fn constraints(&self) -> &[Expr] {
        &self.constraints
    }

    /// Decision variables in prefix order, the objective variable excluded.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn objective_name(&self) -> &str {
        // validated in `new`
        objective_name(&self.objective).unwrap_or_default()
    }
}

fn starts_with_keyword(line: &str, kw: &str) -> bool {
    line.strip_prefix(kw)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

pub(crate) fn objective_name(objective: &Expr) -> Result<&str> {
    match objective {
        Expr::Objective(_, var, _) => objective_variable(var)
            .ok_or_else(|| LpError::Objective(format!("invalid objective variable \"{var}\""))),
        other => Err(LpError::Objective(format!(
            "expected an objective, found \"{other}\""
        ))),
    }
}

/// `x >= 0` for a bare variable `x`.
pub fn is_sign_constraint(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(BinaryOp::Ge, left, right) => {
            matches!(**left, Expr::Variable(_))
                && matches!(&**right, Expr::Literal(Literal::Number(n)) if n.is_zero())
        }
        _ => false,
    }
}

/// Smallest `{prefix}{n}`, `n >= 1`, not yet taken.
pub(crate) fn fresh_name(prefix: &str, taken: &[String]) -> String {
    (1..)
        .map(|n| format!("{prefix}{n}"))
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| prefix.to_string())
}
