use std::collections::HashMap;

use tracing::{debug, warn};

use super::{Model, fresh_name, is_sign_constraint, objective_name};
use crate::error::{LpError, Result};
use crate::eval::constant_value;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::number::Number;
use crate::order::{VariableOrder, prefix_unique};
use crate::rewrite::{Rewriter, substitute};

/// A model in canonical form with single-variable bounds folded away.
///
/// Every decision variable is non-negative: the program holds general `<=`
/// constraints followed by `x >= 0` sign constraints. `renames` maps each
/// user variable that was replaced to its expression over the new ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    objective: Expr,
    constraints: Vec<Expr>,
    variables: Vec<String>,
    initial_variables: Vec<String>,
    renames: HashMap<String, Expr>,
    infeasible: bool,
    order: VariableOrder,
}

#[derive(Default)]
struct Bounds {
    lower: Option<Number>,
    upper: Option<Number>,
    shared: bool,
}

impl Program {
    pub fn from_model(model: &Model) -> Result<Self> {
        let objective_var = model.objective_name().to_string();
        let mut appearance: Vec<String> = model.objective().variables();
        appearance.extend(model.variables().iter().cloned());
        let order = VariableOrder::from_appearance(&appearance);

        let rewriter = Rewriter::new(&order);
        let objective = rewriter.canonical(model.objective().clone())?;
        let constraints = expand(&rewriter, model.constraints().iter().cloned())?;

        let mut program = Self {
            objective,
            constraints,
            variables: Vec::new(),
            initial_variables: model.variables().to_vec(),
            renames: HashMap::new(),
            infeasible: false,
            order,
        };
        program.refresh_variables(&objective_var);
        program.fold_bounds(&objective_var)?;

        let rewriter = Rewriter::new(&program.order);
        program.objective = rewriter.normalize(program.objective.clone())?;
        let constraints = expand(&rewriter, std::mem::take(&mut program.constraints))?;

        if constraints.iter().any(|c| c.as_bool() == Some(false)) {
            warn!("trivially false constraint");
            program.infeasible = true;
        }
        let (mut general, mut signs) = (Vec::new(), Vec::new());
        for constraint in constraints {
            if constraint.as_bool().is_some() {
                continue;
            }
            if is_sign_constraint(&constraint) {
                signs.push(constraint);
            } else if constraint.is_binary(BinaryOp::Le) {
                general.push(constraint);
            } else {
                return Err(LpError::Model(format!("Illegal constraint: {constraint}")));
            }
        }
        if general.is_empty() {
            warn!("no (<=) constraints");
        }
        general.extend(signs);
        program.constraints = general;
        program.refresh_variables(&objective_var);
        program.order = VariableOrder::from_appearance(&program.variables);
        Ok(program)
    }

    fn refresh_variables(&mut self, objective_var: &str) {
        let mut names: Vec<String> = self
            .objective
            .variables()
            .into_iter()
            .filter(|v| v != objective_var)
            .collect();
        for constraint in &self.constraints {
            names.extend(constraint.variables());
        }
        self.variables = prefix_unique(&names);
    }

    /// Collect the bounds single-variable constraints put on `var`.
    fn bounds(&self, var: &str) -> Result<Bounds> {
        let Expr::Objective(_, _, value) = &self.objective else {
            return Err(LpError::Invariant("program objective lost its shape".into()));
        };
        let mut bounds = Bounds {
            shared: value.variables().iter().any(|v| v == var),
            ..Bounds::default()
        };
        for constraint in &self.constraints {
            let vars = constraint.variables();
            if !vars.iter().any(|v| v == var) {
                continue;
            }
            let (op, left, right) = match constraint {
                Expr::Binary(op @ (BinaryOp::Le | BinaryOp::Ge), left, right) if vars.len() == 1 => {
                    (*op, left, right)
                }
                _ => {
                    bounds.shared = true;
                    continue;
                }
            };
            let coef = match &**left {
                Expr::Binary(BinaryOp::Mul, c, _) => constant_value(c)?,
                _ => Number::one(),
            };
            let bound = constant_value(right)?
                .checked_div(&coef)
                .ok_or_else(|| LpError::Indeterminate(format!("bound of {constraint}")))?;
            if (op == BinaryOp::Ge) == coef.is_positive() {
                bounds.lower = Some(match bounds.lower.take() {
                    Some(lower) => lower.max(bound),
                    None => bound,
                });
            } else {
                bounds.upper = Some(match bounds.upper.take() {
                    Some(upper) => upper.min(bound),
                    None => bound,
                });
            }
        }
        Ok(bounds)
    }

    /// Replace every bounded or free variable by non-negative ones.
    fn fold_bounds(&mut self, objective_var: &str) -> Result<()> {
        for var in self.variables.clone() {
            let bounds = self.bounds(&var)?;
            if !bounds.shared {
                warn!(var = %var, "unused variable dropped with its constraints");
                if matches!((&bounds.lower, &bounds.upper), (Some(l), Some(u)) if l > u) {
                    self.infeasible = true;
                }
                self.constraints
                    .retain(|c| !c.variables().iter().any(|v| *v == var));
                self.initial_variables.retain(|v| *v != var);
                self.variables.retain(|v| *v != var);
                continue;
            }

            let mut taken = self.variables.clone();
            taken.push(objective_var.to_string());
            let mut fresh = || {
                let name = fresh_name("x", &taken);
                taken.push(name.clone());
                name
            };

            let replacement = match (bounds.lower, bounds.upper) {
                (None, None) => {
                    let (pos, neg) = (fresh(), fresh());
                    warn!(var = %var, pos = %pos, neg = %neg, "free variable split");
                    for name in [&pos, &neg] {
                        self.constraints.push(Expr::Binary(
                            BinaryOp::Ge,
                            Expr::var(name.as_str()).boxed(),
                            Expr::integer(0).boxed(),
                        ));
                    }
                    self.push_variables([pos.clone(), neg.clone()]);
                    Expr::binary(BinaryOp::Sub, Expr::var(pos), Expr::var(neg))?
                }
                (None, Some(upper)) => {
                    let name = fresh();
                    debug!(var = %var, upper = %upper, name = %name, "upper bound only");
                    self.push_variables([name.clone()]);
                    let flipped = Expr::unary(UnaryOp::Neg, Expr::var(name));
                    Expr::binary(BinaryOp::Add, flipped, Expr::number(upper))?
                }
                (Some(lower), Some(upper)) if lower == upper => {
                    debug!(var = %var, value = %lower, "fixed variable eliminated");
                    Expr::number(lower)
                }
                (Some(lower), _) if !lower.is_zero() => {
                    let name = fresh();
                    debug!(var = %var, lower = %lower, name = %name, "shifted lower bound");
                    self.push_variables([name.clone()]);
                    Expr::binary(BinaryOp::Add, Expr::var(name), Expr::number(lower))?
                }
                _ => continue,
            };
            self.replace(&var, &replacement);
        }
        Ok(())
    }

    fn push_variables<const N: usize>(&mut self, names: [String; N]) {
        for name in names {
            self.order.push(&name);
            self.variables.push(name);
        }
    }

    fn replace(&mut self, var: &str, replacement: &Expr) {
        self.objective = substitute(&self.objective, var, replacement);
        for constraint in self.constraints.iter_mut() {
            *constraint = substitute(constraint, var, replacement);
        }
        if self.initial_variables.iter().any(|v| v == var) {
            self.renames.insert(var.to_string(), replacement.clone());
        }
    }

    /// Objective in canonical `max` form.
    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    pub fn objective_name(&self) -> &str {
        objective_name(&self.objective).unwrap_or_default()
    }

    /// General `<=` constraints first, then sign constraints.
    pub fn constraints(&self) -> &[Expr] {
        &self.constraints
    }

    pub fn general_constraints(&self) -> impl Iterator<Item = &Expr> {
        self.constraints.iter().filter(|c| !is_sign_constraint(c))
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// User variables that still get a reported value.
    pub fn initial_variables(&self) -> &[String] {
        &self.initial_variables
    }

    pub fn renames(&self) -> &HashMap<String, Expr> {
        &self.renames
    }

    /// A constraint reduced to `False`, or an unused variable with
    /// conflicting bounds.
    pub fn is_infeasible(&self) -> bool {
        self.infeasible
    }

    pub fn order(&self) -> &VariableOrder {
        &self.order
    }
}

/// Canonicalize constraints and split lists and conjunctions, dropping
/// duplicates. Disjunctions are not supported.
fn expand(rewriter: &Rewriter<'_>, constraints: impl IntoIterator<Item = Expr>) -> Result<Vec<Expr>> {
    fn cut(rewriter: &Rewriter<'_>, expr: Expr, acc: &mut Vec<Expr>) -> Result<()> {
        match expr {
            Expr::List(items) => items.into_iter().try_for_each(|e| cut(rewriter, e, acc)),
            Expr::Binary(BinaryOp::And, a, b) => {
                cut(rewriter, rewriter.canonical(*a)?, acc)?;
                cut(rewriter, rewriter.canonical(*b)?, acc)
            }
            Expr::Binary(BinaryOp::Or, ..) => Err(LpError::Unsupported(format!(
                "disjunctive constraint: {expr}"
            ))),
            expr => {
                if !acc.contains(&expr) {
                    acc.push(expr);
                }
                Ok(())
            }
        }
    }

    let mut acc = Vec::new();
    for constraint in constraints {
        cut(rewriter, rewriter.canonical(constraint)?, &mut acc)?;
    }
    Ok(acc)
}
