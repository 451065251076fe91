use tracing::{debug, warn};

use super::{Program, fresh_name, objective_name};
use crate::error::{LpError, Result};
use crate::eval::constant_value;
use crate::expr::{BinaryOp, Expr, Sense, UnaryOp};
use crate::number::Number;
use crate::order::{VariableOrder, prefix_unique};
use crate::rewrite::Rewriter;

/// Equality constraints with one basic slack or artificial variable each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardForm {
    objective: Expr,
    equalities: Vec<Expr>,
    signs: Vec<Expr>,
    basis: Vec<String>,
    slacks: Vec<String>,
    artificials: Vec<String>,
    variables: Vec<String>,
    order: VariableOrder,
}

impl StandardForm {
    /// Add a slack `s{n}` to every `<=` row; a row whose right-hand side is
    /// negative is negated and gets an artificial `a{n}` as its basic
    /// variable instead.
    pub fn from_program(program: &Program) -> Result<Self> {
        let mut order = program.order().clone();
        let mut taken: Vec<String> = program.variables().to_vec();
        taken.push(program.objective_name().to_string());

        let mut equalities = Vec::new();
        let mut signs: Vec<Expr> = program
            .constraints()
            .iter()
            .filter(|c| !c.is_binary(BinaryOp::Le))
            .cloned()
            .collect();
        let mut basis = Vec::new();
        let mut slacks = Vec::new();
        let mut artificials = Vec::new();

        for constraint in program.general_constraints() {
            let Expr::Binary(BinaryOp::Le, left, right) = constraint else {
                return Err(LpError::Model(format!("Illegal constraint: {constraint}")));
            };
            let slack = fresh_name("s", &taken);
            taken.push(slack.clone());
            order.push(&slack);
            let rewriter = Rewriter::new(&order);

            let lhs = Expr::binary(BinaryOp::Add, (**left).clone(), Expr::var(slack.as_str()))?;
            let mut equality =
                rewriter.normalize(Expr::binary(BinaryOp::Eq, lhs.clone(), (**right).clone())?)?;
            signs.push(sign(&slack));
            slacks.push(slack.clone());

            if rhs(&equality)?.is_negative() {
                let artificial = fresh_name("a", &taken);
                taken.push(artificial.clone());
                order.push(&artificial);
                warn!(row = %constraint, artificial = %artificial, "negative right-hand side");
                let rewriter = Rewriter::new(&order);
                let flipped = Expr::binary(
                    BinaryOp::Add,
                    Expr::unary(UnaryOp::Neg, lhs),
                    Expr::var(artificial.as_str()),
                )?;
                let negated = Expr::unary(UnaryOp::Neg, (**right).clone());
                equality = rewriter.normalize(Expr::binary(BinaryOp::Eq, flipped, negated)?)?;
                signs.push(sign(&artificial));
                artificials.push(artificial.clone());
                basis.push(artificial);
            } else {
                basis.push(slack);
            }
            debug!(equality = %equality, "standard row");
            equalities.push(equality);
        }

        let mut names: Vec<String> = program.variables().to_vec();
        names.extend(slacks.iter().cloned());
        names.extend(artificials.iter().cloned());
        let variables = prefix_unique(&names);
        let order = VariableOrder::from_appearance(&variables);

        Ok(Self {
            objective: program.objective().clone(),
            equalities,
            signs,
            basis,
            slacks,
            artificials,
            variables,
            order,
        })
    }

    /// `max z = value`, without artificial penalties.
    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    pub fn objective_name(&self) -> &str {
        objective_name(&self.objective).unwrap_or_default()
    }

    /// Objective with `coef * a` added for each artificial `a`.
    pub fn penalized_objective(&self, coef: &Number) -> Result<Expr> {
        let Expr::Objective(sense, var, value) = &self.objective else {
            return Err(LpError::Invariant("standard form objective lost its shape".into()));
        };
        let mut value = (**value).clone();
        for artificial in &self.artificials {
            let term = Expr::binary(
                BinaryOp::Mul,
                Expr::number(coef.clone()),
                Expr::var(artificial.as_str()),
            )?;
            value = Expr::binary(BinaryOp::Add, value, term)?;
        }
        let objective = Expr::objective(*sense, (**var).clone(), value);
        Rewriter::new(&self.order).normalize(objective)
    }

    /// Phase I objective: maximise the sum of negated artificials.
    pub fn phase_one_objective(&self) -> Result<Expr> {
        let Expr::Objective(_, var, _) = &self.objective else {
            return Err(LpError::Invariant("standard form objective lost its shape".into()));
        };
        let mut terms = self
            .artificials
            .iter()
            .map(|a| Expr::unary(UnaryOp::Neg, Expr::var(a.as_str())));
        let first = terms.next().unwrap_or_else(|| Expr::integer(0));
        let value = terms.try_fold(first, |acc, term| Expr::binary(BinaryOp::Add, acc, term))?;
        let objective = Expr::objective(Sense::Max, (**var).clone(), value);
        Rewriter::new(&self.order).normalize(objective)
    }

    /// Equality rows followed by every sign constraint.
    pub fn constraints(&self) -> Vec<Expr> {
        self.equalities.iter().chain(&self.signs).cloned().collect()
    }

    pub fn equalities(&self) -> &[Expr] {
        &self.equalities
    }

    pub fn signs(&self) -> &[Expr] {
        &self.signs
    }

    pub fn basis(&self) -> &[String] {
        &self.basis
    }

    pub fn slacks(&self) -> &[String] {
        &self.slacks
    }

    pub fn artificials(&self) -> &[String] {
        &self.artificials
    }

    pub fn is_artificial(&self, var: &str) -> bool {
        self.artificials.iter().any(|a| a == var)
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn order(&self) -> &VariableOrder {
        &self.order
    }
}

fn sign(name: &str) -> Expr {
    Expr::Binary(
        BinaryOp::Ge,
        Expr::var(name).boxed(),
        Expr::integer(0).boxed(),
    )
}

fn rhs(equality: &Expr) -> Result<Number> {
    match equality {
        Expr::Binary(BinaryOp::Eq, _, right) => constant_value(right),
        other => Err(LpError::Invariant(format!(
            "standard row is not an equality: {other}"
        ))),
    }
}
