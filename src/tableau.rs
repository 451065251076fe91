//! Simplex tableau over exact, normalized cells.
//!
//! Row 0 holds the objective as `z + sum(r_k * x_k) = r_c`, so its constant
//! cell is the current objective value. Every other row is an equality
//! constraint whose basic variable has coefficient 1 there and 0 elsewhere.

use tracing::debug;

use crate::error::{LpError, Result};
use crate::eval::constant_value;
use crate::expr::{BinaryOp, Expr, Literal, UnaryOp};
use crate::number::Number;
use crate::order::{VariableOrder, prefix_unique};
use crate::rewrite::Rewriter;
use crate::typing::objective_variable;

/// Name of the constant (right-hand side) column.
pub const CONSTANT: &str = "";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tableau {
    variables: Vec<String>,
    dict_columns: Vec<String>,
    basis: Vec<String>,
    objective_var: Expr,
    /// `rows[i][j]`: column `j` of `variables`, the last cell is the constant.
    rows: Vec<Vec<Expr>>,
    order: VariableOrder,
}

impl Tableau {
    /// Build a tableau from an objective `max z = value`, the standard-form
    /// constraints (only `==` rows are used) and one basic variable per row.
    pub fn new(
        objective: &Expr,
        constraints: &[Expr],
        basis: Vec<String>,
        order: VariableOrder,
    ) -> Result<Self> {
        let Expr::Objective(_, var, value) = objective else {
            return Err(LpError::Objective(format!(
                "expected an objective, found \"{objective}\""
            )));
        };
        let objective_name = objective_variable(var)
            .ok_or_else(|| LpError::Objective(format!("invalid objective variable \"{var}\"")))?
            .to_string();

        let mut names: Vec<String> = value
            .variables()
            .into_iter()
            .filter(|v| *v != objective_name)
            .collect();
        for constraint in constraints {
            names.extend(constraint.variables());
        }
        let variables = prefix_unique(&names);

        let mut tableau = Self {
            dict_columns: std::iter::once(CONSTANT.to_string())
                .chain(variables.iter().cloned())
                .collect(),
            variables,
            basis,
            objective_var: (**var).clone(),
            rows: Vec::new(),
            order,
        };

        let row0 = tableau.objective_row(value)?;
        tableau.rows.push(row0);
        for constraint in constraints {
            if let Expr::Binary(BinaryOp::Eq, lhs, rhs) = constraint {
                let row = tableau.constraint_row(lhs, rhs)?;
                tableau.rows.push(row);
            }
        }

        if tableau.basis.len() != tableau.rows.len() - 1 {
            return Err(LpError::Invariant(format!(
                "{} basic variables for {} equality constraints",
                tableau.basis.len(),
                tableau.rows.len() - 1
            )));
        }
        if let Some(stray) = tableau.basis.iter().find(|b| !tableau.variables.contains(b)) {
            return Err(LpError::Invariant(format!(
                "basic variable {stray} is not a column"
            )));
        }
        Ok(tableau)
    }

    fn rewriter(&self) -> Rewriter<'_> {
        Rewriter::new(&self.order)
    }

    /// Row 0 cells: `-coef` per variable, `+const` for the constant column.
    fn objective_row(&self, value: &Expr) -> Result<Vec<Expr>> {
        let rewriter = self.rewriter();
        let cells = self.linear_cells(value)?;
        let last = cells.len() - 1;
        cells
            .into_iter()
            .enumerate()
            .map(|(j, cell)| {
                if j == last {
                    Ok(cell)
                } else {
                    rewriter.unaop(UnaryOp::Neg, cell)
                }
            })
            .collect()
    }

    /// `lhs - rhs` per variable, `rhs - lhs` for the constant column.
    fn constraint_row(&self, lhs: &Expr, rhs: &Expr) -> Result<Vec<Expr>> {
        let rewriter = self.rewriter();
        let left = self.linear_cells(lhs)?;
        let right = self.linear_cells(rhs)?;
        let last = left.len() - 1;
        left.into_iter()
            .zip(right)
            .enumerate()
            .map(|(j, (l, r))| {
                if j == last {
                    rewriter.binop(BinaryOp::Sub, r, l)
                } else {
                    rewriter.binop(BinaryOp::Sub, l, r)
                }
            })
            .collect()
    }

    /// Coefficient of each column in a normalized linear sum.
    fn linear_cells(&self, expr: &Expr) -> Result<Vec<Expr>> {
        let mut cells = vec![Expr::integer(0); self.variables.len() + 1];
        self.collect_linear_terms(expr, false, &mut cells)?;
        Ok(cells)
    }

    fn collect_linear_terms(&self, expr: &Expr, negate: bool, cells: &mut [Expr]) -> Result<()> {
        let (column, coef) = match expr {
            Expr::Literal(Literal::Number(_)) => (self.variables.len(), expr.clone()),
            Expr::Variable(name) => (self.column_index(name)?, Expr::integer(1)),
            Expr::Binary(BinaryOp::Mul, c, x) if c.is_literal() => match &**x {
                Expr::Variable(name) => (self.column_index(name)?, (**c).clone()),
                _ => return Err(LpError::NonLinear(expr.to_string())),
            },
            Expr::Binary(BinaryOp::Add, a, b) => {
                self.collect_linear_terms(a, negate, cells)?;
                return self.collect_linear_terms(b, negate, cells);
            }
            Expr::Binary(BinaryOp::Sub, a, b) => {
                self.collect_linear_terms(a, negate, cells)?;
                return self.collect_linear_terms(b, !negate, cells);
            }
            Expr::Unary(UnaryOp::Neg, a) => return self.collect_linear_terms(a, !negate, cells),
            _ => return Err(LpError::NonLinear(expr.to_string())),
        };
        let rewriter = self.rewriter();
        let coef = if negate {
            rewriter.unaop(UnaryOp::Neg, coef)?
        } else {
            coef
        };
        let cell = std::mem::replace(&mut cells[column], Expr::integer(0));
        cells[column] = rewriter.binop(BinaryOp::Add, cell, coef)?;
        Ok(())
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        if name == CONSTANT {
            return Ok(self.variables.len());
        }
        self.variables
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| LpError::Invariant(format!("unknown column {name}")))
    }

    /// Variables in column order, the constant column excluded.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Column names, ending with the constant column `""`.
    pub fn columns(&self) -> Vec<&str> {
        self.variables
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(CONSTANT))
            .collect()
    }

    /// Column order used when rendering dictionaries.
    pub fn dict_columns(&self) -> &[String] {
        &self.dict_columns
    }

    pub fn basis(&self) -> &[String] {
        &self.basis
    }

    pub fn is_basic(&self, var: &str) -> bool {
        self.basis.iter().any(|b| b == var)
    }

    /// The objective variable as written in the model (`z` or `-z`).
    pub fn objective_var(&self) -> &Expr {
        &self.objective_var
    }

    pub fn rows(&self) -> &[Vec<Expr>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn order(&self) -> &VariableOrder {
        &self.order
    }

    /// Cell at `row` in column `col`.
    pub fn cell(&self, row: usize, col: &str) -> Result<&Expr> {
        let j = self.column_index(col)?;
        self.rows
            .get(row)
            .map(|r| &r[j])
            .ok_or_else(|| LpError::Invariant(format!("no row {row}")))
    }

    pub fn value(&self, row: usize, col: &str) -> Result<Number> {
        constant_value(self.cell(row, col)?)
    }

    /// Current objective value, read off row 0.
    pub fn objective_value(&self) -> Result<Number> {
        self.value(0, CONSTANT)
    }

    /// Non-basic variables in column order.
    pub fn nonbasic(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter(|v| !self.is_basic(v))
            .cloned()
            .collect()
    }

    /// Row-0 coefficients of `candidates`.
    pub fn coefs_obj(&self, candidates: &[String]) -> Result<Vec<(String, Number)>> {
        candidates
            .iter()
            .map(|v| Ok((v.clone(), self.value(0, v)?)))
            .collect()
    }

    /// Negated row-0 coefficients of `candidates`: positive means improving.
    pub fn coefs_obj_neg(&self, candidates: &[String]) -> Result<Vec<(String, Number)>> {
        Ok(self
            .coefs_obj(candidates)?
            .into_iter()
            .map(|(v, c)| (v, -c))
            .collect())
    }

    /// Column `col` per basic variable, in basis order.
    pub fn coefs_column(&self, col: &str) -> Result<Vec<(String, Number)>> {
        self.basis
            .iter()
            .enumerate()
            .map(|(i, b)| Ok((b.clone(), self.value(i + 1, col)?)))
            .collect()
    }

    /// Index of the row where basic `var` has coefficient 1.
    pub fn row_for_basic(&self, var: &str) -> Result<usize> {
        if !self.is_basic(var) {
            return Err(LpError::Invariant(format!("{var} is not basic")));
        }
        for i in 1..self.rows.len() {
            if self.value(i, var)?.is_one() {
                return Ok(i);
            }
        }
        Err(LpError::Invariant(format!("no row for basic variable {var}")))
    }

    /// `const / coef` in `row` for each candidate column; a zero coefficient
    /// yields `-inf` so that a minimum over non-negative ratios skips it.
    pub fn ratio_candidates(
        &self,
        row: usize,
        candidates: &[String],
    ) -> Result<Vec<(String, Number)>> {
        let num = self.value(row, CONSTANT)?;
        candidates
            .iter()
            .map(|v| {
                let den = self.value(row, v)?;
                let ratio = if den.is_zero() {
                    Number::NegInfinity
                } else {
                    num.checked_div(&den).ok_or_else(|| {
                        LpError::Indeterminate(format!("{num} / {den}"))
                    })?
                };
                Ok((v.clone(), ratio))
            })
            .collect()
    }

    /// Exchange basic `exiting` for non-basic `entering`.
    pub fn pivot(&mut self, entering: &str, exiting: &str) -> Result<()> {
        if !self.is_basic(exiting) {
            return Err(LpError::Invariant(format!(
                "cannot pivot out non-basic {exiting}"
            )));
        }
        if self.is_basic(entering) {
            return Err(LpError::Invariant(format!(
                "cannot pivot in basic {entering}"
            )));
        }
        let row = self.row_for_basic(exiting)?;
        debug!(entering, exiting, row, "pivot");
        self.reduce(row, entering)?;

        for b in self.basis.iter_mut() {
            if b == exiting {
                *b = entering.to_string();
            }
        }
        let a = self.dict_columns.iter().position(|c| c == entering);
        let b = self.dict_columns.iter().position(|c| c == exiting);
        if let (Some(a), Some(b)) = (a, b) {
            self.dict_columns.swap(a, b);
        }
        Ok(())
    }

    /// Restore the unit column of basic `var`, leaving the basis unchanged.
    pub fn eliminate(&mut self, var: &str) -> Result<()> {
        let row = self.row_for_basic(var)?;
        self.reduce(row, var)
    }

    /// Gauss-Jordan step on `rows[pivot]` at column `col`.
    fn reduce(&mut self, pivot: usize, col: &str) -> Result<()> {
        let j = self.column_index(col)?;
        let coef = self.rows[pivot][j].clone();
        if constant_value(&coef)?.is_zero() {
            return Err(LpError::Invariant(format!(
                "zero pivot coefficient for {col} in row {pivot}"
            )));
        }

        let order = self.order.clone();
        let rewriter = Rewriter::new(&order);
        let pivot_row = self.rows[pivot]
            .iter()
            .map(|cell| rewriter.binop(BinaryOp::Div, cell.clone(), coef.clone()))
            .collect::<Result<Vec<_>>>()?;

        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == pivot {
                continue;
            }
            let factor = row[j].clone();
            for (cell, p) in row.iter_mut().zip(&pivot_row) {
                let scaled = rewriter.binop(BinaryOp::Mul, factor.clone(), p.clone())?;
                let current = std::mem::replace(cell, Expr::integer(0));
                *cell = rewriter.binop(BinaryOp::Sub, current, scaled)?;
            }
        }
        self.rows[pivot] = pivot_row;
        Ok(())
    }

    /// Drop the column of non-basic `var`.
    pub fn delete(&mut self, var: &str) -> Result<()> {
        if self.is_basic(var) {
            return Err(LpError::Invariant(format!("cannot delete basic {var}")));
        }
        let j = self.column_index(var)?;
        if j == self.variables.len() {
            return Err(LpError::Invariant("cannot delete the constant column".into()));
        }
        self.variables.remove(j);
        self.dict_columns.retain(|c| c != var);
        for row in self.rows.iter_mut() {
            row.remove(j);
        }
        debug!(var, "column deleted");
        Ok(())
    }

    /// Same constraint rows and basis under a new objective, with every basic
    /// variable eliminated from the new row 0.
    pub fn rebase(&self, objective: &Expr) -> Result<Tableau> {
        let Expr::Objective(_, var, value) = objective else {
            return Err(LpError::Objective(format!(
                "expected an objective, found \"{objective}\""
            )));
        };
        let mut next = self.clone();
        next.objective_var = (**var).clone();
        next.rows[0] = next.objective_row(value)?;
        for b in self.basis.clone() {
            next.eliminate(&b)?;
        }
        Ok(next)
    }
}
