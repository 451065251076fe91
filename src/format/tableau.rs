use crate::error::Result;
use crate::eval::constant_value;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::order::VariableOrder;
use crate::rewrite::normalize;
use crate::tableau::{CONSTANT, Tableau};

/// Layout options for the tableau grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableauFormat {
    /// Hide the columns of basic variables.
    pub compact: bool,
    /// Print the objective row last, negated, labelled `-z`.
    pub opposite_objective: bool,
}

impl Default for TableauFormat {
    fn default() -> Self {
        Self {
            compact: false,
            opposite_objective: true,
        }
    }
}

impl TableauFormat {
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }

    pub fn with_opposite_objective(mut self, opposite: bool) -> Self {
        self.opposite_objective = opposite;
        self
    }

    /// Render `tableau` as a fixed-width grid:
    ///
    /// ```text
    /// x1  x2  s1  s2 |
    /// ---------------+----=---
    ///  3   0   1   0 |  4 = s1
    ///  0   5   0   1 |  6 = s2
    /// ---------------+----=---
    ///  1   2   0   0 |  0 = -z
    /// ```
    pub fn render(&self, tableau: &Tableau) -> Result<String> {
        let order = tableau.order();
        let columns = tableau.columns();
        let shown: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !(self.compact && tableau.is_basic(c)))
            .map(|(j, _)| j)
            .collect();
        let constant = columns.len() - 1;

        let objective_label = if self.opposite_objective {
            negated_label(tableau.objective_var())
        } else {
            tableau.objective_var().to_string()
        };
        let head_just = tableau
            .basis()
            .iter()
            .map(String::len)
            .chain(std::iter::once(objective_label.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; columns.len()];
        for (j, name) in columns.iter().enumerate() {
            widths[j] = name.len();
        }
        let mut rendered: Vec<Vec<String>> = Vec::with_capacity(tableau.row_count());
        for row in tableau.rows() {
            let mut cells = Vec::with_capacity(row.len());
            for (j, cell) in row.iter().enumerate() {
                let text = cell.to_string();
                let negated = negate(cell, order)?.to_string();
                widths[j] = widths[j].max(text.len()).max(negated.len());
                cells.push(text);
            }
            rendered.push(cells);
        }

        let glue = |k: usize, j: usize, plain: &'static str, bar: &'static str| {
            if j == constant {
                bar
            } else if k > 0 {
                plain
            } else {
                ""
            }
        };
        let line = |cells: &[String], label: &str| {
            let mut out = String::new();
            for (k, &j) in shown.iter().enumerate() {
                out.push_str(glue(k, j, "  ", " | "));
                out.push_str(&format!("{:>w$}", cells[j], w = widths[j]));
            }
            out.push_str(&format!(" = {label:>head_just$}"));
            out
        };

        let mut header = String::new();
        let mut rule = String::new();
        for (k, &j) in shown.iter().enumerate() {
            header.push_str(glue(k, j, "  ", " | "));
            header.push_str(&format!("{:>w$}", columns[j], w = widths[j]));
            rule.push_str(glue(k, j, "--", "-+-"));
            rule.push_str(&"-".repeat(widths[j]));
        }
        header.push_str(&" ".repeat(3 + head_just));
        rule.push_str("-=-");
        rule.push_str(&"-".repeat(head_just));

        let mut out = vec![header, rule.clone()];
        let objective_cells = if self.opposite_objective {
            tableau.rows()[0]
                .iter()
                .map(|c| Ok(negate(c, order)?.to_string()))
                .collect::<Result<Vec<_>>>()?
        } else {
            rendered[0].clone()
        };
        if !self.opposite_objective {
            out.push(line(&objective_cells, &objective_label));
        }
        for (basic, cells) in tableau.basis().iter().zip(&rendered[1..]) {
            out.push(line(cells, basic));
        }
        if self.opposite_objective {
            out.push(rule);
            out.push(line(&objective_cells, &objective_label));
        }
        Ok(out.join("\n"))
    }
}

/// Grid rendering with the default layout.
pub fn tableau_grid(tableau: &Tableau) -> Result<String> {
    TableauFormat::default().render(tableau)
}

/// Render `tableau` as a dictionary: the objective and every basic variable
/// written over the non-basic ones.
///
/// ```text
///  z =  0 +  1*x1 +  2*x2
/// s1 =  4 + -3*x1
/// s2 =  6         + -5*x2
/// ```
///
/// Lines keep their trailing padding so terms stay aligned.
pub fn dictionary(tableau: &Tableau) -> Result<String> {
    let order = tableau.order();
    let objective_label = tableau.objective_var().to_string();
    let head_just = tableau
        .basis()
        .iter()
        .map(String::len)
        .chain(std::iter::once(objective_label.len()))
        .max()
        .unwrap_or(0);

    let mut just = Vec::with_capacity(tableau.dict_columns().len());
    for col in tableau.dict_columns() {
        let mut width = 0;
        for row in 0..tableau.row_count() {
            let cell = tableau.cell(row, col)?;
            width = width
                .max(cell.to_string().len())
                .max(negate(cell, order)?.to_string().len());
        }
        just.push(width + col.len() + usize::from(!col.is_empty()));
    }

    let mut labels = vec![(0, None)];
    for basic in tableau.basis() {
        labels.push((tableau.row_for_basic(basic)?, Some(basic.as_str())));
    }

    let mut lines = Vec::with_capacity(labels.len());
    for (row, basic) in labels {
        let label = basic.unwrap_or(&objective_label);
        let mut out = format!("{label:>head_just$} = ");
        for (k, col) in tableau.dict_columns().iter().enumerate() {
            if tableau.is_basic(col) && tableau.cell(0, col)?.to_string() == "0" {
                continue;
            }
            let cell = tableau.cell(row, col)?;
            let expr = if col == CONSTANT {
                cell.clone()
            } else {
                negate(cell, order)?
            };
            let zero = constant_value(&expr).is_ok_and(|n| n.is_zero());
            let term = if col == CONSTANT {
                expr.to_string()
            } else if basic != Some(col.as_str()) && !zero {
                if k > 0 {
                    out.push_str(" + ");
                }
                format!("{expr}*{col}")
            } else {
                if k > 0 {
                    out.push_str("   ");
                }
                String::new()
            };
            out.push_str(&format!("{term:>w$}", w = just[k]));
        }
        lines.push(out);
    }
    Ok(lines.join("\n"))
}

fn negate(cell: &Expr, order: &VariableOrder) -> Result<Expr> {
    normalize(Expr::unary(UnaryOp::Neg, cell.clone()), order)
}

/// `z` for `-z` and `-z` for `z`.
fn negated_label(var: &Expr) -> String {
    match var {
        Expr::Unary(UnaryOp::Neg, inner) => inner.to_string(),
        Expr::Binary(BinaryOp::Mul, c, inner) if c.as_number().is_some_and(|n| n.is_minus_one()) => {
            inner.to_string()
        }
        other => format!("-{other}"),
    }
}
