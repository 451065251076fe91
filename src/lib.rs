//! Exact symbolic Simplex: expression trees over rationals, a term-rewriting
//! normalizer, and a tableau driven by Big-M or two-phase feasibility.

pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod model;
pub mod number;
pub mod order;
pub mod parser;
pub mod prelude;
pub mod rewrite;
pub mod solver;
pub mod tableau;
pub mod typing;
pub mod ui;

pub use error::{LpError, Result};
pub use eval::{Context, Value, evaluate};
pub use expr::{BinaryOp, Expr, Literal, Sense, UnaryOp};
pub use format::{TableauFormat, dictionary, render, tableau_grid};
pub use model::{Model, Program, StandardForm};
pub use number::{Number, Rational};
pub use order::VariableOrder;
pub use parser::{parse_constraint, parse_expr, parse_objective};
pub use rewrite::{Rewriter, canonical, normalize};
pub use solver::{Method, Penalty, Solution, SolverConfig, Status, Summary, solve, solve_with};
pub use tableau::Tableau;
