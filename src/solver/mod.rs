//! Simplex driver: Big-M and two-phase feasibility, Dantzig iteration and
//! result extraction.

mod bigm;
pub mod config;
mod simplex;
pub mod status;
mod summary;
pub mod trace;
mod twophase;

pub use config::{Method, Penalty, SolverConfig};
pub use simplex::Simplex;
pub use status::Status;
pub use summary::Summary;
pub use trace::{Event, Phase, Step, Trace};

use tracing::info;

use crate::error::Result;
use crate::model::{Model, Program, StandardForm};
use crate::tableau::Tableau;

/// Everything a solve produced.
#[derive(Debug, Clone)]
pub struct Solution {
    pub summary: Summary,
    pub program: Program,
    /// `None` when the program was infeasible before standard form.
    pub standard: Option<StandardForm>,
    /// Tableau at the terminal status.
    pub tableau: Option<Tableau>,
    pub trace: Trace,
    /// `(entering, exiting)` in the order taken.
    pub pivots: Vec<(String, String)>,
}

impl Solution {
    pub fn status(&self) -> Status {
        self.summary.status
    }
}

/// Solve `model` with the default configuration.
pub fn solve(model: &Model) -> Result<Solution> {
    solve_with(model, &SolverConfig::default())
}

pub fn solve_with(model: &Model, config: &SolverConfig) -> Result<Solution> {
    let program = Program::from_model(model)?;
    if program.is_infeasible() {
        info!(status = %Status::Infeasible, "trivially infeasible program");
        return Ok(Solution {
            summary: Summary::infeasible(),
            program,
            standard: None,
            tableau: None,
            trace: Trace::new(config.trace),
            pivots: Vec::new(),
        });
    }

    let standard = StandardForm::from_program(&program)?;
    let simplex = match config.method {
        Method::BigM => bigm::solve(&standard, config)?,
        Method::TwoPhase => twophase::solve(&standard, config)?,
    };
    let summary = Summary::extract(
        simplex.status,
        &simplex.tableau,
        &program,
        simplex.unbounded.as_deref(),
    )?;
    info!(status = %summary.status, pivots = simplex.pivots.len(), "solve finished");

    Ok(Solution {
        summary,
        program,
        standard: Some(standard),
        tableau: Some(simplex.tableau),
        trace: simplex.trace,
        pivots: simplex.pivots,
    })
}
