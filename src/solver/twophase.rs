use tracing::info;

use super::config::SolverConfig;
use super::simplex::Simplex;
use super::status::Status;
use super::trace::{Event, Phase};
use crate::error::{LpError, Result};
use crate::model::StandardForm;
use crate::tableau::Tableau;

/// Solve `standard` by first driving the sum of artificials to zero.
pub(super) fn solve<'a>(standard: &StandardForm, config: &'a SolverConfig) -> Result<Simplex<'a>> {
    if standard.artificials().is_empty() {
        let tableau = Tableau::new(
            standard.objective(),
            &standard.constraints(),
            standard.basis().to_vec(),
            standard.order().clone(),
        )?;
        let mut simplex = Simplex::new(tableau, Phase::Simplex, config);
        simplex.run()?;
        simplex.record(Event::Final);
        return Ok(simplex);
    }

    info!(artificials = ?standard.artificials(), "Phase I");
    let auxiliary = standard.phase_one_objective()?;
    let mut tableau = Tableau::new(
        &auxiliary,
        &standard.constraints(),
        standard.basis().to_vec(),
        standard.order().clone(),
    )?;
    for artificial in standard.artificials() {
        tableau.eliminate(artificial)?;
    }
    let mut simplex = Simplex::new(tableau, Phase::PhaseOne, config);
    if simplex.run()? == Status::Unbounded {
        return Err(LpError::Invariant("unbounded auxiliary problem".into()));
    }

    let optimum = simplex.tableau.objective_value()?;
    let stuck = standard
        .artificials()
        .iter()
        .any(|a| simplex.tableau.is_basic(a));
    if !optimum.is_zero() || stuck {
        info!(optimum = %optimum, stuck, "auxiliary optimum is not feasible");
        simplex.status = Status::Infeasible;
        return Ok(simplex);
    }

    info!("Phase II");
    simplex.tableau = simplex.tableau.rebase(standard.objective())?;
    for artificial in standard.artificials() {
        simplex.tableau.delete(artificial)?;
    }
    simplex.status = Status::Unsolved;
    simplex.unbounded = None;
    simplex.phase = Phase::PhaseTwo;
    simplex.record(Event::ArtificialsRemoved);
    simplex.run()?;
    simplex.record(Event::Final);
    Ok(simplex)
}
