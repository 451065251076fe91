use tracing::{info, warn};

use super::config::SolverConfig;
use super::simplex::Simplex;
use super::status::Status;
use super::trace::{Event, Phase};
use crate::error::{LpError, Result};
use crate::model::StandardForm;
use crate::tableau::{CONSTANT, Tableau};

/// Solve `standard` with artificials penalised by `-M` in the objective.
pub(super) fn solve<'a>(standard: &StandardForm, config: &'a SolverConfig) -> Result<Simplex<'a>> {
    let objective = standard.penalized_objective(&config.penalty.coefficient())?;
    let tableau = Tableau::new(
        &objective,
        &standard.constraints(),
        standard.basis().to_vec(),
        standard.order().clone(),
    )?;
    let mut simplex = Simplex::new(tableau, Phase::BigM, config);

    if !standard.artificials().is_empty() {
        info!(artificials = ?standard.artificials(), "Big-M method");
        if !prestep(&mut simplex, standard)? {
            return Ok(simplex);
        }
        for artificial in standard.artificials() {
            simplex.tableau.delete(artificial)?;
        }
        simplex.record(Event::ArtificialsRemoved);
    }

    simplex.phase = Phase::Simplex;
    simplex.run()?;
    simplex.record(Event::Final);
    Ok(simplex)
}

/// Pivot out basic variables with a positive objective coefficient, then
/// basic variables with a negative constant. Returns `false` once the
/// program is found infeasible.
fn prestep(simplex: &mut Simplex<'_>, standard: &StandardForm) -> Result<bool> {
    loop {
        let basis = simplex.tableau.basis().to_vec();
        let problematic: Vec<String> = simplex
            .tableau
            .coefs_obj(&basis)?
            .into_iter()
            .filter(|(_, c)| c.is_positive())
            .map(|(v, _)| v)
            .collect();
        let Some(exiting) = problematic.first().cloned() else {
            break;
        };
        if !standard.is_artificial(&exiting) {
            return Err(LpError::Invariant(format!(
                "positive objective coefficient for non-artificial basic variable {exiting}"
            )));
        }
        info!(exiting = %exiting, "removing artificial from basis");
        if !cleanup(simplex, standard, &exiting, problematic)? {
            return Ok(false);
        }
    }

    loop {
        let problematic: Vec<String> = simplex
            .tableau
            .coefs_column(CONSTANT)?
            .into_iter()
            .filter(|(_, c)| c.is_negative())
            .map(|(v, _)| v)
            .collect();
        let Some(exiting) = problematic.first().cloned() else {
            break;
        };
        warn!(exiting = %exiting, "removing negative basic variable");
        if !cleanup(simplex, standard, &exiting, problematic)? {
            return Ok(false);
        }
    }

    if let Some(stuck) = standard
        .artificials()
        .iter()
        .find(|a| simplex.tableau.is_basic(a))
    {
        return Err(LpError::Invariant(format!(
            "artificial {stuck} still basic after Big-M cleanup"
        )));
    }
    Ok(true)
}

fn cleanup(
    simplex: &mut Simplex<'_>,
    standard: &StandardForm,
    exiting: &str,
    mut taboo: Vec<String>,
) -> Result<bool> {
    taboo.extend(standard.artificials().iter().cloned());
    if simplex.cleanup_pivot(exiting, &taboo)? {
        return Ok(true);
    }
    info!(exiting, "no candidate with a non-negative ratio");
    simplex.status = Status::Infeasible;
    Ok(false)
}
