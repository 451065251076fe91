use tracing::{debug, info};

use super::config::SolverConfig;
use super::status::Status;
use super::trace::{Event, Phase, Trace};
use crate::error::{LpError, Result};
use crate::number::Number;
use crate::tableau::{CONSTANT, Tableau};

/// First entry holding the strict maximum (`max == true`) or minimum.
fn first_extreme(entries: &[(String, Number)], max: bool) -> Option<&(String, Number)> {
    let mut best: Option<&(String, Number)> = None;
    for entry in entries {
        let better = match best {
            None => true,
            Some((_, b)) if max => entry.1 > *b,
            Some((_, b)) => entry.1 < *b,
        };
        if better {
            best = Some(entry);
        }
    }
    best
}

/// Iteration state over one tableau.
#[derive(Debug, Clone)]
pub struct Simplex<'a> {
    pub(super) config: &'a SolverConfig,
    pub(super) tableau: Tableau,
    pub(super) status: Status,
    pub(super) phase: Phase,
    pub(super) trace: Trace,
    pub(super) pivots: Vec<(String, String)>,
    /// Entering variable of the last step, kept when it proved unboundedness.
    pub(super) unbounded: Option<String>,
}

impl<'a> Simplex<'a> {
    pub fn new(tableau: Tableau, phase: Phase, config: &'a SolverConfig) -> Self {
        let mut trace = Trace::new(config.trace);
        trace.record(phase, Event::Initial, &tableau);
        Self {
            config,
            tableau,
            status: Status::Unsolved,
            phase,
            trace,
            pivots: Vec::new(),
            unbounded: None,
        }
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub(super) fn pivot(&mut self, entering: &str, exiting: &str) -> Result<()> {
        if self.pivots.len() >= self.config.max_pivots {
            return Err(LpError::IterationLimit(self.config.max_pivots));
        }
        self.tableau.pivot(entering, exiting)?;
        self.pivots.push((entering.to_string(), exiting.to_string()));
        self.trace.record(
            self.phase,
            Event::Pivot {
                entering: entering.to_string(),
                exiting: exiting.to_string(),
            },
            &self.tableau,
        );
        Ok(())
    }

    /// Most improving non-basic variable, if any improves.
    pub fn entering(&self) -> Result<Option<String>> {
        let candidates = self.tableau.nonbasic();
        let coefs = self.tableau.coefs_obj_neg(&candidates)?;
        debug!(?coefs, "entering candidates");
        Ok(first_extreme(&coefs, true)
            .filter(|(_, c)| c.is_positive())
            .map(|(v, _)| v.clone()))
    }

    /// Minimum-ratio row over strictly positive entries of `entering`.
    pub fn exiting(&self, entering: &str) -> Result<Option<String>> {
        let constants = self.tableau.coefs_column(CONSTANT)?;
        let column = self.tableau.coefs_column(entering)?;
        let mut ratios = Vec::new();
        for ((basic, constant), (_, coef)) in constants.into_iter().zip(column) {
            if coef.is_positive() {
                let ratio = constant
                    .checked_div(&coef)
                    .ok_or_else(|| LpError::Indeterminate(format!("{constant} / {coef}")))?;
                ratios.push((basic, ratio));
            }
        }
        debug!(?ratios, entering, "exiting candidates");
        Ok(first_extreme(&ratios, false).map(|(v, _)| v.clone()))
    }

    /// One ordinary iteration: choose, test, pivot.
    pub fn step(&mut self) -> Result<Status> {
        for (basic, constant) in self.tableau.coefs_column(CONSTANT)? {
            if constant.is_negative() {
                return Err(LpError::Invariant(format!(
                    "negative right-hand side for basic variable {basic}"
                )));
            }
        }

        let Some(entering) = self.entering()? else {
            self.status = Status::Solved;
            return Ok(self.status);
        };
        let Some(exiting) = self.exiting(&entering)? else {
            info!(entering = %entering, "no row limits the entering variable");
            self.unbounded = Some(entering);
            self.status = Status::Unbounded;
            return Ok(self.status);
        };
        debug!(entering = %entering, exiting = %exiting, "simplex step");
        self.pivot(&entering, &exiting)?;
        Ok(self.status)
    }

    /// Iterate until a terminal status.
    pub fn run(&mut self) -> Result<Status> {
        info!(phase = %self.phase, "iterating");
        while !self.status.is_terminal() {
            self.step()?;
        }
        info!(phase = %self.phase, status = %self.status, pivots = self.pivots.len(), "done");
        Ok(self.status)
    }

    /// Ratio test for removing `exiting` from the basis during cleanup.
    ///
    /// Candidates are non-basic and outside `taboo`; zero coefficients score
    /// `-inf` and are skipped with the other negative ratios. Returns `false`
    /// when no candidate qualifies.
    pub(super) fn cleanup_pivot(&mut self, exiting: &str, taboo: &[String]) -> Result<bool> {
        let candidates: Vec<String> = self
            .tableau
            .nonbasic()
            .into_iter()
            .filter(|v| !taboo.contains(v))
            .collect();
        let row = self.tableau.row_for_basic(exiting)?;
        let ratios = self.tableau.ratio_candidates(row, &candidates)?;
        debug!(?ratios, exiting, "cleanup candidates");
        let eligible: Vec<(String, Number)> = ratios
            .into_iter()
            .filter(|(_, r)| !r.is_negative())
            .collect();
        let Some((entering, _)) = first_extreme(&eligible, false).cloned() else {
            return Ok(false);
        };
        debug!(entering = %entering, exiting, "cleanup pivot");
        self.pivot(&entering, exiting)?;
        Ok(true)
    }

    pub(super) fn record(&mut self, event: Event) {
        self.trace.record(self.phase, event, &self.tableau);
    }
}
