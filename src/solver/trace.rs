//! Step-by-step record of a solve.

use std::fmt;

use crate::tableau::Tableau;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Big-M removal of artificial and negative basic variables.
    BigM,
    /// Two-phase auxiliary problem.
    PhaseOne,
    /// Two-phase original problem.
    PhaseTwo,
    /// Ordinary iteration from a feasible basis.
    Simplex,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::BigM => "Big-M method",
            Phase::PhaseOne => "Phase I",
            Phase::PhaseTwo => "Phase II",
            Phase::Simplex => "Simplex method",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Initial,
    Pivot { entering: String, exiting: String },
    ArtificialsRemoved,
    Final,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Initial => f.write_str("initial basis"),
            Event::Pivot { entering, exiting } => write!(f, "{entering} replaces {exiting}"),
            Event::ArtificialsRemoved => f.write_str("artificial variables removed"),
            Event::Final => f.write_str("final basis"),
        }
    }
}

/// Snapshot of the tableau right after `event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub event: Event,
    pub tableau: Tableau,
}

/// Ordered snapshots. A disabled trace records nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    enabled: bool,
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, phase: Phase, event: Event, tableau: &Tableau) {
        if self.enabled {
            self.steps.push(Step {
                phase,
                event,
                tableau: tableau.clone(),
            });
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn pivots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.steps.iter().filter_map(|s| match &s.event {
            Event::Pivot { entering, exiting } => Some((entering.as_str(), exiting.as_str())),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
