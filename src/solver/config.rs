//! Solver configuration types.

use std::str::FromStr;

use crate::error::{LpError, Result};
use crate::number::{Number, Rational};

pub const METHOD_ENV: &str = "RSIMPLEX_METHOD";
pub const BIG_M_ENV: &str = "RSIMPLEX_BIG_M";
pub const MAX_PIVOTS_ENV: &str = "RSIMPLEX_MAX_PIVOTS";

/// Strategy used to reach a first feasible basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    BigM,
    TwoPhase,
}

impl FromStr for Method {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bigm" | "big-m" => Ok(Method::BigM),
            "twophase" | "two-phase" | "2phase" => Ok(Method::TwoPhase),
            other => Err(LpError::Config(format!("unknown method \"{other}\""))),
        }
    }
}

/// Weight of the artificial variables in a Big-M objective.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Penalty {
    /// Symbolic `M = inf`.
    #[default]
    Infinite,
    /// A literal `M`, which must be positive.
    Finite(Rational),
}

impl Penalty {
    /// Objective coefficient of each artificial: `-M`.
    pub fn coefficient(&self) -> Number {
        match self {
            Penalty::Infinite => Number::NegInfinity,
            Penalty::Finite(m) => -Number::Finite(m.clone()),
        }
    }
}

impl FromStr for Penalty {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "inf" {
            return Ok(Penalty::Infinite);
        }
        let m: Rational = s
            .parse()
            .map_err(|_| LpError::Config(format!("invalid penalty \"{s}\"")))?;
        if m <= Rational::from_integer(0.into()) {
            return Err(LpError::Config(format!("penalty must be positive, got {s}")));
        }
        Ok(Penalty::Finite(m))
    }
}

/// Configuration options for a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Feasibility strategy.
    pub method: Method,
    /// Big-M weight; unused by the two-phase method.
    pub penalty: Penalty,
    /// Pivots allowed before giving up with `IterationLimit`.
    pub max_pivots: usize,
    /// Record tableau snapshots in the solution trace.
    pub trace: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: Method::BigM,
            penalty: Penalty::Infinite,
            max_pivots: 1000,
            trace: true,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_max_pivots(mut self, max_pivots: usize) -> Self {
        self.max_pivots = max_pivots;
        self
    }

    /// Enable or disable tableau snapshots.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Defaults overridden by `RSIMPLEX_METHOD`, `RSIMPLEX_BIG_M` and
    /// `RSIMPLEX_MAX_PIVOTS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SolverConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(method) = lookup(METHOD_ENV) {
            config.method = method.parse()?;
        }
        if let Some(penalty) = lookup(BIG_M_ENV) {
            config.penalty = penalty.parse()?;
        }
        if let Some(pivots) = lookup(MAX_PIVOTS_ENV) {
            config.max_pivots = pivots.trim().parse().map_err(|_| {
                LpError::Config(format!("invalid {MAX_PIVOTS_ENV} \"{pivots}\""))
            })?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::new();
        assert_eq!(config.method, Method::BigM);
        assert_eq!(config.penalty, Penalty::Infinite);
        assert_eq!(config.max_pivots, 1000);
        assert!(config.trace);
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SolverConfig::new()
            .with_method(Method::TwoPhase)
            .with_penalty(Penalty::Finite(Rational::from_integer(100.into())))
            .with_max_pivots(5)
            .with_trace(false);

        assert_eq!(config.method, Method::TwoPhase);
        assert_eq!(config.penalty.coefficient(), Number::integer(-100));
        assert_eq!(config.max_pivots, 5);
        assert!(!config.trace);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = SolverConfig::from_lookup(|key| match key {
            METHOD_ENV => Some("2phase".into()),
            BIG_M_ENV => Some("1000".into()),
            MAX_PIVOTS_ENV => Some(" 42 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.method, Method::TwoPhase);
        assert_eq!(
            config.penalty,
            Penalty::Finite(Rational::from_integer(1000.into()))
        );
        assert_eq!(config.max_pivots, 42);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let bad_method = SolverConfig::from_lookup(|key| (key == METHOD_ENV).then(|| "dual".into()));
        assert!(matches!(bad_method, Err(LpError::Config(_))));

        let bad_penalty = SolverConfig::from_lookup(|key| (key == BIG_M_ENV).then(|| "-5".into()));
        assert!(matches!(bad_penalty, Err(LpError::Config(_))));

        let bad_pivots =
            SolverConfig::from_lookup(|key| (key == MAX_PIVOTS_ENV).then(|| "many".into()));
        assert!(matches!(bad_pivots, Err(LpError::Config(_))));
    }

    #[test]
    fn test_penalty_coefficient() {
        assert_eq!(Penalty::Infinite.coefficient(), Number::NegInfinity);
        assert_eq!("inf".parse::<Penalty>().unwrap(), Penalty::Infinite);
        assert_eq!(
            "3/2".parse::<Penalty>().unwrap().coefficient(),
            Number::fraction(-3, 2)
        );
    }
}
