//! Solve status types.

/// Where a solve stands. Every status but `Unsolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Iteration has not reached a conclusion yet.
    #[default]
    Unsolved,
    /// Optimal solution found.
    Solved,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective grows without bound.
    Unbounded,
}

impl Status {
    pub fn is_solved(self) -> bool {
        matches!(self, Status::Solved)
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, Status::Infeasible)
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Status::Unbounded)
    }

    /// Check if no further pivot will be taken.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Unsolved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unsolved => "UNSOLVED",
            Status::Solved => "SOLVED",
            Status::Infeasible => "INFEASIBLE",
            Status::Unbounded => "UNBOUNDED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_unsolved() {
        assert_eq!(Status::default(), Status::Unsolved);
        assert!(!Status::default().is_terminal());
    }

    #[test]
    fn test_status_predicates() {
        assert!(Status::Solved.is_solved());
        assert!(!Status::Unbounded.is_solved());
        assert!(Status::Infeasible.is_infeasible());
        assert!(Status::Unbounded.is_unbounded());
        assert!(Status::Infeasible.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", Status::Solved), "SOLVED");
        assert_eq!(format!("{}", Status::Infeasible), "INFEASIBLE");
        assert_eq!(Status::Unbounded.as_str(), "UNBOUNDED");
    }
}
