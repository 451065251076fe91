//! String-based convenience API for quick experimentation.

pub use crate::ui::{canon, canonical, norm, normalize, parse, solve, solve_with, summary};
