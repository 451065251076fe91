//! Plain-text rendering of expressions, models and tableaux.

pub mod expr;
pub mod model;
pub mod tableau;

pub use expr::render;
pub use tableau::{TableauFormat, dictionary, tableau_grid};
