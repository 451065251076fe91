use thiserror::Error;

pub type Result<T> = std::result::Result<T, LpError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LpError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid non-linear expression: {0}")]
    NonLinear(String),
    #[error("type error: {0}")]
    Type(String),
    #[error("invalid objective: {0}")]
    Objective(String),
    #[error("invalid model: {0}")]
    Model(String),
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("indeterminate form: {0}")]
    Indeterminate(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    #[error("pivot limit of {0} reached")]
    IterationLimit(usize),
    #[error("invalid configuration: {0}")]
    Config(String),
}
