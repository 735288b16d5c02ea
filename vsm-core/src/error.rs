//! The error type shared across the whole aerodynamic engine.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while configuring, building or running the aerodynamic model.
///
/// Convergence problems are deliberately *not* a variant here: a solve that does not converge
/// within `max_iterations` is not a failure, it is a [`crate::solver::ConvergenceWarning`]
/// carried alongside the last iterate on the success path. See [`crate::solver::SolveOutcome`].
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("interpolation error: {0}")]
    Interpolation(String),

    #[error("non-finite state encountered: {0}")]
    NonFiniteState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
