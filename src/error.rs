//! Crate-wide error type.

use crate::operators::Role;
use thiserror::Error;

/// Errors raised while assembling a solver or running a search.
///
/// Every failure is local to a single call; nothing is retried or rolled
/// back because no state outlives the call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A role was given a name that is not in its catalog.
    #[error("unknown {role} operator `{name}` (expected one of: {})", .role.catalog().join(", "))]
    UnknownOperator { role: Role, name: String },

    /// A role required by the requested strategy was never supplied.
    #[error("{role} operator is required but was not supplied")]
    UnresolvedOperator { role: Role },

    /// A numeric hyperparameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Too few points for the requested heuristic.
    #[error("{heuristic} needs at least {required} distinct points, got {found}")]
    DegenerateInput {
        heuristic: &'static str,
        required: usize,
        found: usize,
    },

    /// Compressed annealing could not reach the target acceptance ratio.
    #[error(
        "calibration failed after {attempts} attempts: acceptance {acceptance:.4} \
         at max temperature {max_temperature:.3}"
    )]
    CalibrationFailed {
        attempts: usize,
        max_temperature: f64,
        acceptance: f64,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
