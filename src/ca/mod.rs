//! Compressed Annealing (CA).
//!
//! Simulated annealing for constrained problems. Constraint violations are
//! priced by a penalty whose weight, the pressure, rises over the run while
//! the temperature falls, so infeasible regions are crossed early and
//! abandoned later. The starting temperature and the pressure ceiling are
//! calibrated from trial perturbations of the initial candidate.
//!
//! # References
//!
//! - Ohlmann & Thomas (2007), "A Compressed-Annealing Heuristic for the
//!   Traveling Salesman Problem with Time Windows", INFORMS J. Computing 19(1)

mod config;
mod runner;
mod types;

pub use config::CaConfig;
pub use runner::{CaResult, CaRunner, Calibration};
pub use types::CaProblem;
