//! Core trait for Compressed Annealing.

use crate::progress::Progress;
use rand::Rng;

/// Defines a constrained problem for Compressed Annealing.
///
/// Constraint violations are measured by [`penalty`](CaProblem::penalty)
/// rather than forbidden. The engine weighs them by a pressure that grows
/// over the run, so infeasible candidates are explored early and squeezed
/// out later. A penalty of zero means feasible.
///
/// # References
///
/// Ohlmann & Thomas (2007), "A Compressed-Annealing Heuristic for the
/// Traveling Salesman Problem with Time Windows"
pub trait CaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Objective to minimize, excluding constraint violations.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Non-negative measure of constraint violation.
    fn penalty(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the given solution.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Called once per calibration attempt and once per temperature step.
    fn on_progress(&self, _progress: &Progress<'_, Self::Solution>) {}
}
