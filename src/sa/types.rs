//! Core trait for Simulated Annealing.

use crate::progress::Progress;
use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The user implements neighbor generation and cost evaluation. The SA
/// engine handles temperature management, the Metropolis acceptance test,
/// and best tracking. The starting candidate is passed to the runner.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Examples
///
/// ```ignore
/// struct Sort;
///
/// impl SaProblem for Sort {
///     type Solution = Vec<u32>;
///
///     fn cost(&self, v: &Vec<u32>) -> f64 {
///         // number of inversions
///         let mut n = 0;
///         for i in 0..v.len() {
///             for j in i + 1..v.len() {
///                 n += (v[i] > v[j]) as usize;
///             }
///         }
///         n as f64
///     }
///
///     fn neighbor<R: Rng>(&self, v: &Vec<u32>, rng: &mut R) -> Vec<u32> {
///         let mut new = v.clone();
///         let i = rng.random_range(0..new.len());
///         let j = rng.random_range(0..new.len());
///         new.swap(i, j);
///         new
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Called once per iteration before the neighbor is drawn.
    ///
    /// The default implementation is a no-op.
    fn on_progress(&self, _progress: &Progress<'_, Self::Solution>) {}
}
