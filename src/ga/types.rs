//! Core trait definition for the GA framework.
//!
//! [`GaProblem`] is the contract between the generic GA engine and
//! domain-specific problem implementations.

use crate::progress::Progress;
use rand::Rng;
use std::hash::Hash;

/// Defines a GA optimization problem.
///
/// The engine evolves a population grown from a single seed individual.
/// It covers:
///
/// 1. **Evaluation**: How to compute fitness (higher is better)
/// 2. **Selection**: How to pick a parent from the sorted population
/// 3. **Crossover**: How to recombine two parents into one child
/// 4. **Mutation**: How to perturb an individual
///
/// # Fitness Memoization
///
/// Individuals are hashed so that duplicates within a generation are
/// evaluated once. [`fitness`](GaProblem::fitness) must therefore depend
/// only on the individual's contents.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate
/// individuals in parallel using rayon (feature `parallel`).
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Clone + Eq + Hash + Send + Sync;

    /// Evaluates an individual. Higher fitness is better.
    fn fitness(&self, individual: &Self::Individual) -> f64;

    /// Picks a parent.
    ///
    /// `fitness` holds the scores of the current population sorted in
    /// descending order; the returned value must be an index into it. An
    /// index past the end is a bug in the selector and panics.
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize;

    /// Recombines two parents into one child.
    fn crossover<R: Rng>(
        &self,
        father: &Self::Individual,
        mother: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Called once per generation after the population has been ranked.
    ///
    /// The default implementation is a no-op.
    fn on_progress(&self, _progress: &Progress<'_, Self::Individual>) {}
}
