//! Parent selection for the genetic algorithm.
//!
//! Selectors receive the fitness of a population already sorted fittest
//! first (higher fitness is better) and return the index of one parent.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::{lookup, Role};
use crate::error::Result;
use rand::{Rng, RngCore};

/// Chooses a parent index from a population sorted by descending fitness.
///
/// `fitness` is never empty.
pub trait Selection: Send + Sync {
    fn select(&self, fitness: &[f64], rng: &mut dyn RngCore) -> usize;
}

impl<F> Selection for F
where
    F: Fn(&[f64], &mut dyn RngCore) -> usize + Send + Sync,
{
    fn select(&self, fitness: &[f64], rng: &mut dyn RngCore) -> usize {
        self(fitness, rng)
    }
}

/// Built-in selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionKind {
    /// Uniform pick from the fitter half of the population.
    #[default]
    RandomTopHalf,

    /// Tournament selection: draw `k` individuals uniformly, keep the fittest.
    ///
    /// Higher `k` means stronger selection pressure. `"tournament"`
    /// resolves to `Tournament(3)`.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),
}

impl SelectionKind {
    pub const NAMES: &'static [&'static str] = &["random-top-half", "tournament"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Select,
            name,
            &[
                ("random-top-half", SelectionKind::RandomTopHalf),
                ("tournament", SelectionKind::Tournament(3)),
            ],
        )
    }
}

impl Selection for SelectionKind {
    fn select(&self, fitness: &[f64], rng: &mut dyn RngCore) -> usize {
        let n = fitness.len();
        if n <= 1 {
            return 0;
        }
        match *self {
            SelectionKind::RandomTopHalf => rng.random_range(0..n / 2),
            SelectionKind::Tournament(k) => tournament(fitness, k, rng),
        }
    }
}

/// Tournament selection: pick k random individuals, return the fittest.
fn tournament(fitness: &[f64], k: usize, rng: &mut dyn RngCore) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}
