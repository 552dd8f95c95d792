//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! seeding → evaluation → ranking → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::types::GaProblem;
use crate::error::Result;
use crate::progress::{Engine, Progress};
use crate::random::rng_from_seed;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use tracing::{debug, info, trace};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Clone> {
    /// The fittest individual seen during the entire run.
    pub best: I,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether the run stopped because `fitness_threshold` was exceeded.
    pub reached_threshold: bool,

    /// Best fitness so far at the end of each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, seed_individual, &config)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from `seed`, seeding the generator from the config.
    pub fn run<P: GaProblem>(
        problem: &P,
        seed: P::Individual,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, seed, config, &mut rng)
    }

    /// Runs the GA from `seed` drawing all randomness from `rng`.
    ///
    /// The first generation is the seed plus `population_size - 1` mutated
    /// copies of it. Every following generation is bred entirely from the
    /// previous one; the best individual is remembered rather than carried
    /// over.
    pub fn run_with_rng<P: GaProblem, R: Rng>(
        problem: &P,
        seed: P::Individual,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        // 1. Seed the population
        let mut population = Vec::with_capacity(config.population_size);
        population.push(seed.clone());
        for _ in 1..config.population_size {
            let mut clone = seed.clone();
            problem.mutate(&mut clone, rng);
            population.push(clone);
        }

        let mut best = seed;
        let mut best_fitness = f64::NEG_INFINITY;
        let mut fitness_history = Vec::with_capacity(config.max_iterations);
        let mut generations = 0;
        let mut reached_threshold = false;

        info!(
            population_size = config.population_size,
            max_iterations = config.max_iterations,
            "genetic algorithm started"
        );

        // 2. Evolutionary loop
        for generation in 0..config.max_iterations {
            generations = generation + 1;

            // Rank by fitness, fittest first
            let (ranked, fitness) = rank(problem, population);

            if fitness[0] > best_fitness {
                best = ranked[0].clone();
                best_fitness = fitness[0];
                debug!(generation, best_fitness, "new fittest individual");
            }
            fitness_history.push(best_fitness);

            trace!(generation, best_fitness, top = fitness[0], "ga generation");
            problem.on_progress(
                &Progress::new(Engine::GeneticAlgorithm, generation)
                    .best(&best)
                    .fitness(best_fitness),
            );

            if best_fitness > config.fitness_threshold {
                reached_threshold = true;
                break;
            }

            // 3. Breed successors
            population = Vec::with_capacity(ranked.len());
            for _ in 0..ranked.len() {
                let father = problem.select(&fitness, rng);
                let mother = problem.select(&fitness, rng);
                debug_assert!(
                    father < ranked.len() && mother < ranked.len(),
                    "selected parent out of range"
                );

                let mut child = problem.crossover(&ranked[father], &ranked[mother], rng);
                if rng.random::<f64>() < config.mutation_probability {
                    problem.mutate(&mut child, rng);
                }
                population.push(child);
            }
        }

        info!(
            best_fitness,
            generations, reached_threshold, "genetic algorithm finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            generations,
            reached_threshold,
            fitness_history,
        })
    }
}

/// Sorts the population by descending fitness, returning it alongside the
/// aligned fitness values.
fn rank<P: GaProblem>(
    problem: &P,
    population: Vec<P::Individual>,
) -> (Vec<P::Individual>, Vec<f64>) {
    let memo = evaluate_distinct(problem, &population);

    let mut scored: Vec<(P::Individual, f64)> = population
        .into_iter()
        .map(|individual| {
            let fitness = memo.get(&individual).copied().unwrap_or(f64::NEG_INFINITY);
            (individual, fitness)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored.into_iter().unzip()
}

/// Evaluates every distinct individual of a generation once.
fn evaluate_distinct<P: GaProblem>(
    problem: &P,
    population: &[P::Individual],
) -> FxHashMap<P::Individual, f64> {
    let mut seen = FxHashSet::default();
    let distinct: Vec<&P::Individual> = population
        .iter()
        .filter(|individual| seen.insert(*individual))
        .collect();

    #[cfg(feature = "parallel")]
    let scores: Vec<f64> = distinct
        .par_iter()
        .map(|individual| problem.fitness(individual))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let scores: Vec<f64> = distinct
        .iter()
        .map(|individual| problem.fitness(individual))
        .collect();

    distinct.into_iter().cloned().zip(scores).collect()
}

// ============================================================================
// Tests
// ============================================================================
