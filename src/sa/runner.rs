//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::Result;
use crate::progress::{Engine, Progress};
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info, trace};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of times a new best reset the annealing clock.
    pub improvements: usize,

    /// Best cost at the start and after every improvement.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance probability for moving from `current` to
/// `candidate` energy at `temperature`.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: f64) -> f64 {
    if candidate < current {
        1.0
    } else {
        ((current - candidate) / temperature).exp()
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from `initial`, seeding the generator from the config.
    pub fn run<P: SaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, initial, config, &mut rng)
    }

    /// Runs SA from `initial` drawing all randomness from `rng`.
    ///
    /// The loop runs while fewer than `max_iterations` iterations have
    /// passed since the last improvement and the temperature is above 1.
    /// A candidate is accepted when it is cheaper, or otherwise with
    /// probability `exp((current - candidate) / T)`.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;

        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.max_temperature;
        let mut iteration = 0usize;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improvements = 0usize;
        let mut cost_history = vec![best_cost];

        info!(
            initial_cost = current_cost,
            max_temperature = config.max_temperature,
            "simulated annealing started"
        );

        while iteration < config.max_iterations && temperature > 1.0 {
            trace!(iteration, temperature, best_cost, "sa iteration");
            problem.on_progress(
                &Progress::new(Engine::SimulatedAnnealing, iteration)
                    .temperature(temperature)
                    .best(&best)
                    .cost(best_cost),
            );

            let candidate = problem.neighbor(&current, rng);
            let candidate_cost = problem.cost(&candidate);

            if acceptance_probability(current_cost, candidate_cost, temperature)
                > rng.random::<f64>()
            {
                current = candidate;
                current_cost = candidate_cost;
                accepted_moves += 1;
            }
            total_iterations += 1;

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                improvements += 1;
                cost_history.push(best_cost);
                debug!(best_cost, temperature, "new best, resetting temperature");

                temperature = config.max_temperature;
                iteration = 0;
            } else {
                iteration += 1;
                temperature *= 1.0 - config.cooling_rate;
            }
        }

        info!(
            best_cost,
            iterations = total_iterations,
            final_temperature = temperature,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improvements,
            cost_history,
        })
    }
}
