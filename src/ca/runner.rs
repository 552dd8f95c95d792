//! Calibration and the compressed annealing loop.

use super::config::CaConfig;
use super::types::CaProblem;
use crate::error::{Error, Result};
use crate::progress::{Engine, Progress};
use crate::random::rng_from_seed;
use crate::sa::acceptance_probability;
use rand::Rng;
use tracing::{debug, info, trace, warn};

/// Temperature and pressure scales derived from trial perturbations.
///
/// A calibration depends only on the problem, the initial candidate and
/// the configuration, so it can be computed once and reused across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    pub max_temperature: f64,
    pub max_pressure: f64,
}

/// Result of a Compressed Annealing run.
#[derive(Debug, Clone)]
pub struct CaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Penalty of the best solution.
    pub best_penalty: f64,

    /// Number of temperature steps performed.
    pub temperature_steps: usize,

    /// Total Metropolis trials across all temperature steps.
    pub iterations: usize,

    /// Number of accepted moves.
    pub accepted_moves: usize,

    /// Temperature during the last step.
    pub final_temperature: f64,

    /// Pressure during the last step.
    pub final_pressure: f64,

    /// The calibration the run started from.
    pub calibration: Calibration,
}

/// Executes the Compressed Annealing algorithm.
pub struct CaRunner;

impl CaRunner {
    /// Calibrates and runs from `initial`, seeding the generator from the
    /// config.
    pub fn run<P: CaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &CaConfig,
    ) -> Result<CaResult<P::Solution>> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, initial, config, &mut rng)
    }

    /// Calibrates and runs from `initial` drawing all randomness from `rng`.
    pub fn run_with_rng<P: CaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &CaConfig,
        rng: &mut R,
    ) -> Result<CaResult<P::Solution>> {
        let calibration = Self::calibrate_with_rng(problem, &initial, config, rng)?;
        Self::run_calibrated(problem, initial, config, &calibration, rng)
    }

    /// Derives the maximum temperature and pressure for `initial`.
    pub fn calibrate<P: CaProblem>(
        problem: &P,
        initial: &P::Solution,
        config: &CaConfig,
    ) -> Result<Calibration> {
        let mut rng = rng_from_seed(config.seed);
        Self::calibrate_with_rng(problem, initial, config, &mut rng)
    }

    /// Derives the maximum temperature and pressure for `initial`.
    ///
    /// `2 * trial_neighbor_pairs` pairs of neighbors of `initial` are
    /// drawn. The mean absolute energy difference `dv` within a pair sets
    /// `max_temperature = dv / ln(1 / acceptance_ratio)`. Each infeasible
    /// neighbor bounds the pressure at which its penalty term would make up
    /// `pressure_cap_ratio` of its energy; the largest bound becomes
    /// `max_pressure`.
    ///
    /// The temperature is then checked with `trial_iterations` Metropolis
    /// trials and raised by half until the observed acceptance reaches
    /// `acceptance_ratio`, failing with [`Error::CalibrationFailed`] after
    /// `max_calibration_attempts` tries.
    pub fn calibrate_with_rng<P: CaProblem, R: Rng>(
        problem: &P,
        initial: &P::Solution,
        config: &CaConfig,
        rng: &mut R,
    ) -> Result<Calibration> {
        config.validate()?;

        let trials = 2 * config.trial_neighbor_pairs;
        let cap = config.pressure_cap_ratio / (1.0 - config.pressure_cap_ratio);
        let mut spread = 0.0;
        let mut max_pressure = config.initial_pressure;

        for _ in 0..trials {
            let first = problem.neighbor(initial, rng);
            let second = problem.neighbor(initial, rng);
            let scored = [
                (problem.cost(&first), problem.penalty(&first)),
                (problem.cost(&second), problem.penalty(&second)),
            ];

            let [(c1, p1), (c2, p2)] = scored;
            spread += (energy(c2, p2, config.initial_pressure)
                - energy(c1, p1, config.initial_pressure))
            .abs();

            for (cost, penalty) in scored {
                if penalty > 0.0 {
                    max_pressure = f64::max(max_pressure, cost / penalty * cap);
                }
            }
        }

        let dv = spread / trials as f64;
        let mut max_temperature = if dv > 0.0 {
            dv / (1.0 / config.acceptance_ratio).ln()
        } else {
            1.0
        };
        debug!(dv, max_temperature, max_pressure, "energy spread sampled");

        let mut attempts = 0;
        loop {
            problem.on_progress(
                &Progress::new(Engine::Calibration, attempts)
                    .temperature(max_temperature)
                    .pressure(config.initial_pressure),
            );
            attempts += 1;

            let acceptance = Self::trial_acceptance(problem, initial, config, max_temperature, rng);
            if acceptance >= config.acceptance_ratio {
                info!(
                    max_temperature,
                    max_pressure, acceptance, attempts, "calibration finished"
                );
                return Ok(Calibration {
                    max_temperature,
                    max_pressure,
                });
            }

            if attempts >= config.max_calibration_attempts {
                return Err(Error::CalibrationFailed {
                    attempts,
                    max_temperature,
                    acceptance,
                });
            }

            warn!(
                attempts,
                acceptance,
                max_temperature,
                target = config.acceptance_ratio,
                "acceptance below target, raising max temperature"
            );
            max_temperature *= 1.5;
        }
    }

    /// Fraction of accepted moves in a Metropolis walk from `initial`.
    fn trial_acceptance<P: CaProblem, R: Rng>(
        problem: &P,
        initial: &P::Solution,
        config: &CaConfig,
        temperature: f64,
        rng: &mut R,
    ) -> f64 {
        let pressure = config.initial_pressure;
        let mut current = initial.clone();
        let mut current_energy =
            energy(problem.cost(&current), problem.penalty(&current), pressure);
        let mut accepted = 0usize;

        for _ in 0..config.trial_iterations {
            let candidate = problem.neighbor(&current, rng);
            let candidate_energy =
                energy(problem.cost(&candidate), problem.penalty(&candidate), pressure);

            if acceptance_probability(current_energy, candidate_energy, temperature)
                > rng.random::<f64>()
            {
                current = candidate;
                current_energy = candidate_energy;
                accepted += 1;
            }
        }

        accepted as f64 / config.trial_iterations as f64
    }

    /// Runs the annealing loop from an existing calibration.
    ///
    /// Each temperature step performs `iterations_per_temperature`
    /// Metropolis trials on the energy `cost + pressure * penalty`. A
    /// candidate replaces the best only if its penalty is no worse and its
    /// cost is strictly lower. The run stops once at least
    /// `minimum_temperature_changes` steps have passed and the best has been
    /// idle for `idle_temperature_changes` steps.
    pub fn run_calibrated<P: CaProblem, R: Rng>(
        problem: &P,
        initial: P::Solution,
        config: &CaConfig,
        calibration: &Calibration,
        rng: &mut R,
    ) -> Result<CaResult<P::Solution>> {
        config.validate()?;

        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let mut current_penalty = problem.penalty(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut best_penalty = current_penalty;

        let mut temperature = calibration.max_temperature;
        let mut pressure = config.initial_pressure;
        let mut step = 0usize;
        let mut idle = 0usize;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;

        info!(
            initial_cost = current_cost,
            initial_penalty = current_penalty,
            max_temperature = calibration.max_temperature,
            max_pressure = calibration.max_pressure,
            "compressed annealing started"
        );

        loop {
            trace!(step, temperature, pressure, best_cost, best_penalty, "ca step");
            problem.on_progress(
                &Progress::new(Engine::CompressedAnnealing, step)
                    .temperature(temperature)
                    .pressure(pressure)
                    .best(&best)
                    .cost(best_cost)
                    .penalty(best_penalty),
            );

            for _ in 0..config.iterations_per_temperature {
                let candidate = problem.neighbor(&current, rng);
                let candidate_cost = problem.cost(&candidate);
                let candidate_penalty = problem.penalty(&candidate);

                let current_energy = energy(current_cost, current_penalty, pressure);
                let candidate_energy = energy(candidate_cost, candidate_penalty, pressure);

                if acceptance_probability(current_energy, candidate_energy, temperature)
                    > rng.random::<f64>()
                {
                    current = candidate;
                    current_cost = candidate_cost;
                    current_penalty = candidate_penalty;
                    accepted_moves += 1;
                }
                iterations += 1;

                if current_penalty <= best_penalty && current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    best_penalty = current_penalty;
                    idle = 0;
                    debug!(best_cost, best_penalty, step, "new best");
                }
            }

            if step >= config.minimum_temperature_changes
                && idle >= config.idle_temperature_changes
            {
                break;
            }

            temperature *= 1.0 - config.cooling_rate;
            pressure = pressure_schedule(
                config.initial_pressure,
                calibration.max_pressure,
                config.compression_rate,
                step,
            );
            step += 1;
            idle += 1;
        }

        info!(
            best_cost,
            best_penalty,
            steps = step + 1,
            final_temperature = temperature,
            "compressed annealing finished"
        );

        Ok(CaResult {
            best,
            best_cost,
            best_penalty,
            temperature_steps: step + 1,
            iterations,
            accepted_moves,
            final_temperature: temperature,
            final_pressure: pressure,
            calibration: *calibration,
        })
    }
}

fn energy(cost: f64, penalty: f64, pressure: f64) -> f64 {
    cost + pressure * penalty
}

/// Pressure after temperature step `step`; approaches `max` exponentially.
fn pressure_schedule(initial: f64, max: f64, rate: f64, step: usize) -> f64 {
    if max <= initial {
        return initial;
    }
    max * (1.0 - ((max - initial) / max) * (-rate * step as f64).exp())
}
