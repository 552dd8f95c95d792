//! Structured progress records emitted by the search engines.
//!
//! Engines hand one [`Progress`] per iteration (or generation, or
//! temperature step) to their problem's `on_progress` hook. The record
//! borrows the current best candidate, so sinks that want to keep it must
//! clone it.

/// Which engine produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    SimulatedAnnealing,
    /// The trial phase of compressed annealing.
    Calibration,
    CompressedAnnealing,
    GeneticAlgorithm,
}

/// One progress record.
#[derive(Debug, Clone)]
pub struct Progress<'a, S> {
    pub engine: Engine,
    /// Iteration, temperature step, or generation index.
    pub iteration: usize,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    /// Best candidate so far, if any has been scored yet.
    pub best: Option<&'a S>,
    pub best_cost: Option<f64>,
    pub best_penalty: Option<f64>,
    pub best_fitness: Option<f64>,
}

impl<'a, S> Progress<'a, S> {
    pub(crate) fn new(engine: Engine, iteration: usize) -> Self {
        Self {
            engine,
            iteration,
            temperature: None,
            pressure: None,
            best: None,
            best_cost: None,
            best_penalty: None,
            best_fitness: None,
        }
    }

    pub(crate) fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub(crate) fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub(crate) fn best(mut self, best: &'a S) -> Self {
        self.best = Some(best);
        self
    }

    pub(crate) fn cost(mut self, cost: f64) -> Self {
        self.best_cost = Some(cost);
        self
    }

    pub(crate) fn penalty(mut self, penalty: f64) -> Self {
        self.best_penalty = Some(penalty);
        self
    }

    pub(crate) fn fitness(mut self, fitness: f64) -> Self {
        self.best_fitness = Some(fitness);
        self
    }
}

/// Receives progress records, e.g. for plotting or external logging.
pub trait ProgressSink<S>: Send + Sync {
    fn record(&self, progress: &Progress<'_, S>);
}

impl<S, F> ProgressSink<S> for F
where
    F: Fn(&Progress<'_, S>) + Send + Sync,
{
    fn record(&self, progress: &Progress<'_, S>) {
        self(progress)
    }
}
