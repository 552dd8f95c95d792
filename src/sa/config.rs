//! SA configuration.

use crate::error::{Error, Result};

/// Configuration for the Simulated Annealing engine.
///
/// Temperature starts at `max_temperature` and is multiplied by
/// `1 - cooling_rate` after every non-improving iteration. A new best
/// candidate resets both the temperature and the iteration counter.
///
/// # Examples
///
/// ```
/// use u_routeheur::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_max_temperature(1000.0)
///     .with_cooling_rate(0.01)
///     .with_max_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Starting (and reset) temperature. The run stops once T drops to 1.
    pub max_temperature: f64,

    /// Fractional temperature drop per non-improving iteration, in (0, 1).
    pub cooling_rate: f64,

    /// Iterations without a new best before stopping.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            max_temperature: 100_000.0,
            cooling_rate: 0.000625,
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_max_temperature(mut self, t: f64) -> Self {
        self.max_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_temperature > 1.0) {
            return Err(Error::invalid(format!(
                "max_temperature must be greater than 1, got {}",
                self.max_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(Error::invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
