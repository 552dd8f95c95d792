//! Compressed annealing configuration.

use crate::error::{Error, Result};

/// Configuration for the Compressed Annealing engine.
///
/// Temperature is derived by calibration and decays by `1 - cooling_rate`
/// per temperature step. Pressure starts at `initial_pressure` and
/// approaches the calibrated maximum at `compression_rate`.
///
/// # Examples
///
/// ```
/// use u_routeheur::ca::CaConfig;
///
/// let config = CaConfig::default()
///     .with_iterations_per_temperature(200)
///     .with_trial_neighbor_pairs(500)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaConfig {
    /// Fractional temperature drop per temperature step, in (0, 1).
    pub cooling_rate: f64,

    /// Target fraction of accepted moves at the calibrated temperature.
    pub acceptance_ratio: f64,

    /// Penalty weight at the first temperature step.
    pub initial_pressure: f64,

    /// Exponential rate at which pressure approaches its maximum.
    pub compression_rate: f64,

    /// Share of a candidate's energy the penalty term may reach at
    /// maximum pressure, in (0, 1).
    pub pressure_cap_ratio: f64,

    /// Metropolis trials per temperature step.
    pub iterations_per_temperature: usize,

    /// Temperature steps before the run may stop.
    pub minimum_temperature_changes: usize,

    /// Temperature steps without a new best before the run may stop.
    pub idle_temperature_changes: usize,

    /// Metropolis trials per calibration attempt.
    pub trial_iterations: usize,

    /// Neighbor pairs sampled (twice over) to estimate the energy spread.
    pub trial_neighbor_pairs: usize,

    /// Temperature rescalings before calibration gives up.
    pub max_calibration_attempts: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for CaConfig {
    fn default() -> Self {
        Self {
            cooling_rate: 0.05,
            acceptance_ratio: 0.94,
            initial_pressure: 0.0,
            compression_rate: 0.06,
            pressure_cap_ratio: 0.9999,
            iterations_per_temperature: 1000,
            minimum_temperature_changes: 100,
            idle_temperature_changes: 75,
            trial_iterations: 30_000,
            trial_neighbor_pairs: 5000,
            max_calibration_attempts: 50,
            seed: None,
        }
    }
}

impl CaConfig {
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_acceptance_ratio(mut self, ratio: f64) -> Self {
        self.acceptance_ratio = ratio;
        self
    }

    pub fn with_initial_pressure(mut self, pressure: f64) -> Self {
        self.initial_pressure = pressure;
        self
    }

    pub fn with_compression_rate(mut self, rate: f64) -> Self {
        self.compression_rate = rate;
        self
    }

    pub fn with_pressure_cap_ratio(mut self, ratio: f64) -> Self {
        self.pressure_cap_ratio = ratio;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_minimum_temperature_changes(mut self, n: usize) -> Self {
        self.minimum_temperature_changes = n;
        self
    }

    pub fn with_idle_temperature_changes(mut self, n: usize) -> Self {
        self.idle_temperature_changes = n;
        self
    }

    pub fn with_trial_iterations(mut self, n: usize) -> Self {
        self.trial_iterations = n;
        self
    }

    pub fn with_trial_neighbor_pairs(mut self, n: usize) -> Self {
        self.trial_neighbor_pairs = n;
        self
    }

    pub fn with_max_calibration_attempts(mut self, n: usize) -> Self {
        self.max_calibration_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let unit_rates = [
            ("cooling_rate", self.cooling_rate),
            ("acceptance_ratio", self.acceptance_ratio),
            ("pressure_cap_ratio", self.pressure_cap_ratio),
        ];
        for (name, value) in unit_rates {
            if !(value > 0.0 && value < 1.0) {
                return Err(Error::invalid(format!(
                    "{name} must be in (0, 1), got {value}"
                )));
            }
        }
        if !(self.compression_rate > 0.0) || !self.compression_rate.is_finite() {
            return Err(Error::invalid(format!(
                "compression_rate must be positive, got {}",
                self.compression_rate
            )));
        }
        if !(self.initial_pressure >= 0.0) || !self.initial_pressure.is_finite() {
            return Err(Error::invalid(format!(
                "initial_pressure must be non-negative, got {}",
                self.initial_pressure
            )));
        }

        let counts = [
            ("iterations_per_temperature", self.iterations_per_temperature),
            ("trial_iterations", self.trial_iterations),
            ("trial_neighbor_pairs", self.trial_neighbor_pairs),
            ("max_calibration_attempts", self.max_calibration_attempts),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(Error::invalid(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CaConfig::default();
        assert!((config.cooling_rate - 0.05).abs() < 1e-12);
        assert!((config.acceptance_ratio - 0.94).abs() < 1e-12);
        assert_eq!(config.initial_pressure, 0.0);
        assert!((config.compression_rate - 0.06).abs() < 1e-12);
        assert!((config.pressure_cap_ratio - 0.9999).abs() < 1e-12);
        assert_eq!(config.iterations_per_temperature, 1000);
        assert_eq!(config.minimum_temperature_changes, 100);
        assert_eq!(config.idle_temperature_changes, 75);
        assert_eq!(config.trial_iterations, 30_000);
        assert_eq!(config.trial_neighbor_pairs, 5000);
        assert_eq!(config.max_calibration_attempts, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rates() {
        assert!(CaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(CaConfig::default().with_acceptance_ratio(0.0).validate().is_err());
        assert!(CaConfig::default()
            .with_pressure_cap_ratio(1.0)
            .validate()
            .is_err());
        assert!(CaConfig::default()
            .with_compression_rate(-0.1)
            .validate()
            .is_err());
        assert!(CaConfig::default()
            .with_initial_pressure(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_counts() {
        let err = CaConfig::default()
            .with_trial_iterations(0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfiguration("trial_iterations must be at least 1".into())
        );
        assert!(CaConfig::default()
            .with_max_calibration_attempts(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_idle_steps_allowed() {
        let config = CaConfig::default()
            .with_minimum_temperature_changes(0)
            .with_idle_temperature_changes(0);
        assert!(config.validate().is_ok());
    }
}
