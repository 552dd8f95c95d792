//! Solver configuration.

use crate::ca::CaConfig;
use crate::error::{Error, Result};
use crate::ga::GaConfig;
use crate::sa::SaConfig;

/// Hyperparameters of every strategy a [`TravellingSalesman`] can run.
///
/// [`TravellingSalesman`]: super::TravellingSalesman
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TspConfig {
    pub sa: SaConfig,
    pub ca: CaConfig,
    pub ga: GaConfig,

    /// Minimum cost decrease for a 2-opt reversal to count as improving.
    pub two_opt_epsilon: f64,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            sa: SaConfig::default(),
            ca: CaConfig::default(),
            ga: GaConfig::default(),
            two_opt_epsilon: 1e-9,
        }
    }
}

impl TspConfig {
    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    pub fn with_ca(mut self, ca: CaConfig) -> Self {
        self.ca = ca;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_two_opt_epsilon(mut self, epsilon: f64) -> Self {
        self.two_opt_epsilon = epsilon;
        self
    }

    /// Seeds all three engines at once.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sa.seed = Some(seed);
        self.ca.seed = Some(seed);
        self.ga.seed = Some(seed);
        self
    }

    /// Validates every engine configuration.
    pub fn validate(&self) -> Result<()> {
        self.sa.validate()?;
        self.ca.validate()?;
        self.ga.validate()?;
        if !(self.two_opt_epsilon >= 0.0) || !self.two_opt_epsilon.is_finite() {
            return Err(Error::invalid(format!(
                "two_opt_epsilon must be a non-negative number, got {}",
                self.two_opt_epsilon
            )));
        }
        Ok(())
    }
}
