//! Feasibility penalties consumed by compressed annealing.

use super::{lookup, Role};
use crate::error::Result;
use crate::geometry::Point;
use crate::route::RouteModel;

/// Measures how infeasible a route is. Zero means feasible.
pub trait Penalty: Send + Sync {
    fn penalty(&self, route: &[Point], model: &RouteModel<'_>) -> f64;
}

impl<F> Penalty for F
where
    F: Fn(&[Point], &RouteModel<'_>) -> f64 + Send + Sync,
{
    fn penalty(&self, route: &[Point], model: &RouteModel<'_>) -> f64 {
        self(route, model)
    }
}

/// Built-in penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PenaltyKind {
    /// Total time-window lateness of the route model.
    Lateness,
    /// Always zero.
    None,
}

impl PenaltyKind {
    pub const NAMES: &'static [&'static str] = &["lateness", "none"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Penalty,
            name,
            &[("lateness", PenaltyKind::Lateness), ("none", PenaltyKind::None)],
        )
    }
}

impl Penalty for PenaltyKind {
    fn penalty(&self, route: &[Point], model: &RouteModel<'_>) -> f64 {
        match self {
            PenaltyKind::Lateness => model.lateness(route),
            PenaltyKind::None => 0.0,
        }
    }
}
