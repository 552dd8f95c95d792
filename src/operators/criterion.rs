//! Insertion criteria for convex-hull construction.
//!
//! A criterion scores inserting `candidate` between the consecutive route
//! points `from` and `to`. The highest score wins.

use super::{lookup, Metric, Role};
use crate::error::Result;
use crate::geometry::Point;

pub trait Criterion: Send + Sync {
    fn score(&self, from: &Point, candidate: &Point, to: &Point, metric: &dyn Metric) -> f64;
}

impl<F> Criterion for F
where
    F: Fn(&Point, &Point, &Point, &dyn Metric) -> f64 + Send + Sync,
{
    fn score(&self, from: &Point, candidate: &Point, to: &Point, metric: &dyn Metric) -> f64 {
        self(from, candidate, to, metric)
    }
}

/// Built-in insertion criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CriterionKind {
    /// Angle in degrees `from–candidate–to`, in `[0, 180]`. A straight
    /// angle means the candidate sits on the edge and deviates least.
    Angle,
    /// `d(from, to) / (d(from, candidate) + d(candidate, to))`, the ratio of
    /// the replaced edge to the detour. Equals 1 for a point on the edge.
    Eccentricity,
}

impl CriterionKind {
    pub const NAMES: &'static [&'static str] = &["angle", "eccentricity"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Criterion,
            name,
            &[
                ("angle", CriterionKind::Angle),
                ("eccentricity", CriterionKind::Eccentricity),
            ],
        )
    }
}

impl Criterion for CriterionKind {
    fn score(&self, from: &Point, candidate: &Point, to: &Point, metric: &dyn Metric) -> f64 {
        match self {
            CriterionKind::Angle => {
                let towards_from = (from.y - candidate.y).atan2(from.x - candidate.x);
                let towards_to = (to.y - candidate.y).atan2(to.x - candidate.x);
                let sweep = (towards_from - towards_to).to_degrees().rem_euclid(360.0);
                if sweep > 180.0 {
                    360.0 - sweep
                } else {
                    sweep
                }
            }
            CriterionKind::Eccentricity => {
                let detour = metric.distance(from, candidate) + metric.distance(candidate, to);
                if detour == 0.0 {
                    return f64::NEG_INFINITY;
                }
                metric.distance(from, to) / detour
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::MetricKind;

    const M: MetricKind = MetricKind::Euclidean;

    #[test]
    fn test_angle() {
        let a = Point::new(0.0, 0.0);
        let c = Point::new(2.0, 0.0);

        let right = CriterionKind::Angle.score(&a, &Point::new(1.0, 1.0), &c, &M);
        assert!((right - 90.0).abs() < 1e-9);

        let flat = CriterionKind::Angle.score(&a, &Point::new(1.0, 0.0), &c, &M);
        assert!((flat - 180.0).abs() < 1e-9);

        // orientation of the edge does not matter
        let reversed = CriterionKind::Angle.score(&c, &Point::new(1.0, 1.0), &a, &M);
        assert!((reversed - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_eccentricity_prefers_near_edge() {
        let a = Point::new(0.0, 0.0);
        let c = Point::new(4.0, 0.0);

        let near = CriterionKind::Eccentricity.score(&a, &Point::new(2.0, 0.5), &c, &M);
        let far = CriterionKind::Eccentricity.score(&a, &Point::new(2.0, 3.0), &c, &M);
        let on = CriterionKind::Eccentricity.score(&a, &Point::new(1.0, 0.0), &c, &M);

        assert!(near > far);
        assert!((on - 1.0).abs() < 1e-12);
    }
}
