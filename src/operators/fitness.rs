//! Fitness functions for the genetic algorithm. Higher is fitter.

use super::{lookup, Heuristic, Penalty, Role};
use crate::error::Result;
use crate::geometry::Point;
use crate::route::RouteModel;

/// What a fitness function may measure about a route.
///
/// In the time-windowed variant the [`objective`](Evaluation::objective)
/// blends travel cost and penalty equally; otherwise it is the plain cost.
#[derive(Clone, Copy)]
pub struct Evaluation<'a> {
    model: RouteModel<'a>,
    penalty: Option<&'a dyn Penalty>,
    heuristic: Option<&'a dyn Heuristic>,
}

impl<'a> Evaluation<'a> {
    pub fn new(model: RouteModel<'a>) -> Self {
        Self {
            model,
            penalty: None,
            heuristic: None,
        }
    }

    pub fn with_penalty(mut self, penalty: Option<&'a dyn Penalty>) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Option<&'a dyn Heuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn model(&self) -> &RouteModel<'a> {
        &self.model
    }

    pub fn cost(&self, route: &[Point]) -> f64 {
        self.model.cost(route)
    }

    /// Penalty of the route, zero without a penalty operator.
    pub fn penalty(&self, route: &[Point]) -> f64 {
        self.penalty
            .map_or(0.0, |penalty| penalty.penalty(route, &self.model))
    }

    /// The quantity fitness functions divide by.
    pub fn objective(&self, route: &[Point]) -> f64 {
        let cost = self.cost(route);
        if self.model.is_windowed() {
            0.5 * cost + 0.5 * self.penalty(route)
        } else {
            cost
        }
    }

    /// Heuristic estimate of the route, zero without a heuristic operator.
    pub fn heuristic(&self, route: &[Point]) -> f64 {
        self.heuristic
            .map_or(0.0, |heuristic| heuristic.estimate(route, self.model.metric()))
    }
}

/// Scores an individual. Must be a pure function of the route's contents.
pub trait Fitness: Send + Sync {
    fn fitness(&self, route: &[Point], evaluation: &Evaluation<'_>) -> f64;

    /// Roles this fitness function reads through the evaluation.
    fn requires(&self) -> &'static [Role] {
        &[]
    }
}

impl<F> Fitness for F
where
    F: Fn(&[Point], &Evaluation<'_>) -> f64 + Send + Sync,
{
    fn fitness(&self, route: &[Point], evaluation: &Evaluation<'_>) -> f64 {
        self(route, evaluation)
    }
}

/// Built-in fitness functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessKind {
    /// `1 / c`
    InverseCost,
    /// `(v² − v + 1) / c` with `v` the number of route edges.
    UnweightedMst,
    /// `heuristic(route) / c`; needs a heuristic operator.
    WeightedMst,
}

impl FitnessKind {
    pub const NAMES: &'static [&'static str] = &["inverse-cost", "unweighted-mst", "weighted-mst"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Fitness,
            name,
            &[
                ("inverse-cost", FitnessKind::InverseCost),
                ("unweighted-mst", FitnessKind::UnweightedMst),
                ("weighted-mst", FitnessKind::WeightedMst),
            ],
        )
    }
}

impl Fitness for FitnessKind {
    fn fitness(&self, route: &[Point], evaluation: &Evaluation<'_>) -> f64 {
        let c = evaluation.objective(route);
        match self {
            FitnessKind::InverseCost => 1.0 / c,
            FitnessKind::UnweightedMst => {
                let v = route.len().saturating_sub(1) as f64;
                (v * v - v + 1.0) / c
            }
            FitnessKind::WeightedMst => evaluation.heuristic(route) / c,
        }
    }

    fn requires(&self) -> &'static [Role] {
        match self {
            FitnessKind::WeightedMst => &[Role::Heuristic],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{HeuristicKind, MetricKind, PenaltyKind, TimeWindowTable, Window};

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_plain_fitness_values() {
        let model = RouteModel::plain(&MetricKind::Euclidean);
        let eval = Evaluation::new(model).with_heuristic(Some(&HeuristicKind::Kruskal));
        let route = square();

        assert!((FitnessKind::InverseCost.fitness(&route, &eval) - 0.25).abs() < 1e-12);
        // v = 4 edges: (16 - 4 + 1) / 4
        assert!((FitnessKind::UnweightedMst.fitness(&route, &eval) - 13.0 / 4.0).abs() < 1e-12);
        // MST of the unit square is 3
        assert!((FitnessKind::WeightedMst.fitness(&route, &eval) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_windowed_objective_blends_penalty() {
        let mut table = TimeWindowTable::new();
        table.insert(Point::new(1.0, 0.0), Window::new(0.0, 0.5, 0.0));
        let model = RouteModel::windowed(&MetricKind::Euclidean, &table, &table);
        let eval = Evaluation::new(model).with_penalty(Some(&PenaltyKind::Lateness));
        let route = square();

        // arrival at (1, 0) is 1.0, window closes at 0.5
        assert!((eval.penalty(&route) - 0.5).abs() < 1e-12);
        assert!((eval.objective(&route) - (0.5 * 4.0 + 0.5 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_requirements() {
        assert_eq!(FitnessKind::WeightedMst.requires(), &[Role::Heuristic]);
        assert!(FitnessKind::InverseCost.requires().is_empty());
    }
}
