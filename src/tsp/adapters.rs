//! Route problems for the generic engines, backed by an operator set.

use crate::ca::CaProblem;
use crate::ga::GaProblem;
use crate::geometry::Point;
use crate::operators::{Crossover, Evaluation, Fitness, Mutation, Penalty, Selection};
use crate::progress::{Progress, ProgressSink};
use crate::route::RouteModel;
use crate::sa::SaProblem;
use rand::Rng;

/// Trajectory search over routes: SA and CA.
pub(crate) struct RouteSearch<'a> {
    pub(crate) model: RouteModel<'a>,
    pub(crate) mutation: &'a dyn Mutation,
    pub(crate) penalty: Option<&'a dyn Penalty>,
    pub(crate) progress: Option<&'a dyn ProgressSink<Vec<Point>>>,
}

impl RouteSearch<'_> {
    fn mutated<R: Rng>(&self, route: &[Point], rng: &mut R) -> Vec<Point> {
        let mut next = route.to_vec();
        self.mutation.mutate(&mut next, rng);
        next
    }

    fn report(&self, progress: &Progress<'_, Vec<Point>>) {
        if let Some(sink) = self.progress {
            sink.record(progress);
        }
    }
}

impl SaProblem for RouteSearch<'_> {
    type Solution = Vec<Point>;

    fn cost(&self, route: &Vec<Point>) -> f64 {
        self.model.cost(route)
    }

    fn neighbor<R: Rng>(&self, route: &Vec<Point>, rng: &mut R) -> Vec<Point> {
        self.mutated(route, rng)
    }

    fn on_progress(&self, progress: &Progress<'_, Vec<Point>>) {
        self.report(progress);
    }
}

impl CaProblem for RouteSearch<'_> {
    type Solution = Vec<Point>;

    fn cost(&self, route: &Vec<Point>) -> f64 {
        self.model.cost(route)
    }

    fn penalty(&self, route: &Vec<Point>) -> f64 {
        self.penalty
            .map_or(0.0, |penalty| penalty.penalty(route, &self.model))
    }

    fn neighbor<R: Rng>(&self, route: &Vec<Point>, rng: &mut R) -> Vec<Point> {
        self.mutated(route, rng)
    }

    fn on_progress(&self, progress: &Progress<'_, Vec<Point>>) {
        self.report(progress);
    }
}

/// Population search over routes: GA.
pub(crate) struct RouteEvolution<'a> {
    pub(crate) evaluation: Evaluation<'a>,
    pub(crate) mutation: &'a dyn Mutation,
    pub(crate) crossover: &'a dyn Crossover,
    pub(crate) selection: &'a dyn Selection,
    pub(crate) fitness: &'a dyn Fitness,
    pub(crate) progress: Option<&'a dyn ProgressSink<Vec<Point>>>,
}

impl GaProblem for RouteEvolution<'_> {
    type Individual = Vec<Point>;

    fn fitness(&self, route: &Vec<Point>) -> f64 {
        self.fitness.fitness(route, &self.evaluation)
    }

    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        self.selection.select(fitness, rng)
    }

    fn crossover<R: Rng>(&self, father: &Vec<Point>, mother: &Vec<Point>, rng: &mut R) -> Vec<Point> {
        self.crossover.crossover(father, mother, rng)
    }

    fn mutate<R: Rng>(&self, route: &mut Vec<Point>, rng: &mut R) {
        self.mutation.mutate(route, rng);
    }

    fn on_progress(&self, progress: &Progress<'_, Vec<Point>>) {
        if let Some(sink) = self.progress {
            sink.record(progress);
        }
    }
}
