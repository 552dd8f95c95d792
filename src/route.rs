//! Route representation and cost accumulation.
//!
//! A route is a slice of points that starts and ends at the depot and
//! visits every other point once. The plain model sums edge distances.
//! The windowed model adds the service time of each departure point to its
//! outgoing edge and reports time-window lateness separately; combining
//! cost and lateness is left to the search strategy.

use crate::geometry::Point;
use crate::operators::{Metric, ServiceTime, TimeWindowLookup};

/// Builds the closed route `[depot] + cities + [depot]`.
pub fn close(depot: Point, cities: &[Point]) -> Vec<Point> {
    let mut route = Vec::with_capacity(cities.len() + 2);
    route.push(depot);
    route.extend_from_slice(cities);
    route.push(depot);
    route
}

/// The cities of a closed route, without the depot at either end.
pub fn interior(route: &[Point]) -> &[Point] {
    if route.len() < 2 {
        &[]
    } else {
        &route[1..route.len() - 1]
    }
}

#[derive(Clone, Copy)]
struct Windows<'a> {
    service: &'a dyn ServiceTime,
    window: &'a dyn TimeWindowLookup,
}

/// Cost model of a route over borrowed operators.
#[derive(Clone, Copy)]
pub struct RouteModel<'a> {
    metric: &'a dyn Metric,
    windows: Option<Windows<'a>>,
}

impl<'a> RouteModel<'a> {
    /// Plain travelling-salesman cost.
    pub fn plain(metric: &'a dyn Metric) -> Self {
        Self {
            metric,
            windows: None,
        }
    }

    /// Cost including service times, with lateness against time windows.
    pub fn windowed(
        metric: &'a dyn Metric,
        service: &'a dyn ServiceTime,
        window: &'a dyn TimeWindowLookup,
    ) -> Self {
        Self {
            metric,
            windows: Some(Windows { service, window }),
        }
    }

    pub fn metric(&self) -> &'a dyn Metric {
        self.metric
    }

    pub fn is_windowed(&self) -> bool {
        self.windows.is_some()
    }

    /// Travel (plus service) time of one edge.
    pub fn edge(&self, a: &Point, b: &Point) -> f64 {
        let travel = self.metric.distance(a, b);
        match self.windows {
            Some(w) => w.service.service(a) + travel,
            None => travel,
        }
    }

    /// Sum of edge costs over consecutive pairs.
    pub fn cost(&self, route: &[Point]) -> f64 {
        route.windows(2).map(|pair| self.edge(&pair[0], &pair[1])).sum()
    }

    /// Total lateness of the route; always zero for the plain model.
    ///
    /// Walking from time zero, each stop's service starts at
    /// `max(arrival, earliest)` and is late by
    /// `max(0, start + service - latest)`.
    pub fn lateness(&self, route: &[Point]) -> f64 {
        let Some(w) = self.windows else {
            return 0.0;
        };

        let mut arrival = 0.0;
        let mut lateness = 0.0;
        for pair in route.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            arrival += self.edge(a, b);

            let (earliest, latest) = w.window.window(b);
            let start_of_service = f64::max(arrival, earliest);
            lateness += f64::max(0.0, start_of_service + w.service.service(b) - latest);
        }
        lateness
    }
}
