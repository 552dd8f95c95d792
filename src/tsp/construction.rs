//! Constructive heuristics: nearest neighbour and convex-hull insertion.

use super::solver::{Tour, TravellingSalesman};
use crate::error::{Error, Result};
use crate::geometry::{convex_hull, Point};
use rustc_hash::FxHashSet;
use tracing::debug;

impl TravellingSalesman {
    /// Greedy tour: repeatedly visit the unrouted city nearest to the last
    /// routed point, then return to the depot.
    ///
    /// Ties go to the city listed first. O(n²) distance evaluations.
    pub fn nearest_neighbor(&self, depot: Point, cities: &[Point]) -> Result<Tour> {
        let metric = self.operators.metric()?;

        let mut remaining = cities.to_vec();
        let mut route = Vec::with_capacity(cities.len() + 2);
        route.push(depot);

        while !remaining.is_empty() {
            let last = route[route.len() - 1];
            let mut nearest = 0;
            let mut nearest_distance = metric.distance(&last, &remaining[0]);
            for (i, city) in remaining.iter().enumerate().skip(1) {
                let distance = metric.distance(&last, city);
                if distance < nearest_distance {
                    nearest = i;
                    nearest_distance = distance;
                }
            }
            route.push(remaining.remove(nearest));
        }
        route.push(depot);

        self.tour(route)
    }

    /// Tour grown from the convex hull of the depot and cities.
    ///
    /// Every point inside the hull is scored against every edge of the
    /// current polygon, the closing edge included, with the criterion
    /// operator. The best (point, edge) pair is inserted until no point is
    /// left; the polygon is then rotated to start at the depot. Duplicate
    /// points are visited once.
    ///
    /// Requires a criterion operator. Fails with
    /// [`Error::DegenerateInput`] when the points have no proper hull
    /// (fewer than three distinct points, or all collinear).
    pub fn convex_hull_insertion(&self, depot: Point, cities: &[Point]) -> Result<Tour> {
        let metric = self.operators.metric()?;
        let criterion = self.operators.criterion()?;

        let mut points = Vec::with_capacity(cities.len() + 1);
        points.push(depot);
        points.extend_from_slice(cities);
        points.sort();
        points.dedup();

        let mut route = convex_hull(&points);
        if route.is_empty() {
            return Err(Error::DegenerateInput {
                heuristic: "convex hull insertion",
                required: 3,
                found: points.len(),
            });
        }
        debug!(hull = route.len(), points = points.len(), "hull built");

        let on_hull: FxHashSet<Point> = route.iter().copied().collect();
        let mut inner: Vec<Point> = points
            .into_iter()
            .filter(|point| !on_hull.contains(point))
            .collect();

        while !inner.is_empty() {
            // (score, inner index, edge start)
            let mut best: Option<(f64, usize, usize)> = None;
            for (c, candidate) in inner.iter().enumerate() {
                for i in 0..route.len() {
                    let from = &route[i];
                    let to = &route[(i + 1) % route.len()];
                    let score = criterion.score(from, candidate, to, metric);
                    if best.map_or(true, |(best_score, _, _)| score > best_score) {
                        best = Some((score, c, i));
                    }
                }
            }

            let Some((_, c, i)) = best else {
                break;
            };
            let point = inner.remove(c);
            route.insert(i + 1, point);
        }

        if let Some(start) = route.iter().position(|point| *point == depot) {
            route.rotate_left(start);
        }
        route.push(depot);

        self.tour(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{CriterionKind, OperatorSet, Role};
    use crate::tsp::TspConfig;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn solver(criterion: CriterionKind) -> TravellingSalesman {
        let ops = OperatorSet::new()
            .with_named(Role::Metric, "euclidean")
            .unwrap()
            .with_criterion(criterion);
        TravellingSalesman::new(ops, TspConfig::default()).unwrap()
    }

    #[test]
    fn test_nearest_neighbor_unit_square() {
        let tsp = solver(CriterionKind::Angle);
        let depot = p(0.0, 0.0);
        let tour = tsp
            .nearest_neighbor(depot, &[p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)])
            .unwrap();

        assert_eq!(
            tour.route,
            vec![depot, p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), depot]
        );
        assert!((tour.cost - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_neighbor_ties_prefer_first() {
        let tsp = solver(CriterionKind::Angle);
        let depot = p(0.0, 0.0);
        let tour = tsp
            .nearest_neighbor(depot, &[p(0.0, 1.0), p(1.0, 0.0)])
            .unwrap();
        assert_eq!(tour.route[1], p(0.0, 1.0));
    }

    #[test]
    fn test_nearest_neighbor_no_cities() {
        let tsp = solver(CriterionKind::Angle);
        let depot = p(3.0, 3.0);
        let tour = tsp.nearest_neighbor(depot, &[]).unwrap();
        assert_eq!(tour.route, vec![depot, depot]);
        assert_eq!(tour.cost, 0.0);
    }

    #[test]
    fn test_hull_insertion_square_with_center() {
        let tsp = solver(CriterionKind::Eccentricity);
        let depot = p(0.0, 0.0);
        let tour = tsp
            .convex_hull_insertion(depot, &[p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 1.0)])
            .unwrap();

        // every edge scores the centre equally; the first edge wins
        assert_eq!(
            tour.route,
            vec![
                depot,
                p(1.0, 1.0),
                p(2.0, 0.0),
                p(2.0, 2.0),
                p(0.0, 2.0),
                depot
            ]
        );
        assert!((tour.cost - (6.0 + 2.0 * 2f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_hull_insertion_rotates_to_depot() {
        let tsp = solver(CriterionKind::Angle);
        let depot = p(4.0, 4.0);
        let cities = [p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0), p(1.0, 2.0), p(3.0, 1.0)];
        let tour = tsp.convex_hull_insertion(depot, &cities).unwrap();

        assert_eq!(tour.route.first(), Some(&depot));
        assert_eq!(tour.route.last(), Some(&depot));
        assert_eq!(tour.route.len(), cities.len() + 2);
        for city in &cities {
            assert!(tour.route.contains(city));
        }
    }

    #[test]
    fn test_hull_insertion_visits_duplicates_once() {
        let tsp = solver(CriterionKind::Eccentricity);
        let depot = p(0.0, 0.0);
        let cities = [p(2.0, 0.0), p(2.0, 0.0), p(0.0, 2.0), p(0.0, 0.0)];
        let tour = tsp.convex_hull_insertion(depot, &cities).unwrap();
        assert_eq!(tour.route, vec![depot, p(2.0, 0.0), p(0.0, 2.0), depot]);
    }

    #[test]
    fn test_hull_insertion_degenerate_input() {
        let tsp = solver(CriterionKind::Angle);
        let depot = p(0.0, 0.0);

        assert_eq!(
            tsp.convex_hull_insertion(depot, &[p(1.0, 1.0)]).unwrap_err(),
            Error::DegenerateInput {
                heuristic: "convex hull insertion",
                required: 3,
                found: 2,
            }
        );
        assert!(matches!(
            tsp.convex_hull_insertion(depot, &[p(1.0, 1.0), p(2.0, 2.0)]),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_hull_insertion_requires_criterion() {
        let ops = OperatorSet::new().with_named(Role::Metric, "euclidean").unwrap();
        let tsp = TravellingSalesman::new(ops, TspConfig::default()).unwrap();
        assert_eq!(
            tsp.convex_hull_insertion(p(0.0, 0.0), &[p(1.0, 0.0), p(0.0, 1.0)])
                .unwrap_err(),
            Error::UnresolvedOperator {
                role: Role::Criterion
            }
        );
    }
}
