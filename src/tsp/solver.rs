//! The travelling-salesman solver and its strategy dispatchers.

use super::adapters::{RouteEvolution, RouteSearch};
use super::config::TspConfig;
use crate::ca::{CaRunner, Calibration};
use crate::error::Result;
use crate::ga::GaRunner;
use crate::geometry::Point;
use crate::operators::{Evaluation, OperatorSet, PenaltyKind, Role};
use crate::progress::ProgressSink;
use crate::random::rng_from_seed;
use crate::route::{close, RouteModel};
use crate::sa::SaRunner;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// A closed route and its cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Starts and ends at the depot.
    pub route: Vec<Point>,
    pub cost: f64,
}

/// Travelling-salesman solver over a set of resolved operators.
///
/// The plain variant needs only a metric at construction; each strategy
/// checks the further roles it uses when it is called. The time-windowed
/// variant additionally needs service times and time windows, adds the
/// service time of each departure point to the route cost, and defaults
/// its penalty to [`PenaltyKind::Lateness`].
///
/// # Examples
///
/// ```
/// use u_routeheur::geometry::Point;
/// use u_routeheur::operators::{OperatorSet, Role};
/// use u_routeheur::tsp::{TravellingSalesman, TspConfig};
///
/// let ops = OperatorSet::new().with_named(Role::Metric, "euclidean")?;
/// let tsp = TravellingSalesman::new(ops, TspConfig::default())?;
///
/// let depot = Point::new(0.0, 0.0);
/// let cities = [Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)];
/// let tour = tsp.nearest_neighbor(depot, &cities)?;
/// assert_eq!(tour.cost, 4.0);
/// # Ok::<(), u_routeheur::Error>(())
/// ```
#[derive(Clone)]
pub struct TravellingSalesman {
    pub(super) operators: OperatorSet,
    pub(super) config: TspConfig,
    windowed: bool,
    calibration: Option<Calibration>,
    progress: Option<Arc<dyn ProgressSink<Vec<Point>>>>,
}

impl TravellingSalesman {
    /// Plain travelling salesman. Requires a metric.
    pub fn new(operators: OperatorSet, config: TspConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            operators: bind(operators, false)?,
            config,
            windowed: false,
            calibration: None,
            progress: None,
        })
    }

    /// Travelling salesman with time windows. Requires a metric, service
    /// times and time windows.
    pub fn time_windowed(operators: OperatorSet, config: TspConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            operators: bind(operators, true)?,
            config,
            windowed: true,
            calibration: None,
            progress: None,
        })
    }

    /// Re-resolves `role` by name on this instance.
    ///
    /// The cached calibration is kept. On error the previous operators stay
    /// in place.
    pub fn set_named(&mut self, role: Role, name: &str) -> Result<()> {
        let mut operators = self.operators.clone();
        operators.set_named(role, name)?;
        self.replace_operators(operators)
    }

    /// Swaps in a new operator set, e.g. one with an injected operator:
    ///
    /// ```
    /// # use u_routeheur::geometry::Point;
    /// # use u_routeheur::operators::{OperatorSet, Role};
    /// # use u_routeheur::tsp::{TravellingSalesman, TspConfig};
    /// let ops = OperatorSet::new().with_named(Role::Metric, "euclidean")?;
    /// let mut tsp = TravellingSalesman::new(ops, TspConfig::default())?;
    ///
    /// let ops = tsp.operators().clone().with_metric(|a: &Point, b: &Point| (a.x - b.x).abs());
    /// tsp.replace_operators(ops)?;
    /// assert_eq!(tsp.cost(&[Point::new(0.0, 0.0), Point::new(2.0, 5.0)])?, 2.0);
    /// # Ok::<(), u_routeheur::Error>(())
    /// ```
    ///
    /// The set is checked as by the constructor of this variant; the
    /// time-windowed variant falls back to the lateness penalty when none is
    /// supplied. The cached calibration is kept.
    pub fn replace_operators(&mut self, operators: OperatorSet) -> Result<()> {
        self.operators = bind(operators, self.windowed)?;
        Ok(())
    }

    /// Sends one record per engine iteration to `sink`.
    pub fn with_progress(mut self, sink: impl ProgressSink<Vec<Point>> + 'static) -> Self {
        self.progress = Some(Arc::new(sink));
        self
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn config(&self) -> &TspConfig {
        &self.config
    }

    pub fn is_windowed(&self) -> bool {
        self.windowed
    }

    /// The cost model of this instance.
    pub fn model(&self) -> Result<RouteModel<'_>> {
        let metric = self.operators.metric()?;
        if self.windowed {
            Ok(RouteModel::windowed(
                metric,
                self.operators.service()?,
                self.operators.time_window()?,
            ))
        } else {
            Ok(RouteModel::plain(metric))
        }
    }

    pub fn cost(&self, route: &[Point]) -> Result<f64> {
        Ok(self.model()?.cost(route))
    }

    /// Penalty of `route`, zero when no penalty operator is set.
    pub fn penalty(&self, route: &[Point]) -> Result<f64> {
        let model = self.model()?;
        Ok(self
            .operators
            .penalty_opt()
            .map_or(0.0, |penalty| penalty.penalty(route, &model)))
    }

    /// The compressed annealing calibration cached by this instance.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Forgets the cached calibration; the next compressed annealing run
    /// recalibrates.
    pub fn reset_calibration(&mut self) {
        self.calibration = None;
    }

    pub(super) fn tour(&self, route: Vec<Point>) -> Result<Tour> {
        let cost = self.cost(&route)?;
        Ok(Tour { route, cost })
    }

    fn search(&self) -> Result<RouteSearch<'_>> {
        Ok(RouteSearch {
            model: self.model()?,
            mutation: self.operators.mutation()?,
            penalty: self.operators.penalty_opt(),
            progress: self.progress.as_deref(),
        })
    }

    /// Simulated annealing from the route `[depot] + cities + [depot]`.
    ///
    /// Requires a mutation operator.
    pub fn simulated_annealing(&self, depot: Point, cities: &[Point]) -> Result<Tour> {
        self.operators.require(&[Role::Mutate])?;
        info!(cities = cities.len(), "tsp: simulated annealing");

        let result = SaRunner::run(&self.search()?, close(depot, cities), &self.config.sa)?;
        Ok(Tour {
            route: result.best,
            cost: result.best_cost,
        })
    }

    /// Compressed annealing from the route `[depot] + cities + [depot]`.
    ///
    /// Requires mutation and penalty operators. The first call calibrates
    /// against its starting route and caches the result on this instance;
    /// later calls reuse it until [`reset_calibration`](Self::reset_calibration).
    pub fn compressed_annealing(&mut self, depot: Point, cities: &[Point]) -> Result<Tour> {
        self.operators.require(&[Role::Mutate, Role::Penalty])?;
        info!(cities = cities.len(), "tsp: compressed annealing");

        let initial = close(depot, cities);
        let mut rng = rng_from_seed(self.config.ca.seed);

        let calibration = match self.calibration {
            Some(calibration) => calibration,
            None => {
                let calibration = CaRunner::calibrate_with_rng(
                    &self.search()?,
                    &initial,
                    &self.config.ca,
                    &mut rng,
                )?;
                self.calibration = Some(calibration);
                calibration
            }
        };

        let result = CaRunner::run_calibrated(
            &self.search()?,
            initial,
            &self.config.ca,
            &calibration,
            &mut rng,
        )?;
        Ok(Tour {
            route: result.best,
            cost: result.best_cost,
        })
    }

    /// Genetic algorithm seeded with the route `[depot] + cities + [depot]`.
    ///
    /// Requires mutation, crossover, selection and fitness operators, plus
    /// whatever the fitness function reads (e.g. a heuristic).
    pub fn genetic_algorithm(&self, depot: Point, cities: &[Point]) -> Result<Tour> {
        self.operators
            .require(&[Role::Mutate, Role::Crossover, Role::Select, Role::Fitness])?;
        let fitness = self.operators.fitness()?;
        self.operators.require(fitness.requires())?;
        info!(cities = cities.len(), "tsp: genetic algorithm");

        let evolution = RouteEvolution {
            evaluation: Evaluation::new(self.model()?)
                .with_penalty(self.operators.penalty_opt())
                .with_heuristic(self.operators.heuristic_opt()),
            mutation: self.operators.mutation()?,
            crossover: self.operators.crossover()?,
            selection: self.operators.selection()?,
            fitness,
            progress: self.progress.as_deref(),
        };

        let result = GaRunner::run(&evolution, close(depot, cities), &self.config.ga)?;
        self.tour(result.best)
    }
}

impl fmt::Debug for TravellingSalesman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravellingSalesman")
            .field("operators", &self.operators)
            .field("config", &self.config)
            .field("windowed", &self.windowed)
            .field("calibration", &self.calibration)
            .finish_non_exhaustive()
    }
}

/// Checks the roles every strategy of a variant needs, and fills the
/// windowed penalty default.
fn bind(operators: OperatorSet, windowed: bool) -> Result<OperatorSet> {
    if !windowed {
        operators.require(&[Role::Metric])?;
        return Ok(operators);
    }
    operators.require(&[Role::Metric, Role::Service, Role::TimeWindow])?;
    if operators.is_resolved(Role::Penalty) {
        Ok(operators)
    } else {
        Ok(operators.with_penalty(PenaltyKind::Lateness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ca::CaConfig;
    use crate::error::Error;
    use crate::ga::GaConfig;
    use crate::operators::{DistanceMatrix, FitnessKind, TimeWindowTable, Window};
    use crate::progress::Progress;
    use crate::route::interior;
    use crate::sa::SaConfig;
    use rustc_hash::FxHashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn cities() -> Vec<Point> {
        vec![
            p(5.0, 1.0),
            p(1.0, 4.0),
            p(6.0, 6.0),
            p(2.0, 1.0),
            p(7.0, 3.0),
            p(3.0, 7.0),
            p(4.0, 3.0),
        ]
    }

    fn config() -> TspConfig {
        TspConfig::default()
            .with_sa(
                SaConfig::default()
                    .with_max_temperature(50.0)
                    .with_cooling_rate(0.01)
                    .with_max_iterations(500),
            )
            .with_ga(
                GaConfig::default()
                    .with_population_size(20)
                    .with_max_iterations(30)
                    .with_fitness_threshold(f64::INFINITY),
            )
            .with_ca(
                CaConfig::default()
                    .with_iterations_per_temperature(50)
                    .with_minimum_temperature_changes(10)
                    .with_idle_temperature_changes(5)
                    .with_trial_iterations(500)
                    .with_trial_neighbor_pairs(100),
            )
            .with_seed(17)
    }

    fn ops() -> OperatorSet {
        OperatorSet::from_names([
            (Role::Metric, "euclidean"),
            (Role::Mutate, "reverse-random-sublist"),
            (Role::Crossover, "cut-and-stitch"),
            (Role::Select, "random-top-half"),
            (Role::Fitness, "inverse-cost"),
        ])
        .unwrap()
    }

    fn assert_permutation(route: &[Point], depot: Point, cities: &[Point]) {
        assert_eq!(route.first(), Some(&depot));
        assert_eq!(route.last(), Some(&depot));
        let visited: FxHashSet<Point> = interior(route).iter().copied().collect();
        let expected: FxHashSet<Point> = cities.iter().copied().collect();
        assert_eq!(interior(route).len(), cities.len());
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_new_requires_metric() {
        let err = TravellingSalesman::new(OperatorSet::new(), TspConfig::default()).unwrap_err();
        assert_eq!(err, Error::UnresolvedOperator { role: Role::Metric });
    }

    #[test]
    fn test_new_validates_config() {
        let config = TspConfig::default().with_sa(SaConfig::default().with_cooling_rate(0.0));
        assert!(matches!(
            TravellingSalesman::new(ops(), config),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_time_windowed_requires_service() {
        let ops = OperatorSet::new().with_named(Role::Metric, "manhattan").unwrap();
        let err = TravellingSalesman::time_windowed(ops, TspConfig::default()).unwrap_err();
        assert_eq!(err, Error::UnresolvedOperator { role: Role::Service });
    }

    #[test]
    fn test_simulated_annealing_never_worse_than_seed() {
        let tsp = TravellingSalesman::new(ops(), config()).unwrap();
        let depot = p(0.0, 0.0);
        let seed_cost = tsp.cost(&close(depot, &cities())).unwrap();

        let tour = tsp.simulated_annealing(depot, &cities()).unwrap();

        assert!(tour.cost <= seed_cost);
        assert!((tour.cost - tsp.cost(&tour.route).unwrap()).abs() < 1e-9);
        assert_permutation(&tour.route, depot, &cities());
    }

    #[test]
    fn test_simulated_annealing_requires_mutation() {
        let ops = OperatorSet::new().with_named(Role::Metric, "euclidean").unwrap();
        let tsp = TravellingSalesman::new(ops, config()).unwrap();
        assert_eq!(
            tsp.simulated_annealing(p(0.0, 0.0), &cities()).unwrap_err(),
            Error::UnresolvedOperator { role: Role::Mutate }
        );
    }

    #[test]
    fn test_genetic_algorithm_never_less_fit_than_seed() {
        let tsp = TravellingSalesman::new(ops(), config()).unwrap();
        let depot = p(0.0, 0.0);
        let seed_cost = tsp.cost(&close(depot, &cities())).unwrap();

        let tour = tsp.genetic_algorithm(depot, &cities()).unwrap();

        // inverse-cost fitness: fitter means cheaper
        assert!(tour.cost <= seed_cost + 1e-9);
        assert_permutation(&tour.route, depot, &cities());
    }

    #[test]
    fn test_weighted_fitness_requires_heuristic() {
        let ops = ops().with_fitness(FitnessKind::WeightedMst);
        let tsp = TravellingSalesman::new(ops.clone(), config()).unwrap();
        assert_eq!(
            tsp.genetic_algorithm(p(0.0, 0.0), &cities()).unwrap_err(),
            Error::UnresolvedOperator {
                role: Role::Heuristic
            }
        );

        let ops = ops.with_named(Role::Heuristic, "kruskal").unwrap();
        let tsp = TravellingSalesman::new(ops, config()).unwrap();
        assert!(tsp.genetic_algorithm(p(0.0, 0.0), &cities()).is_ok());
    }

    fn windowed() -> TravellingSalesman {
        let table = TimeWindowTable::try_from_entries([
            (p(5.0, 1.0), Window::new(0.0, 8.0, 1.0)),
            (p(7.0, 3.0), Window::new(0.0, 12.0, 1.0)),
            (p(3.0, 7.0), Window::new(20.0, 60.0, 2.0)),
        ])
        .unwrap();
        let ops = ops().with_time_window_table(table);
        TravellingSalesman::time_windowed(ops, config()).unwrap()
    }

    #[test]
    fn test_time_windowed_defaults_to_lateness() {
        let tsp = windowed();
        assert!(tsp.is_windowed());
        assert!(tsp.operators().is_resolved(Role::Penalty));

        // (7, 3) and (5, 1) are reached after their latest service times.
        let late = close(
            p(0.0, 0.0),
            &[p(3.0, 7.0), p(6.0, 6.0), p(7.0, 3.0), p(5.0, 1.0)],
        );
        assert!(tsp.penalty(&late).unwrap() > 0.0);
    }

    #[test]
    fn test_compressed_annealing_keeps_penalty_and_caches_calibration() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let mut tsp = windowed();
        let depot = p(0.0, 0.0);
        let initial = close(depot, &cities());
        let initial_penalty = tsp.penalty(&initial).unwrap();
        let initial_cost = tsp.cost(&initial).unwrap();

        let tour = tsp.compressed_annealing(depot, &cities()).unwrap();
        assert!(tsp.penalty(&tour.route).unwrap() <= initial_penalty);
        assert!(tour.cost <= initial_cost);
        assert_permutation(&tour.route, depot, &cities());

        let calibration = *tsp.calibration().unwrap();
        tsp.compressed_annealing(depot, &cities()).unwrap();
        assert_eq!(tsp.calibration(), Some(&calibration));

        tsp.reset_calibration();
        assert!(tsp.calibration().is_none());
    }

    #[test]
    fn test_compressed_annealing_requires_penalty() {
        let mut tsp = TravellingSalesman::new(ops(), config()).unwrap();
        assert_eq!(
            tsp.compressed_annealing(p(0.0, 0.0), &cities()).unwrap_err(),
            Error::UnresolvedOperator {
                role: Role::Penalty
            }
        );
    }

    #[test]
    fn test_progress_sink_receives_records() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let tsp = TravellingSalesman::new(ops(), config())
            .unwrap()
            .with_progress(move |progress: &Progress<'_, Vec<Point>>| {
                assert!(progress.best.is_some());
                seen.fetch_add(1, Ordering::Relaxed);
            });

        tsp.genetic_algorithm(p(0.0, 0.0), &cities()).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 30);
    }

    #[test]
    fn test_debug_skips_progress_sink() {
        let tsp = TravellingSalesman::new(ops(), config())
            .unwrap()
            .with_progress(|_: &Progress<'_, Vec<Point>>| {});
        let debug = format!("{tsp:?}");
        assert!(debug.starts_with("TravellingSalesman {"));
        assert!(debug.contains("windowed: false"));
        assert!(debug.contains("calibration: None"));
    }

    #[test]
    fn test_override_mutation_keeps_calibration() {
        let mut tsp = windowed();
        let depot = p(0.0, 0.0);
        tsp.compressed_annealing(depot, &cities()).unwrap();
        let calibration = *tsp.calibration().unwrap();

        tsp.set_named(Role::Mutate, "random_swap").unwrap();
        assert_eq!(tsp.calibration(), Some(&calibration));

        let tour = tsp.compressed_annealing(depot, &cities()).unwrap();
        assert_permutation(&tour.route, depot, &cities());
        assert_eq!(tsp.calibration(), Some(&calibration));
    }

    #[test]
    fn test_override_rejects_unknown_name_and_keeps_operators() {
        let mut tsp = TravellingSalesman::new(ops(), config()).unwrap();
        assert!(matches!(
            tsp.set_named(Role::Mutate, "scramble"),
            Err(Error::UnknownOperator { role: Role::Mutate, .. })
        ));
        assert!(tsp.operators().is_resolved(Role::Mutate));
        assert!(tsp.simulated_annealing(p(0.0, 0.0), &cities()).is_ok());
    }

    #[test]
    fn test_replace_operators_rechecks_variant() {
        let mut tsp = windowed();

        // no service times or windows
        let err = tsp.replace_operators(ops()).unwrap_err();
        assert_eq!(err, Error::UnresolvedOperator { role: Role::Service });
        assert!(tsp.operators().is_resolved(Role::Service));

        let table = TimeWindowTable::try_from_entries([(p(5.0, 1.0), Window::new(0.0, 1.0, 0.0))])
            .unwrap();
        tsp.replace_operators(ops().with_time_window_table(table)).unwrap();
        assert!(tsp.operators().is_resolved(Role::Penalty));
        assert!(tsp.penalty(&close(p(0.0, 0.0), &[p(5.0, 1.0)])).unwrap() > 0.0);
    }

    #[test]
    fn test_injected_metric_replaces_named_one() {
        let mut tsp = TravellingSalesman::new(ops(), config()).unwrap();
        let ops = tsp
            .operators()
            .clone()
            .with_metric(|a: &Point, b: &Point| (a.x - b.x).abs() + (a.y - b.y).abs());
        tsp.replace_operators(ops).unwrap();

        let tour = tsp.nearest_neighbor(p(0.0, 0.0), &[p(1.0, 1.0)]).unwrap();
        assert_eq!(tour.cost, 4.0);
    }

    fn one_way_loop() -> (Point, Vec<Point>, DistanceMatrix) {
        let (a, b, c, d) = (p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0));
        // cheap direction a -> b -> c -> d -> a; pairs such as a -> d are absent
        let matrix: DistanceMatrix = [
            (a, b, 1.0),
            (b, c, 1.0),
            (c, d, 1.0),
            (d, a, 1.0),
            (b, a, 9.0),
            (c, b, 9.0),
            (d, c, 9.0),
            (a, c, 5.0),
        ]
        .into_iter()
        .collect();
        (a, vec![b, c, d], matrix)
    }

    #[test]
    fn test_nearest_neighbor_with_asymmetric_matrix() {
        let (depot, cities, matrix) = one_way_loop();
        let tsp = TravellingSalesman::new(OperatorSet::new().with_metric(matrix), config()).unwrap();

        let tour = tsp.nearest_neighbor(depot, &cities).unwrap();
        assert_eq!(tour.route, close(depot, &cities));
        assert_eq!(tour.cost, 4.0);

        let mut reversed = tour.route.clone();
        reversed.reverse();
        assert!(tsp.cost(&reversed).unwrap().is_infinite());
    }

    #[test]
    fn test_two_opt_leaves_missing_pairs() {
        let (depot, cities, matrix) = one_way_loop();
        let tsp = TravellingSalesman::new(OperatorSet::new().with_metric(matrix), config()).unwrap();

        let backwards: Vec<Point> = cities.iter().rev().copied().collect();
        assert!(tsp.cost(&close(depot, &backwards)).unwrap().is_infinite());

        let tour = tsp.two_opt(depot, &backwards).unwrap();
        assert_eq!(tour.route, close(depot, &cities));
        assert_eq!(tour.cost, 4.0);
    }
}
