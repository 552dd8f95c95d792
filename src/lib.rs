//! Pluggable metaheuristics for the travelling salesman problem.
//!
//! Provides generic search engines and a route-domain solver built on top
//! of them:
//!
//! - **Simulated Annealing (SA)**: Single-solution trajectory optimization
//!   that reheats on every new best.
//! - **Compressed Annealing (CA)**: Annealing for constrained problems, with
//!   a penalty pressure that rises as the temperature falls and a
//!   self-calibrated temperature and pressure scale.
//! - **Genetic Algorithm (GA)**: Population-based evolutionary optimization
//!   with memoized fitness.
//! - **TSP**: Nearest-neighbour and convex-hull-insertion construction,
//!   2-opt local search, and SA/CA/GA dispatchers over closed routes, with
//!   an optional time-window variant.
//!
//! # Architecture
//!
//! The engines are domain agnostic: each defines a problem trait
//! ([`sa::SaProblem`], [`ca::CaProblem`], [`ga::GaProblem`]). The TSP
//! solver implements those traits on top of an
//! [`operators::OperatorSet`], where every role (metric, mutation,
//! crossover, selection, fitness, criterion, heuristic, service time, time
//! window, penalty) is resolved by name from a catalog or injected as a
//! trait object or closure.
//!
//! ```
//! use u_routeheur::geometry::Point;
//! use u_routeheur::operators::{OperatorSet, Role};
//! use u_routeheur::tsp::{TravellingSalesman, TspConfig};
//!
//! let ops = OperatorSet::from_names([
//!     (Role::Metric, "euclidean"),
//!     (Role::Mutate, "reverse_random_sublist"),
//! ])?;
//! let config = TspConfig::default().with_seed(42);
//! let tsp = TravellingSalesman::new(ops, config)?;
//!
//! let depot = Point::new(0.0, 0.0);
//! let cities = [Point::new(1.0, 1.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
//! let tour = tsp.two_opt(depot, &cities)?;
//! assert!((tour.cost - 4.0).abs() < 1e-9);
//! # Ok::<(), u_routeheur::Error>(())
//! ```

pub mod ca;
pub mod error;
pub mod ga;
pub mod geometry;
pub mod operators;
pub mod progress;
pub mod random;
pub mod route;
pub mod sa;
pub mod tsp;

pub use error::{Error, Result};
