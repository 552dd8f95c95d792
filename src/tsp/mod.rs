//! Travelling salesman on the plane.
//!
//! [`TravellingSalesman`] binds an [`OperatorSet`](crate::operators::OperatorSet)
//! to the route cost model and exposes six strategies, each taking a depot
//! and a list of cities and returning a closed [`Tour`]:
//!
//! - [`nearest_neighbor`](TravellingSalesman::nearest_neighbor) and
//!   [`convex_hull_insertion`](TravellingSalesman::convex_hull_insertion)
//!   construct a tour greedily
//! - [`two_opt`](TravellingSalesman::two_opt) improves the given order by
//!   segment reversals
//! - [`simulated_annealing`](TravellingSalesman::simulated_annealing),
//!   [`compressed_annealing`](TravellingSalesman::compressed_annealing) and
//!   [`genetic_algorithm`](TravellingSalesman::genetic_algorithm) run the
//!   generic engines on the given order
//!
//! The time-windowed variant ([`TravellingSalesman::time_windowed`]) prices
//! service times into every route and reports window lateness as penalty.

mod adapters;
mod config;
mod construction;
mod local_search;
mod solver;

pub use config::TspConfig;
pub use solver::{Tour, TravellingSalesman};
