//! Route mutation operators.
//!
//! Routes are closed: the first and last positions hold the depot. All
//! built-in moves therefore act on the interior `1..len - 1` only, and
//! leave routes with fewer than two interior cities untouched.
//!
//! # Operators
//!
//! - [`MutationKind::RandomSwap`]: exchange two interior positions, O(1)
//! - [`MutationKind::Shift1`]: move one city to another position, O(n)
//! - [`MutationKind::ReverseRandomSublist`]: reverse a segment (2-opt move), O(n)

use super::{lookup, Role};
use crate::error::Result;
use crate::geometry::Point;
use rand::{Rng, RngCore};

/// Perturbs a route in place.
pub trait Mutation: Send + Sync {
    fn mutate(&self, route: &mut [Point], rng: &mut dyn RngCore);
}

impl<F> Mutation for F
where
    F: Fn(&mut [Point], &mut dyn RngCore) + Send + Sync,
{
    fn mutate(&self, route: &mut [Point], rng: &mut dyn RngCore) {
        self(route, rng)
    }
}

/// Built-in mutation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationKind {
    RandomSwap,
    Shift1,
    ReverseRandomSublist,
}

impl MutationKind {
    pub const NAMES: &'static [&'static str] =
        &["random-swap", "shift-1", "reverse-random-sublist"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Mutate,
            name,
            &[
                ("random-swap", MutationKind::RandomSwap),
                ("shift-1", MutationKind::Shift1),
                ("reverse-random-sublist", MutationKind::ReverseRandomSublist),
            ],
        )
    }
}

impl Mutation for MutationKind {
    fn mutate(&self, route: &mut [Point], rng: &mut dyn RngCore) {
        let n = route.len();
        if n < 4 {
            return;
        }
        let i = rng.random_range(1..n - 1);
        let j = rng.random_range(1..n - 1);

        match self {
            MutationKind::RandomSwap => route.swap(i, j),
            MutationKind::Shift1 => {
                // remove at i, reinsert at j
                if i < j {
                    route[i..=j].rotate_left(1);
                } else {
                    route[j..=i].rotate_right(1);
                }
            }
            MutationKind::ReverseRandomSublist => {
                let (start, end) = if i <= j { (i, j) } else { (j, i) };
                route[start..=end].reverse();
            }
        }
    }
}
