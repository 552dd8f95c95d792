//! Distance metrics.

use super::{lookup, Role};
use crate::error::Result;
use crate::geometry::Point;
use rustc_hash::FxHashMap;

/// Distance between two points. Need not be symmetric.
pub trait Metric: Send + Sync {
    fn distance(&self, a: &Point, b: &Point) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&Point, &Point) -> f64 + Send + Sync,
{
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        self(a, b)
    }
}

/// Built-in coordinate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricKind {
    /// Straight-line distance.
    Euclidean,
    /// Squared straight-line distance (no square root). Penalises long
    /// edges more heavily and does not satisfy the triangle inequality.
    SquaredEuclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
}

impl MetricKind {
    pub const NAMES: &'static [&'static str] = &["euclidean", "squared-euclidean", "manhattan"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Metric,
            name,
            &[
                ("euclidean", MetricKind::Euclidean),
                ("squared-euclidean", MetricKind::SquaredEuclidean),
                ("manhattan", MetricKind::Manhattan),
            ],
        )
    }
}

impl Metric for MetricKind {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        match self {
            MetricKind::Euclidean => dx.hypot(dy),
            MetricKind::SquaredEuclidean => dx * dx + dy * dy,
            MetricKind::Manhattan => dx.abs() + dy.abs(),
        }
    }
}

/// Explicit distance lookup keyed by ordered point pairs.
///
/// Used when distances come from a matrix rather than from coordinates.
/// The distance from a point to itself is zero; any other missing pair is
/// `+inf`, which keeps routes through it from ever being preferred.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    distances: FxHashMap<(Point, Point), f64>,
}

impl DistanceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance from `from` to `to` only.
    pub fn insert(&mut self, from: Point, to: Point, distance: f64) {
        self.distances.insert((from, to), distance);
    }

    /// Sets the distance in both directions.
    pub fn insert_symmetric(&mut self, a: Point, b: Point, distance: f64) {
        self.insert(a, b, distance);
        self.insert(b, a, distance);
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Every point that appears in at least one entry.
    pub fn points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self
            .distances
            .keys()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        points.sort();
        points.dedup();
        points
    }
}

impl FromIterator<(Point, Point, f64)> for DistanceMatrix {
    fn from_iter<I: IntoIterator<Item = (Point, Point, f64)>>(iter: I) -> Self {
        let mut matrix = Self::new();
        for (from, to, distance) in iter {
            matrix.insert(from, to, distance);
        }
        matrix
    }
}

impl Metric for DistanceMatrix {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        if a == b {
            return 0.0;
        }
        self.distances
            .get(&(*a, *b))
            .copied()
            .unwrap_or(f64::INFINITY)
    }
}
