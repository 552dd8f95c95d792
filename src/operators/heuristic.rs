//! Lower-bound style estimates of a route, used by weighted fitness.

use super::{lookup, Metric, Role};
use crate::error::Result;
use crate::geometry::Point;

/// Estimates a reference value for the point set of a route.
pub trait Heuristic: Send + Sync {
    fn estimate(&self, route: &[Point], metric: &dyn Metric) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&[Point], &dyn Metric) -> f64 + Send + Sync,
{
    fn estimate(&self, route: &[Point], metric: &dyn Metric) -> f64 {
        self(route, metric)
    }
}

/// Built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    /// Weight of a minimum spanning tree over the route's distinct points
    /// (Kruskal with union-find). Edges are taken in both directions so an
    /// asymmetric metric contributes its cheaper direction.
    Kruskal,
}

impl HeuristicKind {
    pub const NAMES: &'static [&'static str] = &["kruskal"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(Role::Heuristic, name, &[("kruskal", HeuristicKind::Kruskal)])
    }
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, route: &[Point], metric: &dyn Metric) -> f64 {
        match self {
            HeuristicKind::Kruskal => kruskal(route, metric),
        }
    }
}

fn kruskal(route: &[Point], metric: &dyn Metric) -> f64 {
    let mut vertices = route.to_vec();
    vertices.sort();
    vertices.dedup();
    let n = vertices.len();
    if n < 2 {
        return 0.0;
    }

    let mut edges = Vec::with_capacity(n * (n - 1));
    for u in 0..n {
        for v in 0..n {
            if u != v {
                edges.push((metric.distance(&vertices[u], &vertices[v]), u, v));
            }
        }
    }
    edges.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut forest = DisjointSet::new(n);
    let mut weight = 0.0;
    let mut joined = 0;
    for (distance, u, v) in edges {
        if forest.union(u, v) {
            weight += distance;
            joined += 1;
            if joined == n - 1 {
                break;
            }
        }
    }
    weight
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets of `a` and `b`; false when already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}
