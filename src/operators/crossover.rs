//! Route crossover operators.
//!
//! Both parents are closed routes over the same city set. Children keep the
//! depot at both ends and visit every city of the parents exactly once.

use super::{lookup, Role};
use crate::error::Result;
use crate::geometry::Point;
use rand::{Rng, RngCore};
use rustc_hash::FxHashSet;

/// Recombines two parent routes into one child.
pub trait Crossover: Send + Sync {
    fn crossover(&self, father: &[Point], mother: &[Point], rng: &mut dyn RngCore) -> Vec<Point>;
}

impl<F> Crossover for F
where
    F: Fn(&[Point], &[Point], &mut dyn RngCore) -> Vec<Point> + Send + Sync,
{
    fn crossover(&self, father: &[Point], mother: &[Point], rng: &mut dyn RngCore) -> Vec<Point> {
        self(father, mother, rng)
    }
}

/// Built-in crossover operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    /// Keep the first half of the father's interior, then append the
    /// mother's remaining cities in her order. Deterministic.
    CutAndStitch,
    /// Order crossover (OX, Davis 1985) over the interior: a random segment
    /// of the father stays in place and the mother fills the rest in her
    /// relative order, wrapping after the segment.
    Order,
}

impl CrossoverKind {
    pub const NAMES: &'static [&'static str] = &["cut-and-stitch", "order"];

    pub fn from_name(name: &str) -> Result<Self> {
        lookup(
            Role::Crossover,
            name,
            &[
                ("cut-and-stitch", CrossoverKind::CutAndStitch),
                ("order", CrossoverKind::Order),
            ],
        )
    }
}

impl Crossover for CrossoverKind {
    fn crossover(&self, father: &[Point], mother: &[Point], rng: &mut dyn RngCore) -> Vec<Point> {
        if father.len() < 3 {
            return father.to_vec();
        }
        match self {
            CrossoverKind::CutAndStitch => cut_and_stitch(father, mother),
            CrossoverKind::Order => order(father, mother, rng),
        }
    }
}

fn interior(route: &[Point]) -> &[Point] {
    if route.len() < 2 {
        &[]
    } else {
        &route[1..route.len() - 1]
    }
}

fn cut_and_stitch(father: &[Point], mother: &[Point]) -> Vec<Point> {
    let half = father.len() / 2;
    let mut child = Vec::with_capacity(father.len());
    child.push(father[0]);
    child.extend_from_slice(&father[1..half.max(1)]);

    let mut seen: FxHashSet<Point> = child[1..].iter().copied().collect();
    for &city in interior(mother) {
        if seen.insert(city) {
            child.push(city);
        }
    }

    child.push(mother[0]);
    child
}

fn order(father: &[Point], mother: &[Point], rng: &mut dyn RngCore) -> Vec<Point> {
    let template = interior(father);
    let donor = interior(mother);
    let n = template.len();
    if n < 2 || donor.len() != n {
        return father.to_vec();
    }

    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    let mut slots: Vec<Option<Point>> = vec![None; n];
    let mut in_segment = FxHashSet::default();
    for i in start..=end {
        slots[i] = Some(template[i]);
        in_segment.insert(template[i]);
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let city = donor[(end + 1 + offset) % n];
        if !in_segment.contains(&city) {
            slots[pos] = Some(city);
            pos = (pos + 1) % n;
        }
    }

    let mut child = Vec::with_capacity(father.len());
    child.push(father[0]);
    child.extend(slots.into_iter().flatten());
    child.push(father[father.len() - 1]);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn closed(xs: &[u32]) -> Vec<Point> {
        let depot = Point::new(0.0, 0.0);
        let mut route = vec![depot];
        route.extend(xs.iter().map(|&x| Point::new(x as f64, 1.0)));
        route.push(depot);
        route
    }

    fn is_valid_child(child: &[Point], parent: &[Point]) -> bool {
        let mut a = child.to_vec();
        let mut b = parent.to_vec();
        a.sort();
        b.sort();
        a == b && child.first() == parent.first() && child.last() == parent.last()
    }

    #[test]
    fn test_cut_and_stitch_layout() {
        let father = closed(&[1, 2, 3, 4, 5, 6]);
        let mother = closed(&[6, 5, 4, 3, 2, 1]);
        let mut rng = create_rng(0);

        let child = CrossoverKind::CutAndStitch.crossover(&father, &mother, &mut rng);

        // len 8 -> father[1..4] = 1, 2, 3, then mother's remaining order
        assert_eq!(child, closed(&[1, 2, 3, 6, 5, 4]));
    }

    #[test]
    fn test_order_produces_valid_children() {
        let father = closed(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mother = closed(&[8, 7, 6, 5, 4, 3, 2, 1]);
        let mut rng = create_rng(42);

        for _ in 0..100 {
            let child = CrossoverKind::Order.crossover(&father, &mother, &mut rng);
            assert!(is_valid_child(&child, &father), "invalid child {child:?}");
        }
    }

    #[test]
    fn test_identical_parents() {
        let parent = closed(&[3, 1, 2, 5, 4]);
        let mut rng = create_rng(7);
        for kind in [CrossoverKind::CutAndStitch, CrossoverKind::Order] {
            assert_eq!(kind.crossover(&parent, &parent, &mut rng), parent);
        }
    }

    #[test]
    fn test_tiny_routes() {
        let mut rng = create_rng(1);
        let single = closed(&[1]);
        for kind in [CrossoverKind::CutAndStitch, CrossoverKind::Order] {
            let child = kind.crossover(&single, &single, &mut rng);
            assert!(is_valid_child(&child, &single));
        }
    }
}
