//! Planar point value type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable `(x, y)` coordinate pair.
///
/// Equality and hashing are by coordinate value, so points can key the
/// time-window and distance lookups. `-0.0` and `0.0` compare and hash equal.
/// Ordering is lexicographic (`x`, then `y`) using IEEE total order.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn key(&self) -> (u64, u64) {
        // adding 0.0 folds -0.0 into +0.0
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.x + 0.0)
            .total_cmp(&(other.x + 0.0))
            .then_with(|| (self.y + 0.0).total_cmp(&(other.y + 0.0)))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_signed_zero_is_one_key() {
        let a = Point::new(0.0, -0.0);
        let b = Point::new(-0.0, 0.0);
        assert_eq!(a, b);

        let set: FxHashSet<Point> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_lexicographic_order() {
        let mut points = vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(0.0, 1.0),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 1.0),
                Point::new(0.0, 2.0),
                Point::new(1.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_tuple_conversion() {
        let p: Point = (3.5, -1.0).into();
        assert_eq!(p, Point::new(3.5, -1.0));
        assert_eq!(p.to_string(), "(3.5, -1)");
    }
}
