//! Orientation tests and the gift-wrapping (Jarvis march) convex hull.

use super::point::Point;

/// Twice the signed area of the triangle `p1 p2 p3`.
///
/// Positive when `p3` lies counter-clockwise of the directed line `p1 -> p2`,
/// zero when the three points are collinear, negative when clockwise.
pub fn orientation(p1: Point, p2: Point, p3: Point) -> f64 {
    (p3.y - p1.y) * (p2.x - p1.x) - (p2.y - p1.y) * (p3.x - p1.x)
}

/// Whether `p1 -> p2 -> p3` makes a counter-clockwise turn.
pub fn counterclockwise(p1: Point, p2: Point, p3: Point) -> bool {
    orientation(p1, p2, p3) > 0.0
}

/// Whether `p2` is collinear with, and bounded by, the segment `p1 p3`.
pub fn between(p1: Point, p2: Point, p3: Point) -> bool {
    if orientation(p1, p2, p3) != 0.0 {
        return false;
    }

    if p1.x.min(p3.x) > p2.x || p2.x > p1.x.max(p3.x) {
        return false;
    }

    if p1.y.min(p3.y) > p2.y || p2.y > p1.y.max(p3.y) {
        return false;
    }

    true
}

/// Convex hull of a planar point set by gift wrapping.
///
/// The walk starts at the lexicographically smallest point and proceeds
/// counter-clockwise. Points lying on a hull edge are kept as vertices.
/// The polygon is returned without repeating its first vertex.
///
/// Returns an empty vector when there are fewer than three distinct points
/// or when all points are collinear.
///
/// # Complexity
/// O(n·h) for `n` points and `h` hull vertices.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut points = points.to_vec();
    points.sort();
    points.dedup();

    if points.len() < 3 {
        return Vec::new();
    }

    let start = points[0];
    let direction = points[1];
    if points
        .iter()
        .all(|&p| orientation(start, direction, p) == 0.0)
    {
        return Vec::new();
    }

    let mut hull = vec![start];
    loop {
        let last = hull[hull.len() - 1];

        let mut next: Option<Point> = None;
        for &point in &points {
            if point == last {
                continue;
            }
            next = match next {
                None => Some(point),
                Some(current) => {
                    let turn = orientation(last, current, point);
                    if turn < 0.0 || (turn == 0.0 && between(last, point, current)) {
                        Some(point)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        match next {
            Some(next) if next != start && hull.len() < points.len() => hull.push(next),
            _ => break,
        }
    }

    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_orientation_signs() {
        assert!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)) > 0.0);
        assert!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, -1.0)) < 0.0);
        assert_eq!(orientation(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)), 0.0);
        assert!(counterclockwise(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)));
    }

    #[test]
    fn test_between() {
        assert!(between(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)));
        assert!(between(p(0.0, 0.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!between(p(0.0, 0.0), p(3.0, 3.0), p(2.0, 2.0)));
        assert!(!between(p(0.0, 0.0), p(1.0, 0.5), p(2.0, 2.0)));
    }

    #[test]
    fn test_square_with_interior_point() {
        let points = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 1.0)];
        assert_eq!(
            convex_hull(&points),
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]
        );
    }

    #[test]
    fn test_collinear_boundary_points_kept() {
        let points = [
            p(2.0, 2.0),
            p(1.0, 0.0),
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(0.0, 1.0),
            p(0.0, 2.0),
        ];
        assert_eq!(
            convex_hull(&points),
            vec![
                p(0.0, 0.0),
                p(1.0, 0.0),
                p(2.0, 0.0),
                p(2.0, 2.0),
                p(0.0, 2.0),
                p(0.0, 1.0)
            ]
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(convex_hull(&[]).is_empty());
        assert!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0)]).is_empty());
        assert!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]).is_empty());
        assert!(convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0)]).is_empty());
    }

    #[test]
    fn test_triangle() {
        let hull = convex_hull(&[p(0.0, 3.0), p(0.0, 0.0), p(4.0, 0.0)]);
        assert_eq!(hull, vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)]);
    }

    proptest! {
        #[test]
        fn prop_hull_encloses_points(
            raw in prop::collection::vec((-6i32..6, -6i32..6), 3..40)
        ) {
            let points: Vec<Point> = raw
                .iter()
                .map(|&(x, y)| p(x as f64, y as f64))
                .collect();
            let hull = convex_hull(&points);

            if hull.is_empty() {
                return Ok(());
            }

            for vertex in &hull {
                prop_assert!(points.contains(vertex));
            }

            let n = hull.len();
            for point in &points {
                let on_hull = hull.contains(point);
                for i in 0..n {
                    let turn = orientation(hull[i], hull[(i + 1) % n], *point);
                    if on_hull {
                        prop_assert!(turn >= 0.0);
                    } else {
                        prop_assert!(turn > 0.0, "{} not strictly inside", point);
                    }
                }
            }
        }
    }
}
