//! Planar geometry: the [`Point`] value type, orientation predicates and the
//! gift-wrapping convex hull used by hull-insertion construction.
//!
//! # References
//!
//! - Jarvis (1973), "On the identification of the convex hull of a finite set
//!   of points in the plane"

mod hull;
mod point;

pub use hull::{between, convex_hull, counterclockwise, orientation};
pub use point::Point;
