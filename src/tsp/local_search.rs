//! 2-opt local search.

use super::solver::{Tour, TravellingSalesman};
use crate::error::Result;
use crate::geometry::Point;
use crate::route::close;
use tracing::{debug, trace};

impl TravellingSalesman {
    /// First-improvement 2-opt starting from `[depot] + cities + [depot]`.
    ///
    /// Scans every pair of interior positions `a < b` and reverses the
    /// segment `a..=b`. The first reversal that lowers the cost by more
    /// than `two_opt_epsilon` is kept and the scan restarts; the search
    /// ends after a full scan finds nothing. Each scan recomputes the full
    /// route cost per pair, so it is O(n³) and meant for modest `n`.
    pub fn two_opt(&self, depot: Point, cities: &[Point]) -> Result<Tour> {
        let model = self.model()?;
        let epsilon = self.config.two_opt_epsilon;

        let mut route = close(depot, cities);
        let mut cost = model.cost(&route);
        let last = route.len().saturating_sub(2);
        let mut passes = 0usize;

        'scan: loop {
            passes += 1;
            for a in 1..last {
                for b in a + 1..=last {
                    route[a..=b].reverse();
                    let candidate = model.cost(&route);
                    if candidate < cost - epsilon {
                        trace!(a, b, cost = candidate, "2-opt improvement");
                        cost = candidate;
                        continue 'scan;
                    }
                    route[a..=b].reverse();
                }
            }
            break;
        }

        debug!(cost, passes, "2-opt converged");
        Ok(Tour { route, cost })
    }
}
