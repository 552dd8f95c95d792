//! Service times and time windows for the windowed route model.

use crate::error::{Error, Result};
use crate::geometry::Point;
use rustc_hash::FxHashMap;

/// Service duration spent at a point.
pub trait ServiceTime: Send + Sync {
    fn service(&self, point: &Point) -> f64;
}

impl<F> ServiceTime for F
where
    F: Fn(&Point) -> f64 + Send + Sync,
{
    fn service(&self, point: &Point) -> f64 {
        self(point)
    }
}

/// The `(earliest, latest)` interval during which service must happen.
pub trait TimeWindowLookup: Send + Sync {
    fn window(&self, point: &Point) -> (f64, f64);
}

impl<F> TimeWindowLookup for F
where
    F: Fn(&Point) -> (f64, f64) + Send + Sync,
{
    fn window(&self, point: &Point) -> (f64, f64) {
        self(point)
    }
}

/// Time-window record of one point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub earliest: f64,
    pub latest: f64,
    pub service: f64,
}

impl Window {
    pub fn new(earliest: f64, latest: f64, service: f64) -> Self {
        Self {
            earliest,
            latest,
            service,
        }
    }

    /// Window open at all times, with no service duration.
    pub fn unconstrained() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, 0.0)
    }

    /// Converts a wall-clock `hours:minutes` reading into seconds.
    pub fn from_clock(hours: u32, minutes: u32) -> Result<f64> {
        if hours > 23 {
            return Err(Error::invalid(format!(
                "hours should be in the range [00, 23], got {hours}"
            )));
        }
        if minutes > 59 {
            return Err(Error::invalid(format!(
                "minutes should be in the range [00, 59], got {minutes}"
            )));
        }
        Ok(f64::from(hours * 3600 + minutes * 60))
    }

    /// Validates `earliest <= latest` and a non-negative service time.
    pub fn validate(&self) -> Result<()> {
        if self.earliest > self.latest {
            return Err(Error::invalid(format!(
                "window opens at {} after it closes at {}",
                self.earliest, self.latest
            )));
        }
        if self.service < 0.0 {
            return Err(Error::invalid(format!(
                "service time must be non-negative, got {}",
                self.service
            )));
        }
        Ok(())
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// Owned lookup table of per-point windows, built once before a search.
///
/// Points without an entry are unconstrained with zero service time.
#[derive(Debug, Clone, Default)]
pub struct TimeWindowTable {
    windows: FxHashMap<Point, Window>,
}

impl TimeWindowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, point: Point, window: Window) -> Option<Window> {
        self.windows.insert(point, window)
    }

    /// Builds a table, rejecting malformed windows.
    pub fn try_from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Point, Window)>,
    {
        let mut table = Self::new();
        for (point, window) in entries {
            window.validate()?;
            table.insert(point, window);
        }
        Ok(table)
    }

    pub fn get(&self, point: &Point) -> Window {
        self.windows.get(point).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl ServiceTime for TimeWindowTable {
    fn service(&self, point: &Point) -> f64 {
        self.get(point).service
    }
}

impl TimeWindowLookup for TimeWindowTable {
    fn window(&self, point: &Point) -> (f64, f64) {
        let window = self.get(point);
        (window.earliest, window.latest)
    }
}
