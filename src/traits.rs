//! Core seams for the stock planner.
//!
//! These are intentionally minimal. Concrete apps should implement them for
//! their own data sources; the crate ships one implementation of each.

use rand::Rng;

use crate::catalog::ProductEntry;
use crate::error::GeocodeError;

/// Source of uniform random numbers.
///
/// Every random decision in the crate goes through this trait so callers can
/// pass a seeded generator and get reproducible output.
pub trait RandomSource {
    /// Uniform float in `[min, max]`. Bounds may be given in either order.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Uniform integer in `[min, max]` (inclusive).
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi - lo + 1) as f64;
        let offset = (self.uniform(0.0, 1.0) * span).floor() as i64;
        lo + offset.min(hi - lo)
    }

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.uniform(0.0, 1.0) > 0.5
    }

    /// Picks one element, `None` for an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.uniform_int(0, items.len() as i64 - 1) as usize;
        items.get(index)
    }
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if !(lo.is_finite() && hi.is_finite()) || lo == hi {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Resolves a free-text place name to a single coordinate.
pub trait Geocoder {
    /// Best match as (lat, lng), `Ok(None)` when nothing matched.
    fn locate(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError>;
}

/// Read-only product reference data keyed by product code.
pub trait ProductLookup {
    fn entry(&self, code: &str) -> Option<&ProductEntry>;
}
