//! Bounded rejection sampling of demo coordinates inside a region.
//!
//! Sampling never fails: when the attempt budget runs out a jittered point
//! near the region centre is returned instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{inside, BoundingBox, Boundary};
use crate::regions::Region;
use crate::traits::RandomSource;

/// Default number of draws before falling back to the centre.
const DEFAULT_MAX_ATTEMPTS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Draws attempted before using the fallback point.
    pub max_attempts: usize,
    /// Half-width (degrees) of the jitter applied to accepted draws.
    pub jitter: f64,
    /// Half-width (degrees) of the jitter applied to the fallback point.
    pub fallback_jitter: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            jitter: 0.05,
            fallback_jitter: 0.5,
        }
    }
}

/// Draws uniformly inside `bbox` until a point lands inside `boundary`.
///
/// Returns the first accepted draw with a small jitter, or `fallback` with a
/// wider jitter once `config.max_attempts` draws have been rejected.
pub fn sample_inside_boundary<R: RandomSource + ?Sized>(
    bbox: &BoundingBox,
    boundary: &Boundary,
    fallback: (f64, f64),
    config: &SamplerConfig,
    rng: &mut R,
) -> (f64, f64) {
    for _ in 0..config.max_attempts {
        let lat = rng.uniform(bbox.lat_min, bbox.lat_max);
        let lon = rng.uniform(bbox.lon_min, bbox.lon_max);
        if inside((lat, lon), boundary) {
            return (
                lat + rng.uniform(-config.jitter, config.jitter),
                lon + rng.uniform(-config.jitter, config.jitter),
            );
        }
    }

    debug!(
        attempts = config.max_attempts,
        "sampling budget exhausted, using fallback point"
    );
    (
        fallback.0 + rng.uniform(-config.fallback_jitter, config.fallback_jitter),
        fallback.1 + rng.uniform(-config.fallback_jitter, config.fallback_jitter),
    )
}

/// Samples points for one region.
#[derive(Debug, Clone)]
pub struct RegionSampler {
    region: Region,
    config: SamplerConfig,
}

impl RegionSampler {
    pub fn new(region: Region, config: SamplerConfig) -> Self {
        Self { region, config }
    }

    pub fn brazil() -> Self {
        Self::new(Region::brazil(), SamplerConfig::default())
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn contains(&self, point: (f64, f64)) -> bool {
        inside(point, &self.region.boundary)
    }

    /// One point inside the region (or the jittered fallback).
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        sample_inside_boundary(
            &self.region.bbox,
            &self.region.boundary,
            self.region.center,
            &self.config,
            rng,
        )
    }

    /// Returns `point` untouched when it is inside, otherwise a fresh sample.
    pub fn force_into_boundary<R: RandomSource + ?Sized>(
        &self,
        point: (f64, f64),
        rng: &mut R,
    ) -> (f64, f64) {
        if self.contains(point) {
            point
        } else {
            debug!(
                lat = point.0,
                lng = point.1,
                region = %self.region.name,
                "point outside region, resampling"
            );
            self.sample(rng)
        }
    }
}
