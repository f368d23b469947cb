//! Region geometry: bounding boxes, boundaries and the membership test.
//!
//! Coordinates are (latitude, longitude) tuples throughout, matching the
//! order used by the map layer.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Guards the division for edges parallel to the ray.
const EDGE_EPSILON: f64 = 1e-12;

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    pub fn contains(&self, point: (f64, f64)) -> bool {
        let (lat, lon) = point;
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }
}

/// One or more closed rings approximating a region.
///
/// Rings are implicitly closed: the last vertex connects back to the first,
/// and repeating the first vertex at the end is harmless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    rings: Vec<Vec<(f64, f64)>>,
}

impl Boundary {
    pub fn new(rings: Vec<Vec<(f64, f64)>>) -> Self {
        Self { rings }
    }

    pub fn single(ring: Vec<(f64, f64)>) -> Self {
        Self { rings: vec![ring] }
    }

    pub fn rings(&self) -> &[Vec<(f64, f64)>] {
        &self.rings
    }

    /// Smallest box enclosing every vertex, `None` when there are none.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points = self.rings.iter().flatten();
        let &(lat, lon) = points.next()?;
        let mut bbox = BoundingBox::new(lat, lat, lon, lon);
        for &(lat, lon) in points {
            bbox.lat_min = bbox.lat_min.min(lat);
            bbox.lat_max = bbox.lat_max.max(lat);
            bbox.lon_min = bbox.lon_min.min(lon);
            bbox.lon_max = bbox.lon_max.max(lon);
        }
        Some(bbox)
    }

    /// Ray-casting membership test, see [`inside`].
    pub fn contains(&self, point: (f64, f64)) -> bool {
        inside(point, self)
    }
}

/// Whether `point` is enclosed by `boundary`.
///
/// Crossings are counted across all rings with a single parity flag, so a
/// point inside two nested rings (a hole) is outside. Rings with fewer than
/// three vertices are ignored. Points exactly on an edge may land either way.
pub fn inside(point: (f64, f64), boundary: &Boundary) -> bool {
    let (lat, lon) = point;
    let mut is_inside = false;

    for ring in boundary.rings().iter().filter(|ring| ring.len() >= 3) {
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[j];

            let straddles = (yi > lon) != (yj > lon);
            if straddles && lat < (xj - xi) * (lon - yi) / (yj - yi + EDGE_EPSILON) + xi {
                is_inside = !is_inside;
            }
            j = i;
        }
    }

    is_inside
}

/// Keeps the points that fall inside `boundary`, preserving order.
pub fn filter_inside(points: &[(f64, f64)], boundary: &Boundary) -> Vec<(f64, f64)> {
    points
        .par_iter()
        .copied()
        .filter(|point| inside(*point, boundary))
        .collect()
}
