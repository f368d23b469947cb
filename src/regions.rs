//! Built-in demo region: a heavily simplified outline of Brazil.
//!
//! Precision is only good enough to keep demo markers off the ocean and out
//! of neighbouring countries.

use crate::geo::{BoundingBox, Boundary};

/// Sampling envelope, deliberately wider than the outline.
pub const BRAZIL_BBOX: BoundingBox = BoundingBox {
    lat_min: -34.0,
    lat_max: 6.0,
    lon_min: -74.5,
    lon_max: -32.0,
};

/// Approximate geographic centre, used as the sampling fallback and map centre.
pub const BRAZIL_CENTER: (f64, f64) = (-14.2, -51.9);

const BRAZIL_RING: [(f64, f64); 29] = [
    (-33.752, -53.372),
    (-30.216, -57.625),
    (-26.623, -58.618),
    (-22.090, -62.685),
    (-19.356, -65.402),
    (-13.427, -68.673),
    (-9.760, -70.548),
    (-7.535, -73.987),
    (-2.134, -72.880),
    (2.200, -69.945),
    (3.770, -60.020),
    (1.230, -51.660),
    (4.160, -51.640),
    (4.350, -48.500),
    (2.820, -44.900),
    (0.000, -45.000),
    (-1.000, -41.000),
    (-2.800, -39.000),
    (-5.500, -36.000),
    (-8.000, -34.000),
    (-12.500, -38.000),
    (-16.000, -39.500),
    (-19.000, -40.500),
    (-21.500, -41.000),
    (-23.700, -41.400),
    (-25.500, -48.000),
    (-28.500, -48.650),
    (-33.000, -52.000),
    (-33.752, -53.372),
];

/// A named boundary with its sampling envelope and fallback centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub bbox: BoundingBox,
    pub boundary: Boundary,
    pub center: (f64, f64),
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        bbox: BoundingBox,
        boundary: Boundary,
        center: (f64, f64),
    ) -> Self {
        Self {
            name: name.into(),
            bbox,
            boundary,
            center,
        }
    }

    pub fn brazil() -> Self {
        Self::new(
            "Brasil",
            BRAZIL_BBOX,
            Boundary::single(BRAZIL_RING.to_vec()),
            BRAZIL_CENTER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brazil_known_cities() {
        let brazil = Region::brazil();
        // Brasília, São Paulo, Manaus
        assert!(brazil.boundary.contains((-15.79, -47.88)));
        assert!(brazil.boundary.contains((-23.55, -46.63)));
        assert!(brazil.boundary.contains((-3.12, -60.02)));
    }

    #[test]
    fn test_brazil_excludes_neighbours() {
        let brazil = Region::brazil();
        // Buenos Aires, Lima, mid-Atlantic
        assert!(!brazil.boundary.contains((-34.60, -58.38)));
        assert!(!brazil.boundary.contains((-12.05, -77.04)));
        assert!(!brazil.boundary.contains((-10.0, -30.0)));
    }

    #[test]
    fn test_center_is_inside() {
        let brazil = Region::brazil();
        assert!(brazil.boundary.contains(brazil.center));
        assert!(brazil.bbox.contains(brazil.center));
    }

    #[test]
    fn test_envelope_covers_outline() {
        let brazil = Region::brazil();
        let outline = brazil.boundary.bounding_box().unwrap();
        assert!(brazil.bbox.contains((outline.lat_min, outline.lon_min)));
        assert!(brazil.bbox.contains((outline.lat_max, outline.lon_max)));
    }
}
