//! Reference coordinates for region membership tests.
//!
//! Interior points are state capitals well away from the simplified
//! outline; exterior points are neighbouring capitals or open ocean.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

pub const INSIDE_BRAZIL: &[Location] = &[
    Location::new("Brasília", -15.79, -47.88),
    Location::new("São Paulo", -23.55, -46.63),
    Location::new("Manaus", -3.12, -60.02),
];

pub const OUTSIDE_BRAZIL: &[Location] = &[
    Location::new("Buenos Aires", -34.60, -58.38),
    Location::new("Lima", -12.05, -77.04),
    Location::new("Mid-Atlantic", -10.0, -30.0),
];
