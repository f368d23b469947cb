//! Nominatim HTTP adapter for place-name lookups.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GeocodeError, Notice};
use crate::sampler::RegionSampler;
use crate::traits::{Geocoder, RandomSource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    pub base_url: String,
    /// ISO country codes the search is restricted to, comma separated.
    pub country_codes: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            country_codes: "br".to_string(),
            user_agent: "BBStock/1.0 (hackathon)".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn locate(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        let places = self
            .client
            .get(url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("countrycodes", self.config.country_codes.as_str()),
                ("limit", "1"),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())?;

        match places.into_iter().next() {
            Some(place) => place.coordinate().map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<(f64, f64), GeocodeError> {
        match (self.lat.trim().parse::<f64>(), self.lon.trim().parse::<f64>()) {
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => Ok((lat, lon)),
            _ => Err(GeocodeError::InvalidCoordinate {
                lat: self.lat.clone(),
                lon: self.lon.clone(),
            }),
        }
    }
}

/// Looks up `query` and forces the hit into the sampler's region.
///
/// A miss or any failure becomes a [`Notice`]; there is no retry.
pub fn locate_in_region<G, R>(
    geocoder: &G,
    sampler: &RegionSampler,
    query: &str,
    rng: &mut R,
) -> Result<(f64, f64), Notice>
where
    G: Geocoder + ?Sized,
    R: RandomSource + ?Sized,
{
    match geocoder.locate(query) {
        Ok(Some(point)) => Ok(sampler.force_into_boundary(point, rng)),
        Ok(None) => Err(Notice::PlaceNotFound),
        Err(err) => {
            warn!(error = %err, query, "geocoding failed");
            Err(Notice::GeocodingFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedGeocoder(Option<(f64, f64)>);

    impl Geocoder for FixedGeocoder {
        fn locate(&self, _query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
            Ok(self.0)
        }
    }

    struct BrokenGeocoder;

    impl Geocoder for BrokenGeocoder {
        fn locate(&self, _query: &str) -> Result<Option<(f64, f64)>, GeocodeError> {
            Err(GeocodeError::InvalidCoordinate {
                lat: "north".to_string(),
                lon: "west".to_string(),
            })
        }
    }

    #[test]
    fn test_hit_inside_is_kept() {
        let sampler = RegionSampler::brazil();
        let mut rng = StdRng::seed_from_u64(5);
        let recife = (-8.05, -34.88);
        let geocoder = FixedGeocoder(Some(recife));
        let located = locate_in_region(&geocoder, &sampler, "Recife, PE", &mut rng);
        assert_eq!(located, Ok(recife));
    }

    #[test]
    fn test_hit_outside_is_forced_in() {
        let sampler = RegionSampler::brazil();
        let mut rng = StdRng::seed_from_u64(5);
        let geocoder = FixedGeocoder(Some((48.85, 2.35)));
        let located = locate_in_region(&geocoder, &sampler, "Paris", &mut rng).unwrap();
        assert_ne!(located, (48.85, 2.35));
    }

    #[test]
    fn test_miss_is_notice() {
        let sampler = RegionSampler::brazil();
        let mut rng = StdRng::seed_from_u64(5);
        let located = locate_in_region(&FixedGeocoder(None), &sampler, "Atlantis", &mut rng);
        assert_eq!(located, Err(Notice::PlaceNotFound));
    }

    #[test]
    fn test_failure_is_notice() {
        let sampler = RegionSampler::brazil();
        let mut rng = StdRng::seed_from_u64(5);
        let located = locate_in_region(&BrokenGeocoder, &sampler, "Recife", &mut rng);
        assert_eq!(located, Err(Notice::GeocodingFailed));
    }

    #[test]
    fn test_place_coordinate_parsing() {
        let place = NominatimPlace {
            lat: "-8.0578".to_string(),
            lon: " -34.8829 ".to_string(),
        };
        assert_eq!(place.coordinate().unwrap(), (-8.0578, -34.8829));

        let bad = NominatimPlace {
            lat: "abc".to_string(),
            lon: "1".to_string(),
        };
        assert!(bad.coordinate().is_err());
    }
}
