use crate::models::GeoPoint;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from the geocode resolver
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoder returned error: {0}")]
    Api(String),

    #[error("no results for location: {0}")]
    NoResults(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Geocoding service with a TTL-bounded in-memory cache.
///
/// Cache keys are normalized location strings; an entry past its TTL is a
/// miss, never a stale hit. Concurrent misses for the same key may each
/// call the resolver once — a known limitation, accepted instead of a
/// single-flight mechanism.
pub struct GeocodeService {
    base_url: String,
    client: reqwest::Client,
    cache: moka::future::Cache<String, GeoPoint>,
}

/// Nominatim-style search result (coordinates arrive as strings).
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Cache key for a free-text location: trimmed, lowercased.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Percent-encode an address for the resolver query, keeping the commas
/// that separate address parts literal.
fn encode_address(address: &str) -> String {
    urlencoding::encode(address.trim()).replace("%2C", ",")
}

impl GeocodeService {
    pub fn new(base_url: String, ttl: Duration, capacity: u64, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(ttl)
            .build();

        Self {
            base_url,
            client,
            cache,
        }
    }

    /// Resolve a free-text location to coordinates, consulting the cache
    /// first. Each miss calls the resolver exactly once.
    pub async fn resolve(&self, location: &str) -> Result<GeoPoint, GeocodeError> {
        let key = normalize_location(location);

        if let Some(point) = self.cache.get(&key).await {
            tracing::debug!("Geocode cache hit: {}", key);
            return Ok(point);
        }

        tracing::debug!("Geocode cache miss: {}", key);
        let point = self.fetch(location).await?;
        self.cache.insert(key, point).await;
        Ok(point)
    }

    async fn fetch(&self, location: &str) -> Result<GeoPoint, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url.trim_end_matches('/'),
            encode_address(location)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Api(format!(
                "geocode request failed: {}",
                response.status()
            )));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        let place = places
            .first()
            .ok_or_else(|| GeocodeError::NoResults(location.to_string()))?;

        let latitude: f64 = place
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude: {}", place.lat)))?;
        let longitude: f64 = place
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude: {}", place.lon)))?;

        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}
