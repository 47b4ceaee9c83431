use crate::models::GeoPoint;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from the ephemeris provider
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("ephemeris API returned error: {0}")]
    Api(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("ascendant computation returned a degenerate result")]
    DegenerateAscendant,
}

/// Celestial bodies the matching engine asks positions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    pub fn as_str(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
        }
    }
}

/// Provider of ecliptic positions for a given julian day.
///
/// Production uses the HTTP client below; tests substitute stubs.
#[async_trait]
pub trait Ephemeris: Send + Sync {
    /// Ecliptic longitude of a body in degrees [0, 360).
    async fn body_longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError>;

    /// Ascendant longitude in degrees [0, 360) for an observer position.
    async fn ascendant(&self, julian_day: f64, position: GeoPoint) -> Result<f64, EphemerisError>;
}

/// HTTP-backed ephemeris provider.
///
/// Talks to a small computation service exposing `/longitude` and
/// `/ascendant`; the astronomical algorithm behind it is opaque to this
/// crate.
pub struct HttpEphemeris {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LongitudeResponse {
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct AscendantResponse {
    ascendant: f64,
}

impl HttpEphemeris {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    fn check_degrees(value: f64) -> Result<f64, EphemerisError> {
        if value.is_finite() && (0.0..360.0).contains(&value) {
            Ok(value)
        } else {
            Err(EphemerisError::InvalidResponse(format!(
                "longitude {} outside [0, 360)",
                value
            )))
        }
    }
}

#[async_trait]
impl Ephemeris for HttpEphemeris {
    async fn body_longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        let url = format!(
            "{}/longitude?jd={}&body={}",
            self.base_url.trim_end_matches('/'),
            julian_day,
            body.as_str()
        );

        tracing::debug!("Fetching {} longitude at jd {}", body.as_str(), julian_day);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(EphemerisError::Api(format!(
                "longitude request failed: {}",
                response.status()
            )));
        }

        let parsed: LongitudeResponse = response
            .json()
            .await
            .map_err(|e| EphemerisError::InvalidResponse(e.to_string()))?;

        Self::check_degrees(parsed.longitude)
    }

    async fn ascendant(&self, julian_day: f64, position: GeoPoint) -> Result<f64, EphemerisError> {
        let url = format!(
            "{}/ascendant?jd={}&lat={}&lon={}",
            self.base_url.trim_end_matches('/'),
            julian_day,
            position.latitude,
            position.longitude
        );

        tracing::debug!("Fetching ascendant at jd {}", julian_day);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(EphemerisError::Api(format!(
                "ascendant request failed: {}",
                response.status()
            )));
        }

        let parsed: AscendantResponse = response
            .json()
            .await
            .map_err(|e| EphemerisError::InvalidResponse(e.to_string()))?;

        Self::check_degrees(parsed.ascendant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_longitude_parses_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"^/longitude.*".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"longitude": 123.45}"#)
            .create_async()
            .await;

        let ephemeris = HttpEphemeris::new(server.url(), Duration::from_secs(5));
        let longitude = ephemeris
            .body_longitude(2_451_545.0, Body::Moon)
            .await
            .unwrap();

        assert!((longitude - 123.45).abs() < 1e-9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_out_of_range_longitude_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/longitude.*".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"longitude": 400.0}"#)
            .create_async()
            .await;

        let ephemeris = HttpEphemeris::new(server.url(), Duration::from_secs(5));
        let result = ephemeris.body_longitude(2_451_545.0, Body::Moon).await;

        assert!(matches!(result, Err(EphemerisError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/ascendant.*".to_string()))
            .with_status(500)
            .create_async()
            .await;

        let ephemeris = HttpEphemeris::new(server.url(), Duration::from_secs(5));
        let position = GeoPoint { latitude: 37.77, longitude: -122.42 };
        let result = ephemeris.ascendant(2_451_545.0, position).await;

        assert!(matches!(result, Err(EphemerisError::Api(_))));
    }
}
