use crate::core::signs::{julian_day, sign_from_longitude, sun_sign};
use crate::models::{Sign, SignTriad};
use crate::services::ephemeris::{Body, Ephemeris, EphemerisError};
use crate::services::geocode::{GeocodeError, GeocodeService};
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use thiserror::Error;

/// Errors during sign derivation
#[derive(Debug, Error)]
pub enum DeriveError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Signs derivable without a full chart: sun is always present, moon and
/// rising only when birth time and location were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSigns {
    pub sun: Sign,
    pub moon: Option<Sign>,
    pub rising: Option<Sign>,
}

/// Derives the three signs of a birth chart.
///
/// Sun comes from the pure boundary table; moon and rising go through the
/// ephemeris provider, with rising first resolving the birth location via
/// the geocode cache.
pub struct SignDeriver {
    ephemeris: Arc<dyn Ephemeris>,
    geocoder: Arc<GeocodeService>,
}

impl SignDeriver {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, geocoder: Arc<GeocodeService>) -> Self {
        Self {
            ephemeris,
            geocoder,
        }
    }

    pub fn sun_sign(&self, date: NaiveDate) -> Sign {
        sun_sign(date)
    }

    pub async fn moon_sign(&self, date: NaiveDate, time: NaiveTime) -> Result<Sign, DeriveError> {
        let jd = julian_day(date, time);
        let longitude = self.ephemeris.body_longitude(jd, Body::Moon).await?;
        Ok(sign_from_longitude(longitude))
    }

    pub async fn rising_sign(
        &self,
        location: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Sign, DeriveError> {
        let position = self.geocoder.resolve(location).await?;
        let jd = julian_day(date, time);
        let ascendant = self.ephemeris.ascendant(jd, position).await?;

        // An ascendant of exactly 0 is a failed computation, not a valid
        // Aries boundary.
        if ascendant == 0.0 {
            return Err(EphemerisError::DegenerateAscendant.into());
        }

        Ok(sign_from_longitude(ascendant))
    }

    /// Full triad for a chart save; any provider failure aborts the save.
    pub async fn derive_triad(
        &self,
        location: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<SignTriad, DeriveError> {
        let sun = self.sun_sign(date);
        let moon = self.moon_sign(date, time).await?;
        let rising = self.rising_sign(location, date, time).await?;
        Ok(SignTriad { sun, moon, rising })
    }

    /// Partial derivation for ad-hoc queries: moon and rising are only
    /// computed when both time and location are present.
    pub async fn derive_signs(
        &self,
        date: NaiveDate,
        time: Option<NaiveTime>,
        location: Option<&str>,
    ) -> Result<DerivedSigns, DeriveError> {
        let sun = self.sun_sign(date);

        let (moon, rising) = match (time, location) {
            (Some(time), Some(location)) => {
                let moon = self.moon_sign(date, time).await?;
                let rising = self.rising_sign(location, date, time).await?;
                (Some(moon), Some(rising))
            }
            _ => (None, None),
        };

        Ok(DerivedSigns { sun, moon, rising })
    }
}
