use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One of the 12 zodiac signs, or `Unknown` when derivation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
    Unknown,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
            Sign::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three derived signs of a birth chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignTriad {
    pub sun: Sign,
    pub moon: Sign,
    pub rising: Sign,
}

/// A user's saved birth chart, keyed by email in the profile store.
///
/// The sign triad is recomputed wholesale on every save, so it is always
/// consistent with the stored date, time and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthChart {
    pub email: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    #[serde(rename = "birthTime")]
    pub birth_time: NaiveTime,
    #[serde(rename = "birthLocation")]
    pub birth_location: String,
    pub signs: SignTriad,
}

/// Geocoded coordinates for a birth location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of a top-K compatibility ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub email: String,
    pub score: u8,
    pub tier: String,
    pub signs: SignTriad,
}
