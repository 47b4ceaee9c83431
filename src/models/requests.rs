use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to save a user's birth chart
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveChartRequest {
    #[validate(email)]
    pub email: String,
    #[serde(alias = "birth_date", rename = "birthDate")]
    pub birth_date: NaiveDate,
    #[serde(alias = "birth_time", rename = "birthTime")]
    pub birth_time: NaiveTime,
    #[validate(length(min = 1))]
    #[serde(alias = "birth_location", rename = "birthLocation")]
    pub birth_location: String,
}

/// Request to derive signs without saving a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveSignsRequest {
    #[serde(alias = "birth_date", rename = "birthDate")]
    pub birth_date: NaiveDate,
    #[serde(default)]
    #[serde(alias = "birth_time", rename = "birthTime")]
    pub birth_time: Option<NaiveTime>,
    #[serde(default)]
    #[serde(alias = "birth_location", rename = "birthLocation")]
    pub birth_location: Option<String>,
}

/// Query parameters for the top matches endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TopMatchesQuery {
    pub email: String,
    pub k: Option<usize>,
}
