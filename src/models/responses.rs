use crate::models::domain::{ScoredMatch, Sign};
use serde::{Deserialize, Serialize};

/// Response for the derive-signs endpoint; moon and rising are omitted
/// when no birth time and location were supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveSignsResponse {
    pub sun: Sign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon: Option<Sign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rising: Option<Sign>,
}

/// Response for the pairwise score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "userA")]
    pub user_a: String,
    #[serde(rename = "userB")]
    pub user_b: String,
    pub score: u8,
    pub tier: String,
}

/// Response for the top matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub matches: Vec<ScoredMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
