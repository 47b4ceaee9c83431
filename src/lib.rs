//! Astro Match - astrological compatibility matching service
//!
//! This library derives zodiac sign triads (sun, moon, rising) from birth
//! data and ranks users by pairwise compatibility, with a two-tier result
//! cache (geocoded locations and pairwise scores) and a concurrent bounded
//! top-K selection.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compatibility_score, sign_from_longitude, sun_sign, ScoreWeights, TopSelection};
pub use crate::models::{BirthChart, ScoredMatch, Sign, SignTriad};
pub use crate::services::{MatchingEngine, ProfileStore, ScoreCache, SignDeriver};
