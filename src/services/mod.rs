// Service exports
pub mod deriver;
pub mod engine;
pub mod ephemeris;
pub mod geocode;
pub mod profiles;
pub mod score_cache;

pub use deriver::{DeriveError, DerivedSigns, SignDeriver};
pub use engine::{EngineError, MatchingEngine, TopMatches};
pub use ephemeris::{Body, Ephemeris, EphemerisError, HttpEphemeris};
pub use geocode::{GeocodeError, GeocodeService};
pub use profiles::{normalize_user_key, ProfileStore};
pub use score_cache::{PairKey, ScoreCache};
