// Core algorithm exports
pub mod compat;
pub mod selection;
pub mod signs;

pub use compat::{compatibility_score, is_compatible, tier_label, ScoreWeights};
pub use selection::{RankedCandidate, TopSelection};
pub use signs::{julian_day, sign_from_longitude, sun_sign};
