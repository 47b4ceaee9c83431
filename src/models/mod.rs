// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BirthChart, GeoPoint, ScoredMatch, Sign, SignTriad};
pub use requests::{DeriveSignsRequest, SaveChartRequest, TopMatchesQuery};
pub use responses::{
    DeriveSignsResponse, ErrorResponse, HealthResponse, ScoreResponse, TopMatchesResponse,
};
