pub mod api;
pub mod fixture;
pub mod listing;
pub mod lookup;
pub mod status;

// Re-export all public types
pub use api::{
    FixtureApiResponse, FixtureResponse, Goals, PredictionApiResponse, PredictionResponse,
    has_provider_errors,
};
pub use fixture::{Fixture, FixtureId, MatchResult, MatchStats, Prediction, TeamSummary};
pub use listing::{DateRange, GroupedFixtures, LeagueGroup, LeagueScope, TrackedLeague};
pub use lookup::{FixtureLookup, Freshness, StaleReason};
pub use status::{MatchStatus, StatusGroup};
