pub mod fixture_mapping;
pub mod time_formatting;

pub use fixture_mapping::{into_fixture, into_prediction};
pub use time_formatting::format_kickoff_time;
