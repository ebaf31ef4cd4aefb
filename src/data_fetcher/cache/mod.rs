pub mod fixture_cache;
pub mod ttl;
pub mod types;

pub use fixture_cache::{CacheStats, FixtureCache};
pub use ttl::{TtlPolicy, ttl_for};
pub use types::CacheEntry;
