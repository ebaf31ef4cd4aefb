pub mod api;
pub mod background;
pub mod cache;
pub mod clock;
pub mod models;
pub mod processors;
pub mod rate_limiter;

pub use api::{DetailedCacheStats, FetchOptions, FixtureProvider, UpstreamClient};
pub use background::BackgroundTasks;
pub use clock::{Clock, ManualClock, SystemClock};
pub use models::{Fixture, FixtureId, FixtureLookup, Freshness, StaleReason};
pub use rate_limiter::{RateLimitConfig, RateLimiter, RateLimiterStats, ScopeKey};
