//! Football fixture feed library
//!
//! Fetches fixtures from an external football provider and keeps a
//! per-fixture cache whose TTL depends on match status. Upstream calls are
//! bounded by a rate limiter, and stale cache entries are served when
//! upstream is throttled or failing.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fixture_feed::config::Config;
//! use fixture_feed::data_fetcher::{FetchOptions, FixtureProvider};
//! use fixture_feed::data_fetcher::models::FixtureId;
//! use fixture_feed::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let provider = FixtureProvider::from_config(&config)?;
//!
//!     let lookup = provider
//!         .get_single_fixture(&FixtureId::from(1035037), FetchOptions::default())
//!         .await?;
//!     if lookup.is_stale() {
//!         println!("served from stale cache");
//!     }
//!     println!("{:?}", lookup.fixture.match_stats.result());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{Fixture, FixtureId, FixtureLookup, Freshness, MatchStatus};
pub use data_fetcher::{BackgroundTasks, FetchOptions, FixtureProvider};
pub use error::AppError;

// Re-export cache monitoring types for external tools
pub use data_fetcher::DetailedCacheStats;
pub use data_fetcher::cache::CacheStats;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
