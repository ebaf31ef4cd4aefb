pub mod http_client;
pub mod provider;
pub mod upstream;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_upstream_http_client;
pub use provider::{DetailedCacheStats, FetchOptions, FixtureProvider};
pub use upstream::UpstreamClient;
