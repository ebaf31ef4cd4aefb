//! Application-wide constants and configuration values
//!
//! This module centralizes the timing, limit and naming constants used by the
//! fixture cache, the rate limiter and the upstream client.

/// Default timeout for upstream HTTP requests in seconds.
/// Must stay below the live TTL.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Upper bound accepted for the HTTP timeout (exclusive of the live TTL)
pub const MAX_HTTP_TIMEOUT_SECONDS: u64 = 29;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Default upstream host header value
pub const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";

/// Default season used for league listings
pub const DEFAULT_SEASON: i32 = 2025;

/// Default number of days covered by an upcoming-fixtures listing
pub const DEFAULT_FIXTURE_WINDOW_DAYS: u32 = 7;

/// Cache TTL (Time To Live) values in seconds, keyed on match status group
pub mod cache_ttl {
    /// TTL for fixtures in play (score and clock change continuously)
    pub const LIVE_MATCH_SECONDS: u64 = 30;

    /// TTL for finished fixtures (15 minutes, result is permanent)
    pub const FINISHED_MATCH_SECONDS: u64 = 900;

    /// TTL for scheduled, postponed or otherwise irregular fixtures (5 minutes)
    pub const PENDING_MATCH_SECONDS: u64 = 300;

    /// TTL for statuses we don't recognise (1 minute)
    pub const DEFAULT_SECONDS: u64 = 60;

    /// Maximum number of fixtures held in the cache
    pub const MAX_ENTRIES: usize = 1000;
}

/// Background maintenance intervals in seconds
pub mod maintenance {
    /// Expired cache entry sweep (every 5 minutes)
    pub const SWEEP_INTERVAL_SECONDS: u64 = 300;

    /// Rate limiter timestamp pruning (every hour)
    pub const PRUNE_INTERVAL_SECONDS: u64 = 3600;
}

/// Rate limiting defaults
pub mod rate_limit {
    /// Length of the short window in seconds
    pub const MINUTE_WINDOW_SECONDS: i64 = 60;

    /// Length of the long window in seconds; also the retention horizon for timestamps
    pub const HOUR_WINDOW_SECONDS: i64 = 3600;

    /// Calls allowed per scope within one minute
    pub const PER_MINUTE_LIMIT: usize = 10;

    /// Calls allowed per scope within one hour
    pub const PER_HOUR_LIMIT: usize = 100;

    /// Calls allowed across all scopes within one minute
    pub const GLOBAL_PER_MINUTE_LIMIT: usize = 60;

    /// Calls allowed across all scopes within one hour
    pub const GLOBAL_PER_HOUR_LIMIT: usize = 450;

    /// Cooldown after a detected breach
    pub const COOLDOWN_SECONDS: u64 = 60;

    /// Global slots per window that predictions may not use, kept for fixture lookups
    pub const BEST_EFFORT_RESERVE: usize = 10;
}

/// Upstream request header names
pub mod headers {
    pub const API_HOST: &str = "x-rapidapi-host";
    pub const API_KEY: &str = "x-rapidapi-key";
}

/// Environment variable names
pub mod env_vars {
    /// Upstream base URL override
    pub const API_URL: &str = "SPORT_API_URL";

    /// Upstream API key override
    pub const API_KEY: &str = "SPORT_API_KEY";

    /// Log file path override
    pub const LOG_FILE: &str = "FIXTURE_FEED_LOG_FILE";

    /// HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "FIXTURE_FEED_HTTP_TIMEOUT";
}
