use serde::Serialize;

use super::fixture::Fixture;

/// Why a stale value was served instead of fresh data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum StaleReason {
    /// The rate limiter refused the upstream call
    RateLimited,
    /// The upstream call failed; carries the error message
    UpstreamFailure(String),
}

/// Where the value of a lookup came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum Freshness {
    /// Fetched from upstream by this call
    Fetched,
    /// Served from a cache entry within its TTL
    Cached,
    /// Served from a cache entry that may be past its TTL
    Stale(StaleReason),
}

/// Result of a single-fixture lookup.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureLookup {
    pub fixture: Fixture,
    pub freshness: Freshness,
}

impl FixtureLookup {
    pub fn fetched(fixture: Fixture) -> Self {
        Self {
            fixture,
            freshness: Freshness::Fetched,
        }
    }

    pub fn cached(fixture: Fixture) -> Self {
        Self {
            fixture,
            freshness: Freshness::Cached,
        }
    }

    pub fn stale(fixture: Fixture, reason: StaleReason) -> Self {
        Self {
            fixture,
            freshness: Freshness::Stale(reason),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self.freshness, Freshness::Stale(_))
    }

    pub fn into_fixture(self) -> Fixture {
        self.fixture
    }
}
