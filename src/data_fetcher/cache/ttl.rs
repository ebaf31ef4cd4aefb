//! Status-dependent freshness policy for cached fixtures

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::cache_ttl;
use crate::data_fetcher::models::{MatchStatus, StatusGroup};

/// Maps a fixture's match status to how long its cached value stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlPolicy {
    pub live: Duration,
    pub finished: Duration,
    pub pending: Duration,
    pub default: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            live: Duration::from_secs(cache_ttl::LIVE_MATCH_SECONDS),
            finished: Duration::from_secs(cache_ttl::FINISHED_MATCH_SECONDS),
            pending: Duration::from_secs(cache_ttl::PENDING_MATCH_SECONDS),
            default: Duration::from_secs(cache_ttl::DEFAULT_SECONDS),
        }
    }
}

impl TtlPolicy {
    pub fn ttl_for(&self, status: &MatchStatus) -> Duration {
        match status.group() {
            StatusGroup::Live => self.live,
            StatusGroup::Finished => self.finished,
            StatusGroup::Pending => self.pending,
            StatusGroup::Unknown => self.default,
        }
    }
}

/// TTL under the default policy
pub fn ttl_for(status: &MatchStatus) -> Duration {
    TtlPolicy::default().ttl_for(status)
}
