//! Cache data structures with TTL support

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::data_fetcher::models::Fixture;

/// A cached fixture plus the bookkeeping needed to judge its freshness
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fixture: Fixture,
    pub inserted_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(fixture: Fixture, ttl: Duration, inserted_at: DateTime<Utc>) -> Self {
        Self {
            fixture,
            inserted_at,
            ttl,
        }
    }

    /// Age of the entry at `now`; zero if `now` predates the insertion
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.inserted_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Fresh while `now - inserted_at <= ttl`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age(now) <= self.ttl
    }

    /// Remaining time until the entry turns stale
    pub fn time_until_expiry(&self, now: DateTime<Utc>) -> Duration {
        self.ttl.saturating_sub(self.age(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_freshness_boundary_is_inclusive() {
        let t0 = TestDataBuilder::base_time();
        let entry = CacheEntry::new(
            TestDataBuilder::fixture(1, "NS"),
            Duration::from_secs(30),
            t0,
        );

        assert!(entry.is_fresh(t0));
        assert!(entry.is_fresh(t0 + chrono::Duration::seconds(30)));
        assert!(!entry.is_fresh(t0 + chrono::Duration::milliseconds(30_001)));
    }

    #[test]
    fn test_clock_going_backwards_counts_as_fresh() {
        let t0 = TestDataBuilder::base_time();
        let entry = CacheEntry::new(TestDataBuilder::fixture(1, "NS"), Duration::ZERO, t0);
        assert!(entry.is_fresh(t0 - chrono::Duration::seconds(5)));
        assert_eq!(entry.age(t0 - chrono::Duration::seconds(5)), Duration::ZERO);
    }

    #[test]
    fn test_time_until_expiry() {
        let t0 = TestDataBuilder::base_time();
        let entry = CacheEntry::new(
            TestDataBuilder::fixture(1, "LIVE"),
            Duration::from_secs(30),
            t0,
        );
        assert_eq!(
            entry.time_until_expiry(t0 + chrono::Duration::seconds(10)),
            Duration::from_secs(20)
        );
        assert_eq!(
            entry.time_until_expiry(t0 + chrono::Duration::seconds(90)),
            Duration::ZERO
        );
    }
}
