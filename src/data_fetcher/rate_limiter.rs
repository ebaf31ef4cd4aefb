//! Sliding-window bookkeeping of upstream calls with a cooldown after breaches

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::constants::rate_limit;
use crate::data_fetcher::models::FixtureId;

/// Logical bucket an upstream call is counted under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    Fixture(FixtureId),
    Prediction(FixtureId),
    Listing,
    Live,
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixture(id) => write!(f, "fixture:{id}"),
            Self::Prediction(id) => write!(f, "prediction:{id}"),
            Self::Listing => f.write_str("listing"),
            Self::Live => f.write_str("live"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Calls allowed per scope within the last minute
    #[serde(default = "default_per_minute_limit")]
    pub per_minute_limit: usize,
    /// Calls allowed per scope within the last hour
    #[serde(default = "default_per_hour_limit")]
    pub per_hour_limit: usize,
    /// Calls allowed across all scopes within the last minute
    #[serde(default = "default_global_per_minute_limit")]
    pub global_per_minute_limit: usize,
    /// Calls allowed across all scopes within the last hour
    #[serde(default = "default_global_per_hour_limit")]
    pub global_per_hour_limit: usize,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    /// Global slots that best-effort calls (predictions) must leave free
    #[serde(default = "default_best_effort_reserve")]
    pub best_effort_reserve: usize,
}

fn default_per_minute_limit() -> usize {
    rate_limit::PER_MINUTE_LIMIT
}

fn default_per_hour_limit() -> usize {
    rate_limit::PER_HOUR_LIMIT
}

fn default_global_per_minute_limit() -> usize {
    rate_limit::GLOBAL_PER_MINUTE_LIMIT
}

fn default_global_per_hour_limit() -> usize {
    rate_limit::GLOBAL_PER_HOUR_LIMIT
}

fn default_cooldown_seconds() -> u64 {
    rate_limit::COOLDOWN_SECONDS
}

fn default_best_effort_reserve() -> usize {
    rate_limit::BEST_EFFORT_RESERVE
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute_limit: default_per_minute_limit(),
            per_hour_limit: default_per_hour_limit(),
            global_per_minute_limit: default_global_per_minute_limit(),
            global_per_hour_limit: default_global_per_hour_limit(),
            cooldown_seconds: default_cooldown_seconds(),
            best_effort_reserve: default_best_effort_reserve(),
        }
    }
}

/// Call timestamps of one scope, oldest first
#[derive(Debug, Default)]
struct RateWindow {
    calls: VecDeque<DateTime<Utc>>,
}

impl RateWindow {
    fn record(&mut self, now: DateTime<Utc>, calls: usize) {
        self.calls.extend(std::iter::repeat_n(now, calls));
    }

    /// Calls made within `window` before `now`
    fn count_within(&self, now: DateTime<Utc>, window: Duration) -> usize {
        let cutoff = now - window;
        self.calls.iter().filter(|call| **call > cutoff).count()
    }

    /// Drops calls at or before `cutoff`; returns how many were dropped
    fn prune(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.calls.len();
        self.calls.retain(|call| *call > cutoff);
        before - self.calls.len()
    }

    fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[derive(Debug, Default)]
struct LimiterState {
    scopes: HashMap<ScopeKey, RateWindow>,
    global: RateWindow,
    last_breach_at: Option<DateTime<Utc>>,
}

/// Snapshot of limiter state for monitoring
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimiterStats {
    pub calls_last_minute: usize,
    pub calls_last_hour: usize,
    pub tracked_scopes: usize,
    pub in_cooldown: bool,
    pub cooldown_remaining_seconds: i64,
    pub last_breach_at: Option<DateTime<Utc>>,
    pub limits: RateLimitConfig,
}

fn minute() -> Duration {
    Duration::seconds(rate_limit::MINUTE_WINDOW_SECONDS)
}

fn hour() -> Duration {
    Duration::seconds(rate_limit::HOUR_WINDOW_SECONDS)
}

/// Bounds outbound call volume per scope and in aggregate.
///
/// A refused [`RateLimiter::can_call`] caused by a limit starts a cooldown
/// during which every check fails. Checks made during the cooldown do not
/// extend it, and best-effort acquisitions never start one.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Mutex<LimiterState>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LimiterState::default()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn cooldown(&self) -> Duration {
        i64::try_from(self.config.cooldown_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    fn in_cooldown(&self, state: &LimiterState, now: DateTime<Utc>) -> bool {
        state
            .last_breach_at
            .is_some_and(|breach| now.signed_duration_since(breach) < self.cooldown())
    }

    /// Name of the first limit `scope` would exceed with `calls` more calls,
    /// counting `reserve` global slots as already taken.
    fn exceeded_limit(
        &self,
        state: &LimiterState,
        scope: &ScopeKey,
        now: DateTime<Utc>,
        calls: usize,
        reserve: usize,
    ) -> Option<&'static str> {
        let (scope_minute, scope_hour) = state
            .scopes
            .get(scope)
            .map(|window| {
                (
                    window.count_within(now, minute()),
                    window.count_within(now, hour()),
                )
            })
            .unwrap_or((0, 0));
        let global_minute = state.global.count_within(now, minute()) + reserve;
        let global_hour = state.global.count_within(now, hour()) + reserve;

        if scope_minute + calls > self.config.per_minute_limit {
            Some("per-minute")
        } else if scope_hour + calls > self.config.per_hour_limit {
            Some("per-hour")
        } else if global_minute + calls > self.config.global_per_minute_limit {
            Some("global per-minute")
        } else if global_hour + calls > self.config.global_per_hour_limit {
            Some("global per-hour")
        } else {
            None
        }
    }

    fn check(
        &self,
        state: &mut LimiterState,
        scope: &ScopeKey,
        now: DateTime<Utc>,
        calls: usize,
    ) -> bool {
        if self.in_cooldown(state, now) {
            debug!("Upstream call for {} refused: limiter in cooldown", scope);
            return false;
        }

        match self.exceeded_limit(state, scope, now, calls, 0) {
            Some(limit) => {
                state.last_breach_at = Some(now);
                warn!(
                    "Rate limit breached for {} ({} limit), cooling down for {}s",
                    scope, limit, self.config.cooldown_seconds
                );
                false
            }
            None => true,
        }
    }

    fn record(state: &mut LimiterState, scope: &ScopeKey, now: DateTime<Utc>, calls: usize) {
        state
            .scopes
            .entry(scope.clone())
            .or_default()
            .record(now, calls);
        state.global.record(now, calls);
    }

    /// Appends a call timestamp for `scope`
    pub async fn record_call(&self, scope: &ScopeKey, now: DateTime<Utc>) {
        let mut state = self.state.lock().await;
        Self::record(&mut state, scope, now, 1);
    }

    /// Whether a call for `scope` is permitted at `now`
    pub async fn can_call(&self, scope: &ScopeKey, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock().await;
        self.check(&mut state, scope, now, 1)
    }

    /// Checks and records in one step; true means the call was recorded
    pub async fn try_acquire(&self, scope: &ScopeKey, now: DateTime<Utc>) -> bool {
        self.try_acquire_n(scope, 1, now).await
    }

    /// Checks and records `calls` calls under one lock. Either all of them
    /// are recorded or none is.
    pub async fn try_acquire_n(&self, scope: &ScopeKey, calls: usize, now: DateTime<Utc>) -> bool {
        if calls == 0 {
            return true;
        }
        let mut state = self.state.lock().await;
        if !self.check(&mut state, scope, now, calls) {
            return false;
        }
        Self::record(&mut state, scope, now, calls);
        true
    }

    /// Acquires a slot for a call the caller can do without.
    ///
    /// Refused when fewer than `best_effort_reserve` global slots would stay
    /// free afterwards. A refusal here never starts a cooldown.
    pub async fn try_acquire_best_effort(&self, scope: &ScopeKey, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock().await;
        if self.in_cooldown(&state, now) {
            return false;
        }
        if let Some(limit) =
            self.exceeded_limit(&state, scope, now, 1, self.config.best_effort_reserve)
        {
            debug!("Best-effort call for {} skipped: {} budget reserved", scope, limit);
            return false;
        }
        Self::record(&mut state, scope, now, 1);
        true
    }

    pub async fn is_in_cooldown(&self, now: DateTime<Utc>) -> bool {
        let state = self.state.lock().await;
        self.in_cooldown(&state, now)
    }

    /// Drops timestamps older than the hour window and forgets empty scopes.
    /// Returns the number of timestamps dropped.
    pub async fn prune(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - hour();
        let mut state = self.state.lock().await;

        let mut dropped = state.global.prune(cutoff);
        for window in state.scopes.values_mut() {
            dropped += window.prune(cutoff);
        }
        let scopes_before = state.scopes.len();
        state.scopes.retain(|_, window| !window.is_empty());
        let scopes_removed = scopes_before - state.scopes.len();

        if dropped > 0 {
            info!(
                "Rate limiter prune dropped {} timestamps and {} idle scopes",
                dropped, scopes_removed
            );
        } else {
            debug!("Rate limiter prune found nothing to drop");
        }
        dropped
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> RateLimiterStats {
        let state = self.state.lock().await;
        let in_cooldown = self.in_cooldown(&state, now);
        let cooldown_remaining_seconds = match state.last_breach_at {
            Some(breach) if in_cooldown => self
                .cooldown()
                .checked_sub(&now.signed_duration_since(breach))
                .map_or(i64::MAX, |remaining| remaining.num_seconds()),
            _ => 0,
        };

        RateLimiterStats {
            calls_last_minute: state.global.count_within(now, minute()),
            calls_last_hour: state.global.count_within(now, hour()),
            tracked_scopes: state.scopes.len(),
            in_cooldown,
            cooldown_remaining_seconds,
            last_breach_at: state.last_breach_at,
            limits: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn limiter(per_minute: usize, per_hour: usize) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            per_minute_limit: per_minute,
            per_hour_limit: per_hour,
            global_per_minute_limit: 1_000,
            global_per_hour_limit: 10_000,
            cooldown_seconds: 60,
            best_effort_reserve: 0,
        })
    }

    fn scope(id: i64) -> ScopeKey {
        ScopeKey::Fixture(FixtureId::from(id))
    }

    #[tokio::test]
    async fn test_calls_under_limit_are_allowed() {
        let limiter = limiter(3, 100);
        let t0 = TestDataBuilder::base_time();

        for i in 0..3 {
            assert!(limiter.can_call(&scope(1), t0).await, "call {i}");
            limiter.record_call(&scope(1), t0).await;
        }
        assert!(!limiter.is_in_cooldown(t0).await);
    }

    #[tokio::test]
    async fn test_minute_limit_breach_enters_cooldown() {
        let limiter = limiter(3, 100);
        let t0 = TestDataBuilder::base_time();

        for i in 0..4 {
            limiter
                .record_call(&scope(1), t0 + Duration::seconds(i))
                .await;
        }

        let check_at = t0 + Duration::seconds(5);
        assert!(!limiter.can_call(&scope(1), check_at).await);
        assert!(limiter.is_in_cooldown(check_at).await);
        // Cooldown is process-wide, other scopes are refused too
        assert!(!limiter.can_call(&scope(2), check_at).await);
    }

    #[tokio::test]
    async fn test_cooldown_is_not_extended_by_checks() {
        let limiter = limiter(1, 100);
        let t0 = TestDataBuilder::base_time();

        limiter.record_call(&scope(1), t0).await;
        assert!(!limiter.can_call(&scope(1), t0).await);

        // Repeated checks during the cooldown
        for secs in [10, 30, 59] {
            assert!(!limiter.can_call(&scope(2), t0 + Duration::seconds(secs)).await);
        }

        // Breach was at t0, so the cooldown ends at t0 + 60s
        let after = t0 + Duration::seconds(61);
        assert!(!limiter.is_in_cooldown(after).await);
        assert!(limiter.can_call(&scope(2), after).await);
    }

    #[tokio::test]
    async fn test_hour_limit() {
        let limiter = limiter(100, 2);
        let t0 = TestDataBuilder::base_time();

        limiter.record_call(&scope(1), t0).await;
        limiter
            .record_call(&scope(1), t0 + Duration::minutes(10))
            .await;

        let check_at = t0 + Duration::minutes(30);
        assert!(!limiter.can_call(&scope(1), check_at).await);

        // Once the first call leaves the hour window and the cooldown is over
        let later = t0 + Duration::minutes(61);
        assert!(limiter.can_call(&scope(1), later).await);
    }

    #[tokio::test]
    async fn test_global_limit_spans_scopes() {
        let limiter = RateLimiter::new(RateLimitConfig {
            per_minute_limit: 10,
            per_hour_limit: 100,
            global_per_minute_limit: 3,
            global_per_hour_limit: 100,
            cooldown_seconds: 60,
            best_effort_reserve: 0,
        });
        let t0 = TestDataBuilder::base_time();

        for id in 1..=3 {
            assert!(limiter.try_acquire(&scope(id), t0).await);
        }
        assert!(!limiter.try_acquire(&ScopeKey::Listing, t0).await);
        assert!(limiter.is_in_cooldown(t0).await);
    }

    #[tokio::test]
    async fn test_try_acquire_records_only_on_success() {
        let limiter = limiter(2, 100);
        let t0 = TestDataBuilder::base_time();

        assert!(limiter.try_acquire(&scope(1), t0).await);
        assert!(limiter.try_acquire(&scope(1), t0).await);
        assert!(!limiter.try_acquire(&scope(1), t0).await);

        let stats = limiter.stats(t0).await;
        assert_eq!(stats.calls_last_minute, 2);
        assert!(stats.in_cooldown);
        assert_eq!(stats.cooldown_remaining_seconds, 60);
        assert_eq!(stats.last_breach_at, Some(t0));
    }

    #[tokio::test]
    async fn test_try_acquire_n_is_all_or_nothing() {
        let limiter = limiter(3, 100);
        let t0 = TestDataBuilder::base_time();

        assert!(limiter.try_acquire_n(&ScopeKey::Listing, 3, t0).await);
        assert_eq!(limiter.stats(t0).await.calls_last_minute, 3);

        let t1 = t0 + Duration::seconds(120);
        assert!(limiter.try_acquire_n(&ScopeKey::Listing, 2, t1).await);
        // Two more would make four within the minute
        assert!(!limiter.try_acquire_n(&ScopeKey::Listing, 2, t1).await);

        let stats = limiter.stats(t1).await;
        assert_eq!(stats.calls_last_minute, 2);
        assert!(stats.in_cooldown);
    }

    #[tokio::test]
    async fn test_try_acquire_n_of_zero_records_nothing() {
        let limiter = limiter(1, 100);
        let t0 = TestDataBuilder::base_time();

        assert!(limiter.try_acquire_n(&ScopeKey::Listing, 0, t0).await);
        assert_eq!(limiter.stats(t0).await.tracked_scopes, 0);
    }

    #[tokio::test]
    async fn test_best_effort_refusal_does_not_cool_down() {
        let limiter = RateLimiter::new(RateLimitConfig {
            global_per_minute_limit: 5,
            best_effort_reserve: 2,
            ..RateLimitConfig::default()
        });
        let t0 = TestDataBuilder::base_time();

        let mut granted = 0;
        for id in 1..=5 {
            if limiter
                .try_acquire_best_effort(&ScopeKey::Prediction(FixtureId::from(id)), t0)
                .await
            {
                granted += 1;
            }
        }

        assert_eq!(granted, 3);
        assert!(!limiter.is_in_cooldown(t0).await);
        // The reserved slots stay available to regular calls
        assert!(limiter.try_acquire(&scope(1), t0).await);
        assert!(limiter.try_acquire(&scope(2), t0).await);
        assert!(!limiter.try_acquire(&scope(3), t0).await);
        assert!(limiter.is_in_cooldown(t0).await);
    }

    #[tokio::test]
    async fn test_best_effort_refused_during_cooldown() {
        let limiter = limiter(1, 100);
        let t0 = TestDataBuilder::base_time();

        assert!(limiter.try_acquire(&scope(1), t0).await);
        assert!(!limiter.try_acquire(&scope(1), t0).await);
        assert!(
            !limiter
                .try_acquire_best_effort(&ScopeKey::Prediction(FixtureId::from(1)), t0)
                .await
        );
    }

    #[tokio::test]
    async fn test_prune_drops_old_timestamps_and_idle_scopes() {
        let limiter = limiter(100, 100);
        let t0 = TestDataBuilder::base_time();

        limiter.record_call(&scope(1), t0).await;
        limiter.record_call(&scope(2), t0).await;
        limiter
            .record_call(&scope(2), t0 + Duration::minutes(50))
            .await;

        let now = t0 + Duration::minutes(61);
        // Two scope entries plus two global entries older than an hour
        assert_eq!(limiter.prune(now).await, 4);

        let stats = limiter.stats(now).await;
        assert_eq!(stats.tracked_scopes, 1);
        assert_eq!(stats.calls_last_hour, 1);
        assert_eq!(stats.calls_last_minute, 0);
    }

    #[tokio::test]
    async fn test_stats_counts_windows() {
        let limiter = limiter(100, 100);
        let t0 = TestDataBuilder::base_time();

        limiter.record_call(&scope(1), t0).await;
        limiter
            .record_call(&ScopeKey::Live, t0 + Duration::minutes(30))
            .await;
        limiter
            .record_call(&ScopeKey::Listing, t0 + Duration::minutes(30))
            .await;

        let stats = limiter.stats(t0 + Duration::minutes(30) + Duration::seconds(10)).await;
        assert_eq!(stats.calls_last_minute, 2);
        assert_eq!(stats.calls_last_hour, 3);
        assert_eq!(stats.tracked_scopes, 3);
        assert!(!stats.in_cooldown);
        assert_eq!(stats.cooldown_remaining_seconds, 0);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(scope(5).to_string(), "fixture:5");
        assert_eq!(
            ScopeKey::Prediction(FixtureId::from(5)).to_string(),
            "prediction:5"
        );
        assert_eq!(ScopeKey::Live.to_string(), "live");
    }
}
