//! Fixture orchestration: cache, rate limiter, upstream fetch and stale fallback

use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::upstream::UpstreamClient;
use crate::config::Config;
use crate::data_fetcher::cache::{CacheStats, FixtureCache, TtlPolicy};
use crate::data_fetcher::clock::{Clock, SystemClock};
use crate::data_fetcher::models::{
    DateRange, Fixture, FixtureId, FixtureLookup, GroupedFixtures, LeagueGroup, LeagueScope,
    Prediction, StaleReason, TrackedLeague,
};
use crate::data_fetcher::rate_limiter::{RateLimiter, RateLimiterStats, ScopeKey};
use crate::error::AppError;

/// Options for [`FixtureProvider::get_single_fixture`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Also fetch the fixture's prediction (best-effort)
    pub include_prediction: bool,
    /// Skip the fresh-cache check and go to upstream
    pub force_refresh: bool,
}

/// Cache snapshot plus limiter snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedCacheStats {
    pub cache: CacheStats,
    pub rate_limiter: RateLimiterStats,
}

/// Serves fixtures from the per-fixture cache when fresh, from upstream when
/// permitted, and from stale cache entries when upstream can't be used.
///
/// Cloning is cheap and every clone shares the same cache and limiter.
#[derive(Clone)]
pub struct FixtureProvider {
    upstream: UpstreamClient,
    cache: Arc<FixtureCache>,
    limiter: Arc<RateLimiter>,
    clock: Arc<dyn Clock>,
    ttl_policy: TtlPolicy,
    leagues: Arc<[TrackedLeague]>,
    season: i32,
    fixture_window_days: u32,
}

impl FixtureProvider {
    /// Builds a provider on the wall clock
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds a provider reading time from `clock`
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let upstream = UpstreamClient::from_config(config)?;
        Ok(Self::new(
            upstream,
            Arc::new(FixtureCache::new(config.cache.max_entries)),
            Arc::new(RateLimiter::new(config.rate_limit)),
            clock,
            config,
        ))
    }

    pub fn new(
        upstream: UpstreamClient,
        cache: Arc<FixtureCache>,
        limiter: Arc<RateLimiter>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            upstream,
            cache,
            limiter,
            clock,
            ttl_policy: config.cache.ttl_policy(),
            leagues: config.leagues.clone().into(),
            season: config.season,
            fixture_window_days: config.fixture_window_days,
        }
    }

    pub fn cache(&self) -> &Arc<FixtureCache> {
        &self.cache
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The configured listing window starting today
    pub fn default_range(&self) -> DateRange {
        DateRange::upcoming(self.clock.now().date_naive(), self.fixture_window_days)
    }

    /// Looks up one fixture.
    ///
    /// Returns fresh cache data when available, otherwise fetches from
    /// upstream if the limiter permits. When the limiter refuses or the fetch
    /// fails, the last cached value is served marked stale; an error is
    /// returned only when nothing has ever been cached for `id`.
    ///
    /// The fetch and cache write run on their own task, so dropping the
    /// returned future doesn't prevent the cache from being populated.
    #[instrument(skip(self), fields(fixture_id = %id))]
    pub async fn get_single_fixture(
        &self,
        id: &FixtureId,
        options: FetchOptions,
    ) -> Result<FixtureLookup, AppError> {
        let now = self.clock.now();

        if !options.force_refresh
            && let Some(fixture) = self.cache.get_fresh(id, now).await
        {
            return Ok(FixtureLookup::cached(fixture));
        }

        let scope = ScopeKey::Fixture(id.clone());
        if !self.limiter.try_acquire(&scope, now).await {
            return match self.cache.get_any(id).await {
                Some(fixture) => {
                    warn!("Rate limited, serving stale fixture {}", id);
                    Ok(FixtureLookup::stale(fixture, StaleReason::RateLimited))
                }
                None => Err(AppError::rate_limited(scope.to_string())),
            };
        }

        let provider = self.clone();
        let task_id = id.clone();
        let include_prediction = options.include_prediction;
        let handle = tokio::spawn(async move {
            provider
                .fetch_and_store(&task_id, include_prediction)
                .await
        });

        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(AppError::background_task(format!(
                "Fetch task for fixture {id} failed: {e}"
            ))),
        };

        match outcome {
            Ok(fixture) => Ok(FixtureLookup::fetched(fixture)),
            Err(err) => match self.cache.get_any(id).await {
                Some(fixture) => {
                    warn!("Upstream failed for fixture {} ({}), serving stale", id, err);
                    Ok(FixtureLookup::stale(
                        fixture,
                        StaleReason::UpstreamFailure(err.to_string()),
                    ))
                }
                None => Err(err),
            },
        }
    }

    async fn fetch_and_store(
        &self,
        id: &FixtureId,
        include_prediction: bool,
    ) -> Result<Fixture, AppError> {
        let mut fixture = self.upstream.fetch_fixture(id).await?;
        if include_prediction {
            let prediction = self.best_effort_prediction(id).await;
            fixture = fixture.with_prediction(prediction);
        }
        self.store(id.clone(), &fixture).await;
        Ok(fixture)
    }

    async fn store(&self, id: FixtureId, fixture: &Fixture) {
        let ttl = self.ttl_policy.ttl_for(fixture.status());
        self.cache
            .put(id, fixture.clone(), ttl, self.clock.now())
            .await;
    }

    /// Prediction for `id`, or `None` when it is missing, refused or failed.
    /// A refused prediction never puts the limiter into cooldown.
    async fn best_effort_prediction(&self, id: &FixtureId) -> Option<Prediction> {
        let scope = ScopeKey::Prediction(id.clone());
        if !self
            .limiter
            .try_acquire_best_effort(&scope, self.clock.now())
            .await
        {
            warn!("Skipping prediction for fixture {}: call budget reserved", id);
            return None;
        }
        match self.upstream.fetch_prediction(id).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Prediction for fixture {} unavailable: {}", id, e);
                None
            }
        }
    }

    /// Lists fixtures in `range` for every tracked league in `scope`.
    ///
    /// One request per league, issued concurrently once the limiter has
    /// granted the whole batch. Any league failing fails the whole listing.
    /// Listed fixtures are written into the per-fixture cache as a side effect.
    #[instrument(skip(self))]
    pub async fn get_fixtures(
        &self,
        range: &DateRange,
        scope: &LeagueScope,
    ) -> Result<GroupedFixtures, AppError> {
        let leagues: Vec<&TrackedLeague> = self
            .leagues
            .iter()
            .filter(|league| scope.includes(league.id))
            .collect();

        if !self
            .limiter
            .try_acquire_n(&ScopeKey::Listing, leagues.len(), self.clock.now())
            .await
        {
            return Err(AppError::rate_limited(ScopeKey::Listing.to_string()));
        }

        let responses = join_all(leagues.iter().map(|league| {
            self.upstream
                .fetch_league_fixtures(league.id, self.season, range)
        }))
        .await;

        let mut groups = Vec::with_capacity(leagues.len());
        for (league, response) in leagues.into_iter().zip(responses) {
            let mut fixtures = response?;
            if fixtures.is_empty() {
                debug!("No fixtures for league {} in {:?}", league.id, range);
                continue;
            }
            fixtures.sort_by_key(|fixture| fixture.timestamp);
            groups.push(self.build_group(league, fixtures).await);
        }

        let total = groups.iter().map(|group| group.fixtures.len()).sum();
        info!(
            "Listed {} fixtures in {} leagues from {} to {}",
            total,
            groups.len(),
            range.from,
            range.to
        );

        Ok(GroupedFixtures {
            from: range.from,
            to: range.to,
            total,
            groups,
        })
    }

    async fn build_group(&self, league: &TrackedLeague, fixtures: Vec<Fixture>) -> LeagueGroup {
        let predictions = join_all(
            fixtures
                .iter()
                .map(|fixture| self.best_effort_prediction_for(fixture)),
        )
        .await;

        let mut enriched = Vec::with_capacity(fixtures.len());
        for (fixture, prediction) in fixtures.into_iter().zip(predictions) {
            let fixture = fixture
                .with_prediction(prediction)
                .with_country(league.clone());
            self.store(fixture.fixture_id(), &fixture).await;
            enriched.push(fixture);
        }

        let (league_name, league_logo) = enriched
            .first()
            .map(|fixture| (fixture.league_name.clone(), fixture.league_logo.clone()))
            .unwrap_or_default();

        LeagueGroup {
            country: league.clone(),
            league_name,
            league_logo,
            fixtures: enriched,
        }
    }

    async fn best_effort_prediction_for(&self, fixture: &Fixture) -> Option<Prediction> {
        self.best_effort_prediction(&fixture.fixture_id()).await
    }

    /// All fixtures currently in play; each is written into the cache
    #[instrument(skip(self))]
    pub async fn get_live_fixtures(&self) -> Result<Vec<Fixture>, AppError> {
        if !self
            .limiter
            .try_acquire(&ScopeKey::Live, self.clock.now())
            .await
        {
            return Err(AppError::rate_limited(ScopeKey::Live.to_string()));
        }

        let mut fixtures = self.upstream.fetch_live_fixtures().await?;
        fixtures.sort_by_key(|fixture| fixture.timestamp);
        for fixture in &fixtures {
            self.store(fixture.fixture_id(), fixture).await;
        }
        info!("Fetched {} live fixtures", fixtures.len());
        Ok(fixtures)
    }

    pub async fn invalidate_fixture_cache(&self, id: &FixtureId) -> bool {
        self.cache.invalidate(id).await
    }

    pub async fn clear_all_fixture_cache(&self) -> usize {
        self.cache.invalidate_all().await
    }

    pub async fn get_cache_stats(&self) -> CacheStats {
        self.cache.stats(self.clock.now()).await
    }

    pub async fn get_rate_limiter_stats(&self) -> RateLimiterStats {
        self.limiter.stats(self.clock.now()).await
    }

    pub async fn get_detailed_cache_stats(&self) -> DetailedCacheStats {
        DetailedCacheStats {
            cache: self.get_cache_stats().await,
            rate_limiter: self.get_rate_limiter_stats().await,
        }
    }
}
