//! Periodic cache sweep and rate limiter pruning

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use super::cache::FixtureCache;
use super::clock::Clock;
use super::rate_limiter::RateLimiter;

/// Handle to the two maintenance loops. Dropping it leaves them running;
/// call [`BackgroundTasks::shutdown`] to stop them.
#[derive(Debug)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
    token: CancellationToken,
}

impl BackgroundTasks {
    /// Spawns the cache sweeper and the limiter pruner.
    ///
    /// Must be called from within a tokio runtime. The first pass of each
    /// loop runs one full interval after start.
    pub fn start(
        cache: Arc<FixtureCache>,
        limiter: Arc<RateLimiter>,
        clock: Arc<dyn Clock>,
        sweep_interval: Duration,
        prune_interval: Duration,
    ) -> Self {
        let tracker = TaskTracker::new();
        let token = CancellationToken::new();

        let sweep_clock = Arc::clone(&clock);
        tracker.spawn(run_periodic(
            "cache sweep",
            sweep_interval,
            token.clone(),
            move || {
                let cache = Arc::clone(&cache);
                let now = sweep_clock.now();
                async move {
                    cache.sweep(now).await;
                }
            },
        ));

        tracker.spawn(run_periodic(
            "rate limiter prune",
            prune_interval,
            token.clone(),
            move || {
                let limiter = Arc::clone(&limiter);
                let now = clock.now();
                async move {
                    limiter.prune(now).await;
                }
            },
        ));

        tracker.close();
        info!(
            "Background tasks started: sweep every {:?}, prune every {:?}",
            sweep_interval, prune_interval
        );

        Self { tracker, token }
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.tracker.is_empty()
    }

    /// Cancels both loops and waits for them to exit
    pub async fn shutdown(self) {
        self.token.cancel();
        self.tracker.wait().await;
        info!("Background tasks stopped");
    }
}

async fn run_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    token: CancellationToken,
    mut pass: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() yields immediately on the first tick
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("{} loop cancelled", name);
                break;
            }
            _ = ticker.tick() => {
                debug!("Running {}", name);
                pass().await;
            }
        }
    }
}
