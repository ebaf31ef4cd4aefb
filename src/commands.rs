use fixture_feed::config::Config;
use fixture_feed::data_fetcher::models::{DateRange, FixtureId, LeagueScope};
use fixture_feed::data_fetcher::{FetchOptions, FixtureProvider};
use fixture_feed::error::AppError;
use serde::Serialize;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handles the --list-config command.
pub fn handle_list_config_command(config: &Config) -> Result<(), AppError> {
    println!("# {}", Config::get_config_path());
    print!("{}", config.to_display_toml()?);
    Ok(())
}

/// Handles the --fixture command.
pub async fn handle_fixture_command(
    provider: &FixtureProvider,
    id: &FixtureId,
    options: FetchOptions,
) -> Result<(), AppError> {
    let lookup = provider.get_single_fixture(id, options).await?;
    if lookup.is_stale() {
        warn!("Fixture {} served from stale cache: {:?}", id, lookup.freshness);
    }
    print_json(&lookup)
}

/// Handles the --live command.
pub async fn handle_live_command(provider: &FixtureProvider) -> Result<(), AppError> {
    let fixtures = provider.get_live_fixtures().await?;
    print_json(&fixtures)
}

/// Handles --list and the default invocation.
///
/// Without explicit dates the configured window starting today is listed.
pub async fn handle_list_command(
    provider: &FixtureProvider,
    from: Option<&str>,
    to: Option<&str>,
    scope: &LeagueScope,
) -> Result<(), AppError> {
    let range = match (from, to) {
        (Some(from), Some(to)) => DateRange::parse(from, to)?,
        _ => provider.default_range(),
    };
    let grouped = provider.get_fixtures(&range, scope).await?;
    print_json(&grouped)
}

/// Handles the --stats command.
pub async fn handle_stats_command(provider: &FixtureProvider) -> Result<(), AppError> {
    print_json(&provider.get_detailed_cache_stats().await)
}

/// Handles the --watch command.
///
/// Polls the fixture every `interval_seconds` and prints each lookup as one
/// JSON line. Individual failures are logged and polling continues; Ctrl-C
/// stops the loop.
pub async fn handle_watch_command(
    provider: &FixtureProvider,
    id: &FixtureId,
    options: FetchOptions,
    interval_seconds: u64,
) -> Result<(), AppError> {
    let mut ticker = interval(Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("Watching fixture {} every {}s", id, interval_seconds);

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Stopped watching fixture {}", id);
                return Ok(());
            }
            _ = ticker.tick() => {
                match provider.get_single_fixture(id, options).await {
                    Ok(lookup) => println!("{}", serde_json::to_string(&lookup)?),
                    Err(e) => warn!("Watch poll for fixture {} failed: {}", id, e),
                }
            }
        }
    }
}
