// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Mode};
use fixture_feed::config::Config;
use fixture_feed::data_fetcher::{BackgroundTasks, FixtureProvider};
use fixture_feed::error::AppError;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };

    let mode = args.mode();
    if mode == Mode::ListConfig {
        return commands::handle_list_config_command(&config);
    }

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) =
        logging::setup_logging(&args, config.log_file_path.as_deref()).await?;
    info!(
        "{} {} starting, logging to {}",
        fixture_feed::NAME,
        fixture_feed::VERSION,
        log_file_path
    );

    let provider = FixtureProvider::from_config(&config)?;
    let tasks = BackgroundTasks::start(
        Arc::clone(provider.cache()),
        Arc::clone(provider.rate_limiter()),
        Arc::clone(provider.clock()),
        config.cache.sweep_interval(),
        config.cache.prune_interval(),
    );

    let result = match &mode {
        Mode::Fixture { id, options } => {
            commands::handle_fixture_command(&provider, id, *options).await
        }
        Mode::Live => commands::handle_live_command(&provider).await,
        Mode::List { from, to, scope } => {
            commands::handle_list_command(&provider, from.as_deref(), to.as_deref(), scope).await
        }
        Mode::Stats => commands::handle_stats_command(&provider).await,
        Mode::Watch {
            id,
            options,
            interval_seconds,
        } => commands::handle_watch_command(&provider, id, *options, *interval_seconds).await,
        Mode::ListConfig => commands::handle_list_config_command(&config),
    };

    tasks.shutdown().await;

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
