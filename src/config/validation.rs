use super::Config;
use crate::constants::MAX_HTTP_TIMEOUT_SECONDS;
use crate::error::AppError;
use std::collections::HashSet;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL and key cannot be empty
/// - API base URL must use http or https
/// - HTTP timeout must be within `1..=29` seconds
/// - Every rate limit, TTL interval and the cache capacity must be non-zero
/// - The best-effort reserve must leave room under the global limits
/// - At least one league is tracked and league ids are unique
/// - If a log file path is provided, its parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_upstream(config)?;
    validate_limits(config)?;
    validate_leagues(config)?;
    validate_log_path(&config.log_file_path)
}

fn validate_upstream(config: &Config) -> Result<(), AppError> {
    let url = config.api_base_url.trim();
    if url.is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "API base URL must start with http:// or https:// (got '{url}')"
        )));
    }
    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error("API key cannot be empty"));
    }
    if config.api_host.trim().is_empty() {
        return Err(AppError::config_error("API host cannot be empty"));
    }
    if !(1..=MAX_HTTP_TIMEOUT_SECONDS).contains(&config.http_timeout_seconds) {
        return Err(AppError::config_error(format!(
            "HTTP timeout must be between 1 and {MAX_HTTP_TIMEOUT_SECONDS} seconds (got {})",
            config.http_timeout_seconds
        )));
    }
    Ok(())
}

fn validate_limits(config: &Config) -> Result<(), AppError> {
    let limits = &config.rate_limit;
    let named = [
        ("rate_limit.per_minute_limit", limits.per_minute_limit),
        ("rate_limit.per_hour_limit", limits.per_hour_limit),
        ("rate_limit.global_per_minute_limit", limits.global_per_minute_limit),
        ("rate_limit.global_per_hour_limit", limits.global_per_hour_limit),
        ("cache.max_entries", config.cache.max_entries),
    ];
    if let Some((name, _)) = named.iter().find(|(_, value)| *value == 0) {
        return Err(AppError::config_error(format!("{name} must be greater than 0")));
    }

    let global_floor = limits
        .global_per_minute_limit
        .min(limits.global_per_hour_limit);
    if limits.best_effort_reserve >= global_floor {
        return Err(AppError::config_error(format!(
            "rate_limit.best_effort_reserve must be below both global limits (got {}, limit {})",
            limits.best_effort_reserve, global_floor
        )));
    }

    let intervals = [
        ("cache.sweep_interval_seconds", config.cache.sweep_interval_seconds),
        ("cache.prune_interval_seconds", config.cache.prune_interval_seconds),
    ];
    if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
        return Err(AppError::config_error(format!("{name} must be greater than 0")));
    }

    if config.fixture_window_days == 0 {
        return Err(AppError::config_error(
            "fixture_window_days must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_leagues(config: &Config) -> Result<(), AppError> {
    if config.leagues.is_empty() {
        return Err(AppError::config_error("At least one league must be configured"));
    }
    let mut seen = HashSet::new();
    for league in &config.leagues {
        if !seen.insert(league.id) {
            return Err(AppError::config_error(format!(
                "League {} is configured more than once",
                league.id
            )));
        }
    }
    Ok(())
}

fn validate_log_path(log_file_path: &Option<String>) -> Result<(), AppError> {
    let Some(log_path) = log_file_path else {
        return Ok(());
    };
    if log_path.is_empty() {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    if let Some(parent) = Path::new(log_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::config_error(format!(
                "Cannot create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}
