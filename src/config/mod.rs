use crate::constants::{self, cache_ttl, env_vars, maintenance};
use crate::data_fetcher::cache::TtlPolicy;
use crate::data_fetcher::models::TrackedLeague;
use crate::data_fetcher::rate_limiter::RateLimitConfig;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Cache TTLs, maintenance intervals and capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_live_ttl")]
    pub live_ttl_seconds: u64,
    #[serde(default = "default_finished_ttl")]
    pub finished_ttl_seconds: u64,
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_seconds: u64,
    #[serde(default = "default_unknown_ttl")]
    pub default_ttl_seconds: u64,
    /// How often expired entries are swept out
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// How often old rate limiter timestamps are pruned
    #[serde(default = "default_prune_interval")]
    pub prune_interval_seconds: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_live_ttl() -> u64 {
    cache_ttl::LIVE_MATCH_SECONDS
}

fn default_finished_ttl() -> u64 {
    cache_ttl::FINISHED_MATCH_SECONDS
}

fn default_pending_ttl() -> u64 {
    cache_ttl::PENDING_MATCH_SECONDS
}

fn default_unknown_ttl() -> u64 {
    cache_ttl::DEFAULT_SECONDS
}

fn default_sweep_interval() -> u64 {
    maintenance::SWEEP_INTERVAL_SECONDS
}

fn default_prune_interval() -> u64 {
    maintenance::PRUNE_INTERVAL_SECONDS
}

fn default_max_entries() -> usize {
    cache_ttl::MAX_ENTRIES
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            live_ttl_seconds: default_live_ttl(),
            finished_ttl_seconds: default_finished_ttl(),
            pending_ttl_seconds: default_pending_ttl(),
            default_ttl_seconds: default_unknown_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
            prune_interval_seconds: default_prune_interval(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            live: Duration::from_secs(self.live_ttl_seconds),
            finished: Duration::from_secs(self.finished_ttl_seconds),
            pending: Duration::from_secs(self.pending_ttl_seconds),
            default: Duration::from_secs(self.default_ttl_seconds),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }

    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval_seconds)
    }
}

/// Configuration structure for the application.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the football provider, e.g. `https://v3.football.api-sports.io/`
    pub api_base_url: String,
    /// Provider API key, sent in the `x-rapidapi-key` header
    pub api_key: String,
    /// Value for the `x-rapidapi-host` header
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for upstream requests
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    #[serde(default = "default_season")]
    pub season: i32,
    /// Days covered by the default upcoming-fixtures listing
    #[serde(default = "default_fixture_window_days")]
    pub fixture_window_days: u32,
    #[serde(default = "TrackedLeague::default_set")]
    pub leagues: Vec<TrackedLeague>,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_api_host() -> String {
    constants::DEFAULT_API_HOST.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_season() -> i32 {
    constants::DEFAULT_SEASON
}

fn default_fixture_window_days() -> u32 {
    constants::DEFAULT_FIXTURE_WINDOW_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_key: String::new(),
            api_host: default_api_host(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            season: default_season(),
            fixture_window_days: default_fixture_window_days(),
            leagues: TrackedLeague::default_set(),
            rate_limit: RateLimitConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    ///
    /// # Environment Variables
    /// - `SPORT_API_URL` - Override provider base URL
    /// - `SPORT_API_KEY` - Override provider API key
    /// - `FIXTURE_FEED_LOG_FILE` - Override log file path
    /// - `FIXTURE_FEED_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    ///
    /// # Notes
    /// - Without a config file, `SPORT_API_URL` and `SPORT_API_KEY` alone are enough
    /// - Environment variables take precedence over config file values
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(&get_config_path()).await
    }

    /// Loads configuration from a specific file, falling back to the
    /// environment when the file doesn't exist.
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            let api_base_url = std::env::var(env_vars::API_URL).ok();
            let api_key = std::env::var(env_vars::API_KEY).ok();
            match (api_base_url, api_key) {
                (Some(api_base_url), Some(api_key)) => Config {
                    api_base_url,
                    api_key,
                    ..Config::default()
                },
                _ => {
                    return Err(AppError::config_error(format!(
                        "No config file at {config_path} and {} / {} are not both set",
                        env_vars::API_URL,
                        env_vars::API_KEY
                    )));
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_base_url) = std::env::var(env_vars::API_URL) {
            self.api_base_url = api_base_url;
        }

        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = api_key;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Copy of the configuration that is safe to print
    pub fn redacted(&self) -> Self {
        let masked = match self.api_key.chars().count() {
            0 => String::new(),
            1..=4 => "****".to_string(),
            _ => format!("{}****", self.api_key.chars().take(4).collect::<String>()),
        };
        Self {
            api_key: masked,
            ..self.clone()
        }
    }

    /// Renders the configuration as TOML with the API key masked
    pub fn to_display_toml(&self) -> Result<String, AppError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: tests touching the environment run under #[serial]
        unsafe {
            std::env::remove_var(env_vars::API_URL);
            std::env::remove_var(env_vars::API_KEY);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_load_from_file_with_defaults() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
api_base_url = "https://v3.football.api-sports.io/"
api_key = "secret-key"
"#,
        )
        .await
        .unwrap();

        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.api_host, constants::DEFAULT_API_HOST);
        assert_eq!(config.http_timeout_seconds, constants::DEFAULT_HTTP_TIMEOUT_SECONDS);
        assert_eq!(config.leagues.len(), 3);
        assert_eq!(config.rate_limit, RateLimitConfig::default());
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[tokio::test]
    #[serial]
    async fn test_load_from_file_with_sections() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
api_base_url = "http://localhost:9000"
api_key = "k"
season = 2024

[[leagues]]
id = 78
name = "Germany"
code = "DE"

[rate_limit]
per_minute_limit = 2
cooldown_seconds = 120

[cache]
live_ttl_seconds = 15
max_entries = 50
"#,
        )
        .await
        .unwrap();

        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.season, 2024);
        assert_eq!(config.leagues, vec![TrackedLeague::new(78, "Germany", "DE")]);
        assert_eq!(config.rate_limit.per_minute_limit, 2);
        assert_eq!(config.rate_limit.cooldown_seconds, 120);
        assert_eq!(
            config.rate_limit.per_hour_limit,
            crate::constants::rate_limit::PER_HOUR_LIMIT
        );
        assert_eq!(config.cache.ttl_policy().live, Duration::from_secs(15));
        assert_eq!(config.cache.max_entries, 50);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_file() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            "api_base_url = \"https://a.example.com\"\napi_key = \"file-key\"\n",
        )
        .await
        .unwrap();

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::API_KEY, "env-key");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
        }
        let config = Config::load_from_path(path.to_str().unwrap()).await.unwrap();
        clear_env();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.http_timeout_seconds, 5);
        assert_eq!(config.api_base_url, "https://a.example.com");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_only_config() {
        clear_env();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let err = Config::load_from_path(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::API_URL, "https://env.example.com/");
            std::env::set_var(env_vars::API_KEY, "env-key");
        }
        let config = Config::load_from_path(missing.to_str().unwrap()).await.unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "https://env.example.com/");
        assert_eq!(config.leagues, TrackedLeague::default_set());
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_file_is_rejected() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "api_base_url = \"ftp://nope\"\napi_key = \"k\"\n")
            .await
            .unwrap();

        let err = Config::load_from_path(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_redacted_masks_key() {
        let config = Config {
            api_base_url: "https://a.example.com".to_string(),
            api_key: "abcdef123456".to_string(),
            ..Config::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.api_key, "abcd****");
        assert_eq!(redacted.api_base_url, config.api_base_url);

        let toml = config.to_display_toml().unwrap();
        assert!(!toml.contains("abcdef123456"));

        let short = Config {
            api_key: "abc".to_string(),
            ..Config::default()
        };
        assert_eq!(short.redacted().api_key, "****");
    }
}
