use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Upstream transport and response errors
    #[error("Upstream unavailable: {message} (URL: {url})")]
    UpstreamUnavailable {
        url: String,
        message: String,
        timed_out: bool,
    },

    #[error("Upstream returned status {status} (URL: {url})")]
    UpstreamBadStatus { status: u16, url: String },

    #[error("Upstream returned malformed response: {message} (URL: {url})")]
    UpstreamMalformedResponse { message: String, url: String },

    // Local decisions
    #[error("Rate limited: no upstream call allowed for {scope} and no cached data to serve")]
    RateLimited { scope: String },

    #[error("Fixture not found: {fixture_id}")]
    NotFound { fixture_id: String },

    #[error("Background task failed: {0}")]
    BackgroundTask(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date/time parsing error: {0}")]
    DateTimeParse(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a date/time parsing error with context
    pub fn datetime_parse_error(msg: impl Into<String>) -> Self {
        Self::DateTimeParse(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a transport-level upstream error (connection refused, DNS, reset)
    pub fn upstream_unavailable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            url: url.into(),
            message: message.into(),
            timed_out: false,
        }
    }

    /// Create an upstream timeout error
    pub fn upstream_timeout(url: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            url: url.into(),
            message: "request timed out".to_string(),
            timed_out: true,
        }
    }

    /// Create an upstream non-2xx status error
    pub fn upstream_bad_status(status: u16, url: impl Into<String>) -> Self {
        Self::UpstreamBadStatus {
            status,
            url: url.into(),
        }
    }

    /// Create an upstream malformed response error
    pub fn upstream_malformed(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UpstreamMalformedResponse {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a rate limited error for a limiter scope
    pub fn rate_limited(scope: impl Into<String>) -> Self {
        Self::RateLimited {
            scope: scope.into(),
        }
    }

    /// Create a not found error for a fixture
    pub fn not_found(fixture_id: impl Into<String>) -> Self {
        Self::NotFound {
            fixture_id: fixture_id.into(),
        }
    }

    /// Create a background task error with context
    pub fn background_task(msg: impl Into<String>) -> Self {
        Self::BackgroundTask(msg.into())
    }

    /// Check if error came from talking to the upstream provider
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamUnavailable { .. }
                | AppError::UpstreamBadStatus { .. }
                | AppError::UpstreamMalformedResponse { .. }
        )
    }

    /// Check if error is a local rate limiting decision
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::RateLimited { .. })
    }

    /// Check if error indicates the provider has no such fixture
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_upstream_unavailable_helper() {
        let error = AppError::upstream_unavailable("https://api.example.com/fixtures", "refused");
        assert!(matches!(
            error,
            AppError::UpstreamUnavailable {
                timed_out: false,
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "Upstream unavailable: refused (URL: https://api.example.com/fixtures)"
        );
    }

    #[test]
    fn test_upstream_timeout_helper() {
        let error = AppError::upstream_timeout("https://api.example.com/fixtures");
        assert!(matches!(
            error,
            AppError::UpstreamUnavailable { timed_out: true, .. }
        ));
        assert!(error.is_upstream_failure());
    }

    #[test]
    fn test_upstream_bad_status_helper() {
        let error = AppError::upstream_bad_status(503, "https://api.example.com/fixtures");
        assert_eq!(
            error.to_string(),
            "Upstream returned status 503 (URL: https://api.example.com/fixtures)"
        );
        assert!(error.is_upstream_failure());
        assert!(!error.is_rate_limited());
    }

    #[test]
    fn test_rate_limited_helper() {
        let error = AppError::rate_limited("fixture:42");
        assert!(error.is_rate_limited());
        assert!(!error.is_upstream_failure());
        assert!(error.to_string().contains("fixture:42"));
    }

    #[test]
    fn test_not_found_helper() {
        let error = AppError::not_found("42");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Fixture not found: 42");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error: AppError = json_error.into();
        assert!(matches!(error, AppError::Json(_)));
    }
}
