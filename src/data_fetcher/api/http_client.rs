//! Shared reqwest client for the football provider

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

use crate::constants::{HTTP_POOL_MAX_IDLE_PER_HOST, headers};
use crate::error::AppError;

fn header_value(name: &str, value: &str, sensitive: bool) -> Result<HeaderValue, AppError> {
    let mut value = HeaderValue::from_str(value.trim())
        .map_err(|e| AppError::config_error(format!("Invalid value for header {name}: {e}")))?;
    value.set_sensitive(sensitive);
    Ok(value)
}

/// Builds the client every upstream call goes through.
///
/// The host and key headers are attached as defaults, with the key marked
/// sensitive so it never shows up in reqwest's debug output. The timeout
/// covers the whole request, connect included.
pub fn create_upstream_http_client(
    timeout_seconds: u64,
    api_host: &str,
    api_key: &str,
) -> Result<Client, AppError> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        headers::API_HOST,
        header_value(headers::API_HOST, api_host, false)?,
    );
    default_headers.insert(
        headers::API_KEY,
        header_value(headers::API_KEY, api_key, true)?,
    );

    Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| AppError::config_error(format!("Failed to build HTTP client: {e}")))
}
