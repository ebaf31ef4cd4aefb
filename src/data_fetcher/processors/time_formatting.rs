use chrono::DateTime;
use tracing::warn;

/// Formats a Unix timestamp (seconds) as an HH:MM kickoff time in UTC.
///
/// Out-of-range timestamps fall back to "00:00".
///
/// # Examples
///
/// ```
/// use fixture_feed::data_fetcher::processors::format_kickoff_time;
///
/// assert_eq!(format_kickoff_time(1755284400), "19:00");
/// assert_eq!(format_kickoff_time(i64::MAX), "00:00");
/// ```
pub fn format_kickoff_time(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(kickoff) => kickoff.format("%H:%M").to_string(),
        None => {
            warn!("Kickoff timestamp {} is out of range", timestamp);
            "00:00".to_string()
        }
    }
}
