//! URL building utilities for provider endpoints

use chrono::NaiveDate;

fn join(base_url: &str, endpoint: &str) -> String {
    format!("{}/{endpoint}", base_url.trim_end_matches('/'))
}

/// Builds the URL for a single fixture lookup. The id is percent-encoded.
///
/// # Example
/// ```
/// use fixture_feed::data_fetcher::api::build_fixture_url;
///
/// let url = build_fixture_url("https://api.example.com/", "100");
/// assert_eq!(url, "https://api.example.com/fixtures?id=100");
///
/// let url = build_fixture_url("https://api.example.com", "1&live=all");
/// assert_eq!(url, "https://api.example.com/fixtures?id=1%26live%3Dall");
/// ```
pub fn build_fixture_url(base_url: &str, fixture_id: &str) -> String {
    join(
        base_url,
        &format!("fixtures?id={}", urlencoding::encode(fixture_id)),
    )
}

/// Builds the URL listing one league's fixtures between two dates (inclusive).
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use fixture_feed::data_fetcher::api::build_league_fixtures_url;
///
/// let from = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
/// let to = NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
/// let url = build_league_fixtures_url("https://api.example.com", 39, 2025, from, to);
/// assert_eq!(
///     url,
///     "https://api.example.com/fixtures?league=39&season=2025&from=2025-08-15&to=2025-08-22"
/// );
/// ```
pub fn build_league_fixtures_url(
    base_url: &str,
    league_id: i64,
    season: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> String {
    join(
        base_url,
        &format!(
            "fixtures?league={league_id}&season={season}&from={}&to={}",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        ),
    )
}

/// Builds the URL for every fixture currently in play.
pub fn build_live_fixtures_url(base_url: &str) -> String {
    join(base_url, "fixtures?live=all")
}

/// Builds the URL for a fixture's prediction. The id is percent-encoded.
pub fn build_prediction_url(base_url: &str, fixture_id: &str) -> String {
    join(
        base_url,
        &format!("predictions?fixture={}", urlencoding::encode(fixture_id)),
    )
}
