use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use crate::config::Config;
use crate::data_fetcher::models::api::{
    Comparison, FixtureInfo, FixtureStatus, HomeAway, LeagueInfo, Percentages, PredictionDetails,
    TeamDetails, Teams, Venue,
};
use crate::data_fetcher::models::{
    Fixture, FixtureResponse, Goals, MatchStats, MatchStatus, PredictionResponse, TeamSummary,
};

/// Kickoff used by every generated fixture: 2025-08-15 19:00 UTC
pub const KICKOFF_TIMESTAMP: i64 = 1_755_284_400;

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Fixed instant used as `t = 0` in time-driven tests (kickoff minus two hours)
    pub fn base_time() -> DateTime<Utc> {
        Utc.timestamp_opt(KICKOFF_TIMESTAMP - 7200, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Domain fixture with the given id and status code
    pub fn fixture(id: i64, status_code: &str) -> Fixture {
        Fixture {
            id,
            date: "2025-08-15T19:00:00+00:00".to_string(),
            timestamp: KICKOFF_TIMESTAMP,
            time: "19:00".to_string(),
            timezone: "UTC".to_string(),
            venue: Some("Anfield".to_string()),
            league_country: "England".to_string(),
            league_name: "Premier League".to_string(),
            league_logo: "https://media.api-sports.io/football/leagues/39.png".to_string(),
            league_flag: Some("https://media.api-sports.io/flags/gb-eng.svg".to_string()),
            match_day: "Regular Season - 1".to_string(),
            home_team: TeamSummary {
                id: 40,
                name: "Liverpool".to_string(),
                logo: "https://media.api-sports.io/football/teams/40.png".to_string(),
            },
            away_team: TeamSummary {
                id: 35,
                name: "Bournemouth".to_string(),
                logo: "https://media.api-sports.io/football/teams/35.png".to_string(),
            },
            country: None,
            goals: Goals::default(),
            prediction: None,
            match_stats: MatchStats {
                status: MatchStatus::from_code(status_code),
                is_home_winner: None,
                is_away_winner: None,
            },
        }
    }

    /// Provider fixture record with the given winner flags
    pub fn fixture_response(
        id: i64,
        status_code: &str,
        home_winner: Option<bool>,
        away_winner: Option<bool>,
    ) -> FixtureResponse {
        FixtureResponse {
            fixture: FixtureInfo {
                id,
                referee: None,
                timezone: "UTC".to_string(),
                date: "2025-08-15T19:00:00+00:00".to_string(),
                timestamp: KICKOFF_TIMESTAMP,
                venue: Venue {
                    id: Some(550),
                    name: Some("Anfield".to_string()),
                    city: Some("Liverpool".to_string()),
                },
                status: FixtureStatus {
                    long: String::new(),
                    short: status_code.to_string(),
                    elapsed: None,
                    extra: None,
                },
            },
            league: LeagueInfo {
                id: 39,
                name: "Premier League".to_string(),
                country: "England".to_string(),
                logo: "https://media.api-sports.io/football/leagues/39.png".to_string(),
                flag: Some("https://media.api-sports.io/flags/gb-eng.svg".to_string()),
                season: 2025,
                round: "Regular Season - 1".to_string(),
            },
            teams: Teams {
                home: TeamDetails {
                    id: 40,
                    name: "Liverpool".to_string(),
                    logo: "https://media.api-sports.io/football/teams/40.png".to_string(),
                    winner: home_winner,
                },
                away: TeamDetails {
                    id: 35,
                    name: "Bournemouth".to_string(),
                    logo: "https://media.api-sports.io/football/teams/35.png".to_string(),
                    winner: away_winner,
                },
            },
            goals: Goals::default(),
        }
    }

    pub fn prediction_response() -> PredictionResponse {
        PredictionResponse {
            predictions: PredictionDetails {
                advice: Some("Double chance : Liverpool or draw".to_string()),
                percent: Percentages {
                    home: "50%".to_string(),
                    draw: "25%".to_string(),
                    away: "25%".to_string(),
                },
            },
            comparison: Comparison {
                h2h: HomeAway {
                    home: "60%".to_string(),
                    away: "40%".to_string(),
                },
                goals: HomeAway {
                    home: "58%".to_string(),
                    away: "42%".to_string(),
                },
                total: HomeAway {
                    home: "55%".to_string(),
                    away: "45%".to_string(),
                },
            },
        }
    }

    /// Raw JSON for one provider fixture record
    pub fn fixture_json(id: i64, status_code: &str, league_id: i64, timestamp: i64) -> Value {
        json!({
            "fixture": {
                "id": id,
                "referee": null,
                "timezone": "UTC",
                "date": "2025-08-15T19:00:00+00:00",
                "timestamp": timestamp,
                "venue": { "id": 550, "name": "Anfield", "city": "Liverpool" },
                "status": { "long": "", "short": status_code, "elapsed": null }
            },
            "league": {
                "id": league_id,
                "name": format!("League {league_id}"),
                "country": "England",
                "logo": format!("https://media.api-sports.io/football/leagues/{league_id}.png"),
                "flag": null,
                "season": 2025,
                "round": "Regular Season - 1"
            },
            "teams": {
                "home": { "id": 40, "name": "Liverpool", "logo": "", "winner": null },
                "away": { "id": 35, "name": "Bournemouth", "logo": "", "winner": null }
            },
            "goals": { "home": null, "away": null }
        })
    }

    /// `fixtures` envelope holding the given `(id, status)` records in league 39
    pub fn fixture_api_json(fixtures: &[(i64, &str)]) -> Value {
        let records: Vec<Value> = fixtures
            .iter()
            .map(|(id, code)| Self::fixture_json(*id, code, 39, KICKOFF_TIMESTAMP))
            .collect();
        Self::envelope("fixtures", records)
    }

    /// Wraps fixture records in the provider's `fixtures` envelope
    pub fn envelope(endpoint: &str, records: Vec<Value>) -> Value {
        json!({
            "get": endpoint,
            "parameters": {},
            "errors": [],
            "results": records.len(),
            "response": records
        })
    }

    /// `predictions` envelope, empty unless `with_prediction`
    pub fn prediction_api_json(with_prediction: bool) -> Value {
        let response = if with_prediction {
            vec![json!({
                "predictions": {
                    "winner": { "id": 40, "name": "Liverpool" },
                    "advice": "Double chance : Liverpool or draw",
                    "percent": { "home": "50%", "draw": "25%", "away": "25%" }
                },
                "comparison": {
                    "h2h": { "home": "60%", "away": "40%" },
                    "goals": { "home": "58%", "away": "42%" },
                    "total": { "home": "55%", "away": "45%" }
                }
            })]
        } else {
            Vec::new()
        };
        json!({
            "get": "predictions",
            "errors": [],
            "results": response.len(),
            "response": response
        })
    }

    /// Valid configuration pointing at `base_url`
    pub fn config(base_url: &str) -> Config {
        Config {
            api_base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            api_host: "test-host".to_string(),
            ..Config::default()
        }
    }
}
