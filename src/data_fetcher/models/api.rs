//! Response shapes returned by the upstream football provider

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope for every `fixtures` query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureApiResponse {
    #[serde(default)]
    pub get: String,
    /// Empty array on success; the provider reports rejected requests
    /// as a non-empty object or array here with a 200 status.
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub response: Vec<FixtureResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureResponse {
    pub fixture: FixtureInfo,
    pub league: LeagueInfo,
    pub teams: Teams,
    #[serde(default)]
    pub goals: Goals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: i64,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub timezone: String,
    pub date: String,
    pub timestamp: i64,
    #[serde(default)]
    pub venue: Venue,
    pub status: FixtureStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStatus {
    #[serde(default)]
    pub long: String,
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<i32>,
    #[serde(default)]
    pub extra: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub season: i32,
    #[serde(default)]
    pub round: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teams {
    pub home: TeamDetails,
    pub away: TeamDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDetails {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub winner: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub home: Option<i32>,
    #[serde(default)]
    pub away: Option<i32>,
}

/// Envelope for `predictions` queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionApiResponse {
    #[serde(default)]
    pub errors: Value,
    #[serde(default)]
    pub response: Vec<PredictionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: PredictionDetails,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionDetails {
    #[serde(default)]
    pub advice: Option<String>,
    pub percent: Percentages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Percentages {
    pub home: String,
    pub draw: String,
    pub away: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub h2h: HomeAway,
    pub goals: HomeAway,
    pub total: HomeAway,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeAway {
    pub home: String,
    pub away: String,
}

/// Returns true when the provider's `errors` field carries anything.
pub fn has_provider_errors(errors: &Value) -> bool {
    match errors {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_errors_detection() {
        assert!(!has_provider_errors(&json!([])));
        assert!(!has_provider_errors(&json!({})));
        assert!(!has_provider_errors(&Value::Null));
        assert!(has_provider_errors(&json!({"token": "Error/Missing application key."})));
        assert!(has_provider_errors(&json!(["rate limit"])));
    }

    #[test]
    fn test_fixture_response_deserializes_with_sparse_fields() {
        let body = json!({
            "get": "fixtures",
            "errors": [],
            "results": 1,
            "response": [{
                "fixture": {
                    "id": 100,
                    "timezone": "UTC",
                    "date": "2025-08-15T19:00:00+00:00",
                    "timestamp": 1755284400,
                    "venue": {"id": null, "name": null, "city": null},
                    "status": {"long": "Not Started", "short": "NS", "elapsed": null}
                },
                "league": {"id": 39, "name": "Premier League", "country": "England", "round": "Regular Season - 1"},
                "teams": {
                    "home": {"id": 40, "name": "Liverpool", "logo": "l.png", "winner": null},
                    "away": {"id": 35, "name": "Bournemouth", "logo": "b.png", "winner": null}
                },
                "goals": {"home": null, "away": null}
            }]
        });

        let parsed: FixtureApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.results, 1);
        let fixture = &parsed.response[0];
        assert_eq!(fixture.fixture.id, 100);
        assert_eq!(fixture.fixture.status.short, "NS");
        assert!(fixture.fixture.venue.name.is_none());
        assert!(fixture.league.flag.is_none());
        assert_eq!(fixture.goals, Goals::default());
    }
}
