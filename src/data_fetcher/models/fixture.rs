use serde::{Deserialize, Serialize};
use std::fmt;

use super::api::Goals;
use super::listing::TrackedLeague;
use super::status::MatchStatus;

/// Cache key for a fixture. Provider ids are integers, callers pass strings;
/// both normalize to the same trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(String);

impl FixtureId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for FixtureId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for FixtureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FixtureId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: i64,
    pub name: String,
    pub logo: String,
}

/// Outcome of a finished fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchResult {
    HomeWin,
    AwayWin,
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub status: MatchStatus,
    pub is_home_winner: Option<bool>,
    pub is_away_winner: Option<bool>,
}

impl MatchStats {
    /// Result of the match, only once it is finished.
    ///
    /// Both winner flags unset (or both false) on a finished fixture is a draw.
    pub fn result(&self) -> Option<MatchResult> {
        if !self.status.is_finished() {
            return None;
        }
        match (self.is_home_winner, self.is_away_winner) {
            (Some(true), _) => Some(MatchResult::HomeWin),
            (_, Some(true)) => Some(MatchResult::AwayWin),
            _ => Some(MatchResult::Draw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub home_percent: String,
    pub draw_percent: String,
    pub away_percent: String,
    pub advice: Option<String>,
    pub h2h_home: String,
    pub h2h_away: String,
    pub goals_home: String,
    pub goals_away: String,
    pub total_home: String,
    pub total_away: String,
}

/// A single scheduled match with its metadata and result state.
///
/// Values are never mutated after construction; a refetch builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: i64,
    pub date: String,
    pub timestamp: i64,
    /// Kickoff as HH:MM
    pub time: String,
    pub timezone: String,
    pub venue: Option<String>,
    pub league_country: String,
    pub league_name: String,
    pub league_logo: String,
    pub league_flag: Option<String>,
    pub match_day: String,
    pub home_team: TeamSummary,
    pub away_team: TeamSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<TrackedLeague>,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub prediction: Option<Prediction>,
    pub match_stats: MatchStats,
}

impl Fixture {
    pub fn fixture_id(&self) -> FixtureId {
        FixtureId::from(self.id)
    }

    pub fn status(&self) -> &MatchStatus {
        &self.match_stats.status
    }

    /// Returns a copy carrying the given prediction
    pub fn with_prediction(self, prediction: Option<Prediction>) -> Self {
        Self { prediction, ..self }
    }

    /// Returns a copy tagged with the tracked league it was listed under
    pub fn with_country(self, country: TrackedLeague) -> Self {
        Self {
            country: Some(country),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(code: &str, home: Option<bool>, away: Option<bool>) -> MatchStats {
        MatchStats {
            status: MatchStatus::from_code(code),
            is_home_winner: home,
            is_away_winner: away,
        }
    }

    #[test]
    fn test_fixture_id_normalizes() {
        assert_eq!(FixtureId::from(" 100 "), FixtureId::from(100));
        assert_eq!(FixtureId::from(100).as_str(), "100");
    }

    #[test]
    fn test_result_only_for_finished_matches() {
        assert_eq!(stats("2H", Some(true), Some(false)).result(), None);
        assert_eq!(stats("NS", None, None).result(), None);
        assert_eq!(
            stats("FT", Some(true), Some(false)).result(),
            Some(MatchResult::HomeWin)
        );
        assert_eq!(
            stats("AET", Some(false), Some(true)).result(),
            Some(MatchResult::AwayWin)
        );
        assert_eq!(stats("FT", None, None).result(), Some(MatchResult::Draw));
    }
}
