use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::fixture::Fixture;
use crate::error::AppError;

/// A league the feed lists fixtures for, tagged with the country it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedLeague {
    /// Provider league id
    pub id: i64,
    /// Country display name
    pub name: String,
    /// Country code (e.g. `GB-ENG`)
    pub code: String,
}

impl TrackedLeague {
    pub fn new(id: i64, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn default_set() -> Vec<Self> {
        vec![
            Self::new(39, "England", "GB-ENG"),
            Self::new(135, "Italy", "IT"),
            Self::new(140, "Spain", "ES"),
        ]
    }
}

/// Which tracked leagues a listing covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LeagueScope {
    #[default]
    All,
    Only(Vec<i64>),
}

impl LeagueScope {
    pub fn includes(&self, league_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&league_id),
        }
    }
}

/// Inclusive date range for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, AppError> {
        if from > to {
            return Err(AppError::datetime_parse_error(format!(
                "Date range start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// `days` days starting at `today`
    pub fn upcoming(today: NaiveDate, days: u32) -> Self {
        Self {
            from: today,
            to: today + Duration::days(i64::from(days)),
        }
    }

    /// Parses two YYYY-MM-DD dates
    pub fn parse(from: &str, to: &str) -> Result<Self, AppError> {
        let parse = |value: &str| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
                AppError::datetime_parse_error(format!("Invalid date '{value}': {e}"))
            })
        };
        Self::new(parse(from)?, parse(to)?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueGroup {
    pub country: TrackedLeague,
    pub league_name: String,
    pub league_logo: String,
    pub fixtures: Vec<Fixture>,
}

/// Fixtures of a date range grouped per tracked league
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedFixtures {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: usize,
    pub groups: Vec<LeagueGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_rejects_reversed_dates() {
        assert!(DateRange::parse("2025-08-18", "2025-08-15").is_err());
        let range = DateRange::parse("2025-08-15", "2025-08-18").unwrap();
        assert_eq!(range.from.to_string(), "2025-08-15");
    }

    #[test]
    fn test_date_range_rejects_garbage() {
        let err = DateRange::parse("15.08.2025", "2025-08-18").unwrap_err();
        assert!(matches!(err, AppError::DateTimeParse(_)));
    }

    #[test]
    fn test_upcoming_range() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let range = DateRange::upcoming(today, 7);
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2025, 8, 22).unwrap());
    }

    #[test]
    fn test_league_scope() {
        assert!(LeagueScope::All.includes(39));
        let only = LeagueScope::Only(vec![135]);
        assert!(only.includes(135));
        assert!(!only.includes(39));
    }
}
