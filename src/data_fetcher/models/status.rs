use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a fixture as reported by the provider's short status code.
///
/// Codes outside the known set are kept verbatim in [`MatchStatus::Unknown`]
/// so they survive a serialize round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    // In play
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    Penalties,
    BreakTime,
    Live,
    // Finished
    FullTime,
    AfterExtraTime,
    PenaltiesFinished,
    FullTimePenalties,
    // Pending or irregular
    NotStarted,
    ToBeDefined,
    Postponed,
    Suspended,
    Interrupted,
    Cancelled,
    Abandoned,
    TechnicalLoss,
    WalkOver,
    Unknown(String),
}

/// Volatility group a status belongs to; drives the cache TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusGroup {
    Live,
    Finished,
    Pending,
    Unknown,
}

impl MatchStatus {
    /// Parses a provider short code. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1H" => Self::FirstHalf,
            "HT" => Self::HalfTime,
            "2H" => Self::SecondHalf,
            "ET" => Self::ExtraTime,
            "P" => Self::Penalties,
            "BT" => Self::BreakTime,
            "LIVE" => Self::Live,
            "FT" => Self::FullTime,
            "AET" => Self::AfterExtraTime,
            "PEN" => Self::PenaltiesFinished,
            "FT_PEN" => Self::FullTimePenalties,
            "NS" => Self::NotStarted,
            "TBD" => Self::ToBeDefined,
            "POSTP" => Self::Postponed,
            "SUSP" => Self::Suspended,
            "INT" => Self::Interrupted,
            "CANC" => Self::Cancelled,
            "ABD" => Self::Abandoned,
            "AWD" => Self::TechnicalLoss,
            "WO" => Self::WalkOver,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The provider short code for this status
    pub fn code(&self) -> &str {
        match self {
            Self::FirstHalf => "1H",
            Self::HalfTime => "HT",
            Self::SecondHalf => "2H",
            Self::ExtraTime => "ET",
            Self::Penalties => "P",
            Self::BreakTime => "BT",
            Self::Live => "LIVE",
            Self::FullTime => "FT",
            Self::AfterExtraTime => "AET",
            Self::PenaltiesFinished => "PEN",
            Self::FullTimePenalties => "FT_PEN",
            Self::NotStarted => "NS",
            Self::ToBeDefined => "TBD",
            Self::Postponed => "POSTP",
            Self::Suspended => "SUSP",
            Self::Interrupted => "INT",
            Self::Cancelled => "CANC",
            Self::Abandoned => "ABD",
            Self::TechnicalLoss => "AWD",
            Self::WalkOver => "WO",
            Self::Unknown(code) => code,
        }
    }

    pub fn group(&self) -> StatusGroup {
        match self {
            Self::FirstHalf
            | Self::HalfTime
            | Self::SecondHalf
            | Self::ExtraTime
            | Self::Penalties
            | Self::BreakTime
            | Self::Live => StatusGroup::Live,
            Self::FullTime
            | Self::AfterExtraTime
            | Self::PenaltiesFinished
            | Self::FullTimePenalties => StatusGroup::Finished,
            Self::NotStarted
            | Self::ToBeDefined
            | Self::Postponed
            | Self::Suspended
            | Self::Interrupted
            | Self::Cancelled
            | Self::Abandoned
            | Self::TechnicalLoss
            | Self::WalkOver => StatusGroup::Pending,
            Self::Unknown(_) => StatusGroup::Unknown,
        }
    }

    pub fn is_live(&self) -> bool {
        self.group() == StatusGroup::Live
    }

    pub fn is_finished(&self) -> bool {
        self.group() == StatusGroup::Finished
    }
}

impl From<String> for MatchStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE: [&str; 7] = ["1H", "HT", "2H", "ET", "P", "BT", "LIVE"];
    const FINISHED: [&str; 4] = ["FT", "AET", "PEN", "FT_PEN"];
    const PENDING: [&str; 9] = [
        "NS", "TBD", "POSTP", "SUSP", "INT", "CANC", "ABD", "AWD", "WO",
    ];

    #[test]
    fn test_known_codes_map_to_groups() {
        for code in LIVE {
            assert_eq!(MatchStatus::from_code(code).group(), StatusGroup::Live, "{code}");
        }
        for code in FINISHED {
            assert_eq!(
                MatchStatus::from_code(code).group(),
                StatusGroup::Finished,
                "{code}"
            );
        }
        for code in PENDING {
            assert_eq!(
                MatchStatus::from_code(code).group(),
                StatusGroup::Pending,
                "{code}"
            );
        }
    }

    #[test]
    fn test_known_codes_round_trip_through_code() {
        for code in LIVE.iter().chain(FINISHED.iter()).chain(PENDING.iter()) {
            assert_eq!(MatchStatus::from_code(code).code(), *code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let status = MatchStatus::from_code("XYZ");
        assert_eq!(status, MatchStatus::Unknown("XYZ".to_string()));
        assert_eq!(status.group(), StatusGroup::Unknown);
        assert_eq!(status.to_string(), "XYZ");
    }

    #[test]
    fn test_serde_uses_short_code() {
        let json = serde_json::to_string(&MatchStatus::HalfTime).unwrap();
        assert_eq!(json, "\"HT\"");

        let parsed: MatchStatus = serde_json::from_str("\"FT_PEN\"").unwrap();
        assert_eq!(parsed, MatchStatus::FullTimePenalties);
        assert!(parsed.is_finished());
        assert!(!parsed.is_live());
    }
}
