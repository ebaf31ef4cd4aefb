use tracing::trace;

use super::time_formatting::format_kickoff_time;
use crate::data_fetcher::models::api::TeamDetails;
use crate::data_fetcher::models::{
    Fixture, FixtureResponse, MatchStats, MatchStatus, Prediction, PredictionResponse,
    TeamSummary,
};

fn team_summary(team: TeamDetails) -> TeamSummary {
    TeamSummary {
        id: team.id,
        name: team.name,
        logo: team.logo,
    }
}

/// Converts a provider fixture record into the domain [`Fixture`].
///
/// The result carries no prediction or tracked-league tag; callers attach
/// those with [`Fixture::with_prediction`] and [`Fixture::with_country`].
pub fn into_fixture(response: FixtureResponse) -> Fixture {
    let FixtureResponse {
        fixture,
        league,
        teams,
        goals,
    } = response;

    let status = MatchStatus::from_code(&fixture.status.short);
    trace!(
        "Mapping fixture {}: status={}, elapsed={:?}",
        fixture.id, status, fixture.status.elapsed
    );

    let match_stats = MatchStats {
        status,
        is_home_winner: teams.home.winner,
        is_away_winner: teams.away.winner,
    };

    Fixture {
        id: fixture.id,
        time: format_kickoff_time(fixture.timestamp),
        date: fixture.date,
        timestamp: fixture.timestamp,
        timezone: fixture.timezone,
        venue: fixture.venue.name,
        league_country: league.country,
        league_name: league.name,
        league_logo: league.logo,
        league_flag: league.flag,
        match_day: league.round,
        home_team: team_summary(teams.home),
        away_team: team_summary(teams.away),
        country: None,
        goals,
        prediction: None,
        match_stats,
    }
}

/// Converts a provider prediction record into the domain [`Prediction`]
pub fn into_prediction(response: PredictionResponse) -> Prediction {
    let PredictionResponse {
        predictions,
        comparison,
    } = response;

    Prediction {
        home_percent: predictions.percent.home,
        draw_percent: predictions.percent.draw,
        away_percent: predictions.percent.away,
        advice: predictions.advice,
        h2h_home: comparison.h2h.home,
        h2h_away: comparison.h2h.away,
        goals_home: comparison.goals.home,
        goals_away: comparison.goals.away,
        total_home: comparison.total.home,
        total_away: comparison.total.away,
    }
}
