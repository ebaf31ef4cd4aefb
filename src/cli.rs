use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgGroup, Parser};
use fixture_feed::data_fetcher::FetchOptions;
use fixture_feed::data_fetcher::models::{FixtureId, LeagueScope};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Football fixture feed
///
/// Fetches fixtures from the configured football provider through a
/// status-aware cache and rate limiter, and prints them as JSON.
///
/// Without a mode flag the upcoming fixtures of every tracked league are listed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
#[command(group(
    ArgGroup::new("mode")
        .args(["fixture", "live", "list", "stats", "watch", "list_config"])
        .multiple(false)
))]
pub struct Args {
    /// Look up a single fixture by id
    #[arg(long, value_name = "ID", help_heading = "Modes")]
    pub fixture: Option<String>,

    /// List fixtures currently in play
    #[arg(long, help_heading = "Modes")]
    pub live: bool,

    /// List fixtures of the tracked leagues, grouped per league
    #[arg(long, help_heading = "Modes")]
    pub list: bool,

    /// Print cache and rate limiter statistics
    #[arg(long, help_heading = "Modes")]
    pub stats: bool,

    /// Poll a fixture until interrupted with Ctrl-C
    #[arg(long, value_name = "ID", help_heading = "Modes")]
    pub watch: Option<String>,

    /// Print the current configuration with the API key masked
    #[arg(long = "list-config", short = 'l', help_heading = "Modes")]
    pub list_config: bool,

    /// Include the prediction when looking up or watching a fixture
    #[arg(long, help_heading = "Fixture Options")]
    pub prediction: bool,

    /// Ignore a fresh cache entry and go to upstream
    #[arg(long = "force-refresh", help_heading = "Fixture Options")]
    pub force_refresh: bool,

    /// Seconds between polls in watch mode
    #[arg(long, value_name = "SECS", default_value_t = 30, help_heading = "Fixture Options")]
    pub interval: u64,

    /// First day of the listing (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "to", help_heading = "Listing Options")]
    pub from: Option<String>,

    /// Last day of the listing (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "from", help_heading = "Listing Options")]
    pub to: Option<String>,

    /// Restrict the listing to a tracked league id. Repeatable.
    #[arg(long = "league", value_name = "ID", help_heading = "Listing Options")]
    pub leagues: Vec<i64>,

    /// Path to a config file instead of the default location
    #[arg(long, value_name = "PATH", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Also write logs to stderr at debug level
    #[arg(long, help_heading = "Debug Options")]
    pub debug: bool,

    /// Write logs to this file instead of the default log directory
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug Options")]
    pub log_file: Option<String>,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Fixture {
        id: FixtureId,
        options: FetchOptions,
    },
    Live,
    List {
        from: Option<String>,
        to: Option<String>,
        scope: LeagueScope,
    },
    Stats,
    Watch {
        id: FixtureId,
        options: FetchOptions,
        interval_seconds: u64,
    },
    ListConfig,
}

impl Args {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            include_prediction: self.prediction,
            force_refresh: self.force_refresh,
        }
    }

    pub fn league_scope(&self) -> LeagueScope {
        if self.leagues.is_empty() {
            LeagueScope::All
        } else {
            LeagueScope::Only(self.leagues.clone())
        }
    }

    pub fn mode(&self) -> Mode {
        if let Some(id) = &self.fixture {
            Mode::Fixture {
                id: FixtureId::new(id),
                options: self.fetch_options(),
            }
        } else if let Some(id) = &self.watch {
            Mode::Watch {
                id: FixtureId::new(id),
                options: self.fetch_options(),
                interval_seconds: self.interval.max(1),
            }
        } else if self.live {
            Mode::Live
        } else if self.stats {
            Mode::Stats
        } else if self.list_config {
            Mode::ListConfig
        } else {
            Mode::List {
                from: self.from.clone(),
                to: self.to.clone(),
                scope: self.league_scope(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_lists_all_leagues() {
        let args = Args::try_parse_from(["fixture_feed"]).unwrap();
        assert_eq!(
            args.mode(),
            Mode::List {
                from: None,
                to: None,
                scope: LeagueScope::All
            }
        );
    }

    #[test]
    fn test_fixture_mode_with_options() {
        let args =
            Args::try_parse_from(["fixture_feed", "--fixture", " 100 ", "--prediction"]).unwrap();
        assert_eq!(
            args.mode(),
            Mode::Fixture {
                id: FixtureId::from(100),
                options: FetchOptions {
                    include_prediction: true,
                    force_refresh: false,
                },
            }
        );
    }

    #[test]
    fn test_list_with_leagues_and_dates() {
        let args = Args::try_parse_from([
            "fixture_feed",
            "--list",
            "--from",
            "2025-08-15",
            "--to",
            "2025-08-22",
            "--league",
            "39",
            "--league",
            "140",
        ])
        .unwrap();
        assert_eq!(
            args.mode(),
            Mode::List {
                from: Some("2025-08-15".to_string()),
                to: Some("2025-08-22".to_string()),
                scope: LeagueScope::Only(vec![39, 140]),
            }
        );
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Args::try_parse_from(["fixture_feed", "--live", "--stats"]).is_err());
        assert!(Args::try_parse_from(["fixture_feed", "--fixture", "1", "--watch", "1"]).is_err());
    }

    #[test]
    fn test_from_requires_to() {
        assert!(Args::try_parse_from(["fixture_feed", "--list", "--from", "2025-08-15"]).is_err());
    }

    #[test]
    fn test_watch_interval_floor() {
        let args =
            Args::try_parse_from(["fixture_feed", "--watch", "7", "--interval", "0"]).unwrap();
        assert!(matches!(
            args.mode(),
            Mode::Watch {
                interval_seconds: 1,
                ..
            }
        ));
    }
}
