use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

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

/// Returns true when the arguments only touch the configuration file
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_key.is_some()
        || args.new_base_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Soccer competitions, live matches and goal statistics from the Sportradar API.
///
/// Every command prints its result once and exits, except `live --watch`
/// which keeps refreshing until Ctrl-C.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Substitute demo data when the API is unavailable.
    /// Overrides the demo_fallback setting in the config file.
    #[arg(long = "demo", global = true, help_heading = "Display Options")]
    pub demo: bool,

    /// Update the API key in config. Will prompt for a new key if not provided.
    #[arg(
        long = "set-api-key",
        help_heading = "Configuration",
        value_name = "API_KEY",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_key: Option<String>,

    /// Update the provider base URL in config.
    #[arg(long = "set-base-url", help_heading = "Configuration", value_name = "URL")]
    pub new_base_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode. Logs are written to the terminal as well as the log file.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List competitions, marking those with a running season
    Competitions,
    /// List the seasons of a competition
    Seasons {
        /// Competition id, e.g. sr:competition:17
        competition: String,
    },
    /// Show the league table of a season
    Standings {
        /// Season id, e.g. sr:season:118689
        season: String,
    },
    /// Show matches in progress
    Live {
        /// Keep refreshing until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },
    /// Show the schedule of a day
    Daily {
        /// Date in YYYY-MM-DD format. Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the results of a day
    Summaries {
        /// Date in YYYY-MM-DD format. Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Goal statistics and featured matches of a season
    Stats {
        season: String,
    },
    /// Per-team goal records of a season
    Teams {
        season: String,
    },
    /// Compare two teams of a season
    Compare {
        season: String,
        team_a: String,
        team_b: String,
    },
    /// Over 2.5 and BTTS outlook for two teams of a season
    Predict {
        season: String,
        team_a: String,
        team_b: String,
    },
    /// Show response cache statistics after loading competitions
    CacheStats,
}
