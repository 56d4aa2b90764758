use std::io::{Write, stdout};
use std::path::Path;
use std::sync::Arc;

use crossterm::{execute, terminal::SetTitle};
use tracing::{info, warn};

use crate::cli::{Args, Command};
use crate::config::Config;
use crate::config::user_prompts::prompt_for_api_key;
use crate::data_fetcher::SportradarClient;
use crate::data_fetcher::api::today;
use crate::data_fetcher::processors::filter_live_matches;
use crate::display;
use crate::error::AppError;
use crate::stats::{compare_teams, predict_match};
use crate::view_state::{Dashboard, LivePoller, LoadingState, ViewState, clamp_refresh_interval};

const TERMINAL_TITLE: &str = "Soccer Dashboard";

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    Config::display().await?;
    Ok(())
}

/// Handles configuration update commands (--set-api-key, --set-base-url,
/// --set-log-file, --clear-log-file).
///
/// Starts from the saved file when there is one, so updating one setting
/// keeps the others. An empty `--set-api-key` prompts for the key.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_key) = &args.new_api_key {
        config.api_key = if new_key.trim().is_empty() {
            prompt_for_api_key().await?
        } else {
            new_key.trim().to_string()
        };
    }

    if let Some(new_base_url) = &args.new_base_url {
        config.api_base_url = new_base_url.trim_end_matches('/').to_string();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Prints a loaded collection, or its error when the load failed.
fn report<W: Write, T>(
    out: &mut W,
    state: &ViewState<T>,
    render: impl FnOnce(&mut W, &T) -> Result<(), AppError>,
) -> Result<bool, AppError> {
    if state.status == LoadingState::Error {
        let message = state.error.as_deref().unwrap_or("Unknown error occurred");
        display::print_error(out, message)?;
        return Ok(false);
    }
    if let Some(notice) = state.visible_error() {
        display::print_notice(out, notice)?;
    }
    render(out, &state.data)?;
    Ok(true)
}

async fn watch_live(dashboard: &mut Dashboard, config: &Config) -> Result<(), AppError> {
    let interval = clamp_refresh_interval(config.live_refresh_seconds);
    let (poller, mut updates) = LivePoller::spawn(Arc::clone(dashboard.client()), interval);
    let mut out = stdout();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(update) = updates.recv() => {
                dashboard.apply_live_update(update);
                report(&mut out, &dashboard.live_matches, |out, events| {
                    display::render_events(out, "Live matches", &filter_live_matches(events))
                })?;
                out.write_all(b"\n")?;
            }
            _ = &mut ctrl_c => {
                info!("Ctrl-C received, stopping live view");
                break;
            }
            else => {
                warn!("Live polling ended unexpectedly");
                break;
            }
        }
    }

    drop(poller);
    Ok(())
}

/// Runs one subcommand against a fresh client and prints the result.
pub async fn run_command(command: Command, config: &Config, demo_fallback: bool) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;

    let client = Arc::new(SportradarClient::from_config(config)?);
    let mut dashboard = Dashboard::new(client, demo_fallback);
    let mut out = stdout();
    info!("Running command {:?}", command);

    match command {
        Command::Competitions => {
            dashboard.load_competitions().await;
            report(&mut out, &dashboard.competitions, |out, competitions| {
                display::render_competitions(out, competitions)
            })?;
        }
        Command::Seasons { competition } => {
            dashboard.load_competition_seasons(&competition).await;
            report(&mut out, &dashboard.seasons, |out, seasons| {
                display::render_seasons(out, seasons)
            })?;
        }
        Command::Standings { season } => {
            dashboard.load_season_standings(&season).await;
            report(&mut out, &dashboard.standings, |out, table| {
                display::render_standings(out, table)
            })?;
        }
        Command::Live { watch } => {
            if watch {
                watch_live(&mut dashboard, config).await?;
            } else {
                dashboard.load_live_matches().await;
                report(&mut out, &dashboard.live_matches, |out, events| {
                    display::render_events(out, "Live matches", &filter_live_matches(events))
                })?;
            }
        }
        Command::Daily { date } => {
            let date = date.unwrap_or_else(today);
            dashboard.load_daily_matches(&date).await;
            report(&mut out, &dashboard.daily_matches, |out, events| {
                display::render_events(out, &format!("Matches on {date}"), events)
            })?;
        }
        Command::Summaries { date } => {
            let date = date.unwrap_or_else(today);
            dashboard.load_match_summaries(&date).await;
            report(&mut out, &dashboard.match_summaries, |out, summaries| {
                display::render_summaries(out, &format!("Results on {date}"), summaries)
            })?;
        }
        Command::Stats { season } => {
            dashboard.load_season_summaries(&season).await;
            let loaded = report(&mut out, &dashboard.match_summaries, |_, _| Ok(()))?;
            if loaded {
                match dashboard.stats() {
                    Some(stats) => display::render_league_stats(&mut out, &stats)?,
                    None => display::print_error(
                        &mut out,
                        &AppError::no_matches_found(format!("finished matches in {season}"))
                            .to_string(),
                    )?,
                }
            }
        }
        Command::Teams { season } => {
            dashboard.load_season_summaries(&season).await;
            let loaded = report(&mut out, &dashboard.match_summaries, |_, _| Ok(()))?;
            if loaded {
                display::render_team_stats(&mut out, &dashboard.team_stats())?;
            }
        }
        Command::Compare {
            season,
            team_a,
            team_b,
        } => {
            dashboard.load_season_summaries(&season).await;
            let loaded = report(&mut out, &dashboard.match_summaries, |_, _| Ok(()))?;
            if loaded {
                match compare_teams(&dashboard.team_stats(), &team_a, &team_b) {
                    Ok(comparison) => display::render_comparison(&mut out, &comparison)?,
                    Err(e) => display::print_error(&mut out, &e.to_string())?,
                }
            }
        }
        Command::Predict {
            season,
            team_a,
            team_b,
        } => {
            dashboard.load_season_summaries(&season).await;
            let loaded = report(&mut out, &dashboard.match_summaries, |_, _| Ok(()))?;
            if loaded {
                match predict_match(&dashboard.team_stats(), &team_a, &team_b) {
                    Ok(prediction) => display::render_prediction(&mut out, &prediction)?,
                    Err(e) => display::print_error(&mut out, &e.to_string())?,
                }
            }
        }
        Command::CacheStats => {
            // The second load is served from the cache
            dashboard.load_competitions().await;
            dashboard.load_competitions().await;
            display::render_cache_stats(&mut out, &dashboard.cache_stats().await)?;
        }
    }

    if !dashboard.failed_loads().is_empty() {
        warn!("{} loads failed", dashboard.failed_loads().len());
    }
    Ok(())
}
