//! Colored terminal output for the command results

use std::collections::BTreeMap;
use std::io::Write;

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::data_fetcher::cache::CacheStats;
use crate::data_fetcher::models::{
    Competition, MatchSummary, Qualifier, Season, SportEvent, Standing,
};
use crate::data_fetcher::processors::{format_kickoff_time, group_events_by_date, score_label};
use crate::error::AppError;
use crate::stats::{LeagueStats, MatchPrediction, Recommendation, Side, TeamComparison, TeamStats};

fn header_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
fn text_fg() -> Color {
    Color::AnsiValue(231)
} // White
fn result_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
fn accent_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Red
fn dim_fg() -> Color {
    Color::AnsiValue(245)
} // Grey

fn line<W: Write>(out: &mut W, color: Color, text: &str) -> Result<(), AppError> {
    queue!(out, SetForegroundColor(color), Print(text), ResetColor, Print("\n"))?;
    Ok(())
}

pub fn print_header<W: Write>(out: &mut W, title: &str) -> Result<(), AppError> {
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(header_fg()),
        Print(title),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print("\n"),
        SetForegroundColor(dim_fg()),
        Print("─".repeat(title.chars().count().max(20))),
        ResetColor,
        Print("\n"),
    )?;
    Ok(())
}

pub fn print_error<W: Write>(out: &mut W, message: &str) -> Result<(), AppError> {
    line(out, error_fg(), &format!("Error: {message}"))?;
    out.flush()?;
    Ok(())
}

pub fn print_notice<W: Write>(out: &mut W, message: &str) -> Result<(), AppError> {
    line(out, accent_fg(), message)
}

pub fn render_competitions<W: Write>(
    out: &mut W,
    competitions: &[Competition],
) -> Result<(), AppError> {
    print_header(out, "Competitions")?;
    if competitions.is_empty() {
        line(out, dim_fg(), "No competitions")?;
    }
    for competition in competitions {
        let color = if competition.current_season.is_some() {
            result_fg()
        } else {
            dim_fg()
        };
        line(
            out,
            color,
            &format!(
                "{:<24} {:<16} {}",
                competition.id,
                competition.category.name,
                competition.season_label()
            ),
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn render_seasons<W: Write>(out: &mut W, seasons: &[Season]) -> Result<(), AppError> {
    print_header(out, "Seasons")?;
    for season in seasons {
        line(
            out,
            text_fg(),
            &format!(
                "{:<20} {:<28} {} .. {}",
                season.id, season.name, season.start_date, season.end_date
            ),
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn render_standings<W: Write>(out: &mut W, table: &[Standing]) -> Result<(), AppError> {
    print_header(out, "Standings")?;
    line(
        out,
        dim_fg(),
        &format!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4}",
            "#", "Team", "P", "W", "D", "L", "Goals", "GD", "Pts"
        ),
    )?;
    for row in table {
        line(
            out,
            text_fg(),
            &format!(
                "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>+4} {:>4}",
                row.rank,
                row.competitor.name,
                row.played,
                row.won,
                row.drawn,
                row.lost,
                format!("{}-{}", row.goals_for, row.goals_against),
                row.goal_difference,
                row.points
            ),
        )?;
    }
    out.flush()?;
    Ok(())
}

fn kickoff(event: &SportEvent) -> String {
    format_kickoff_time(&event.start_time).unwrap_or_else(|_| "--:--".to_string())
}

pub fn render_events<W: Write>(
    out: &mut W,
    title: &str,
    events: &[SportEvent],
) -> Result<(), AppError> {
    print_header(out, title)?;
    if events.is_empty() {
        line(out, dim_fg(), "No matches")?;
    }
    for (date, group) in group_events_by_date(events) {
        line(out, accent_fg(), &date)?;
        for event in &group {
            line(
                out,
                text_fg(),
                &format!(
                    "  {}  {} - {}",
                    kickoff(event),
                    event.side_name(Qualifier::Home),
                    event.side_name(Qualifier::Away)
                ),
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn render_summaries<W: Write>(
    out: &mut W,
    title: &str,
    summaries: &[MatchSummary],
) -> Result<(), AppError> {
    print_header(out, title)?;
    if summaries.is_empty() {
        line(out, dim_fg(), "No matches")?;
    }
    for summary in summaries {
        let event = &summary.sport_event;
        let color = if summary.final_score().is_some() {
            result_fg()
        } else {
            text_fg()
        };
        line(
            out,
            color,
            &format!(
                "{}  {:>22} {:^7} {}",
                event.start_date(),
                event.side_name(Qualifier::Home),
                score_label(summary),
                event.side_name(Qualifier::Away)
            ),
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn render_league_stats<W: Write>(out: &mut W, stats: &LeagueStats) -> Result<(), AppError> {
    print_header(out, "League statistics")?;
    line(out, text_fg(), &format!("Matches:      {}", stats.total_matches))?;
    line(out, text_fg(), &format!("Avg goals:    {:.2}", stats.avg_goals))?;
    line(out, text_fg(), &format!("Over 2.5:     {:.1}%", stats.over25_percentage))?;
    line(out, text_fg(), &format!("BTTS:         {:.1}%", stats.btts_percentage))?;
    line(
        out,
        dim_fg(),
        &format!(
            "Accuracy {:.0}% / confidence {:.0}%",
            stats.accuracy, stats.confidence
        ),
    )?;

    if !stats.featured_matches.is_empty() {
        out.write_all(b"\n")?;
        print_header(out, "Featured matches (over 2.5 and BTTS)")?;
        for featured in &stats.featured_matches {
            line(
                out,
                result_fg(),
                &format!(
                    "{}  {} {} - {} {}",
                    featured.date,
                    featured.home_team,
                    featured.home_score,
                    featured.away_score,
                    featured.away_team
                ),
            )?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn render_team_stats<W: Write>(
    out: &mut W,
    teams: &BTreeMap<String, TeamStats>,
) -> Result<(), AppError> {
    print_header(out, "Teams")?;
    line(
        out,
        dim_fg(),
        &format!(
            "{:<28} {:<24} {:>3} {:>7} {:>5} {:>7} {:>7}",
            "Id", "Team", "M", "Goals", "GD", "O2.5%", "BTTS%"
        ),
    )?;

    let mut rows: Vec<(&String, &TeamStats)> = teams.iter().collect();
    rows.sort_by(|a, b| b.1.goal_difference().cmp(&a.1.goal_difference()));
    for (id, team) in rows {
        line(
            out,
            text_fg(),
            &format!(
                "{:<28} {:<24} {:>3} {:>7} {:>+5} {:>7.1} {:>7.1}",
                id,
                team.name,
                team.matches,
                format!("{}-{}", team.goals_for, team.goals_against),
                team.goal_difference(),
                team.over25_percentage,
                team.btts_percentage
            ),
        )?;
    }
    out.flush()?;
    Ok(())
}

fn side_name<'a>(side: Side, comparison: &'a TeamComparison) -> &'a str {
    match side {
        Side::A => &comparison.team_a.name,
        Side::B => &comparison.team_b.name,
        Side::Even => "Even",
    }
}

pub fn render_comparison<W: Write>(
    out: &mut W,
    comparison: &TeamComparison,
) -> Result<(), AppError> {
    let a = &comparison.team_a;
    let b = &comparison.team_b;
    print_header(out, &format!("{} vs {}", a.name, b.name))?;
    for (label, left, right) in [
        ("Matches", a.matches as f64, b.matches as f64),
        ("Goals for / match", a.avg_goals_for, b.avg_goals_for),
        ("Goals against / match", a.avg_goals_against, b.avg_goals_against),
        ("Over 2.5 %", a.over25_percentage, b.over25_percentage),
        ("BTTS %", a.btts_percentage, b.btts_percentage),
    ] {
        line(
            out,
            text_fg(),
            &format!("{label:<24} {left:>8.2} {right:>8.2}"),
        )?;
    }
    line(
        out,
        result_fg(),
        &format!("Better attack:  {}", side_name(comparison.better_attack, comparison)),
    )?;
    line(
        out,
        result_fg(),
        &format!("Better defense: {}", side_name(comparison.better_defense, comparison)),
    )?;
    out.flush()?;
    Ok(())
}

pub fn render_prediction<W: Write>(
    out: &mut W,
    prediction: &MatchPrediction,
) -> Result<(), AppError> {
    print_header(
        out,
        &format!("{} vs {} outlook", prediction.team_a, prediction.team_b),
    )?;
    line(
        out,
        text_fg(),
        &format!("Expected goals: {:.2}", prediction.avg_goals_predicted),
    )?;
    line(
        out,
        text_fg(),
        &format!("Over 2.5:       {:.1}%", prediction.over25_probability),
    )?;
    line(
        out,
        text_fg(),
        &format!("BTTS:           {:.1}%", prediction.btts_probability),
    )?;
    let color = match prediction.recommendation {
        Recommendation::Strong => result_fg(),
        Recommendation::Moderate => accent_fg(),
        Recommendation::Low => dim_fg(),
    };
    line(
        out,
        color,
        &format!(
            "Recommendation: {} ({:.1}%)",
            prediction.recommendation, prediction.combined_probability
        ),
    )?;
    out.flush()?;
    Ok(())
}

pub fn render_cache_stats<W: Write>(out: &mut W, stats: &CacheStats) -> Result<(), AppError> {
    print_header(out, "Response cache")?;
    line(
        out,
        text_fg(),
        &format!("Entries: {}/{}", stats.size, stats.capacity),
    )?;
    line(
        out,
        text_fg(),
        &format!(
            "Hits: {} ({}%)  Misses: {} ({}%)",
            stats.hits, stats.hit_rate, stats.misses, stats.miss_rate
        ),
    )?;
    out.flush()?;
    Ok(())
}
