use chrono::{DateTime, Utc};
use tracing::debug;

use super::heuristics::{calculate_accuracy, calculate_confidence};
use crate::constants::stats::{MAX_FEATURED_MATCHES, OVER_GOALS_LINE};
use crate::data_fetcher::models::{MatchSummary, Qualifier};

/// A finished match in which both teams scored and the total went over 2.5
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedMatch {
    pub event_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub total_goals: u32,
    /// Date part of the start time
    pub date: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// League-wide goal statistics over the finished matches of a set
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueStats {
    pub avg_goals: f64,
    pub over25_percentage: f64,
    pub btts_percentage: f64,
    pub total_matches: usize,
    pub accuracy: f64,
    pub confidence: f64,
    pub featured_matches: Vec<FeaturedMatch>,
}

pub(crate) fn is_over_line(total_goals: u32) -> bool {
    f64::from(total_goals) > OVER_GOALS_LINE
}

pub(crate) fn is_btts(home: u32, away: u32) -> bool {
    home > 0 && away > 0
}

/// Folds match summaries into league statistics.
///
/// Only finished matches with both scores count. Returns `None` when no
/// match qualifies.
pub fn analyze_matches(matches: &[MatchSummary]) -> Option<LeagueStats> {
    let finished: Vec<(&MatchSummary, u32, u32)> = matches
        .iter()
        .filter_map(|m| m.final_score().map(|(home, away)| (m, home, away)))
        .collect();

    if finished.is_empty() {
        debug!("No finished matches among {} summaries", matches.len());
        return None;
    }

    let mut total_goals = 0u32;
    let mut over25_count = 0u32;
    let mut btts_count = 0u32;
    let mut featured = Vec::new();

    for (summary, home, away) in &finished {
        let goals = home + away;
        total_goals += goals;

        let over = is_over_line(goals);
        let btts = is_btts(*home, *away);
        if over {
            over25_count += 1;
        }
        if btts {
            btts_count += 1;
        }
        if over && btts {
            let event = &summary.sport_event;
            featured.push(FeaturedMatch {
                event_id: event.id.clone(),
                home_team: event.side_name(Qualifier::Home).to_string(),
                away_team: event.side_name(Qualifier::Away).to_string(),
                home_score: *home,
                away_score: *away,
                total_goals: goals,
                date: event.start_date().to_string(),
                start_time: event.start_datetime(),
            });
        }
    }

    // Most goals first, newest first among equals
    featured.sort_by(|a, b| {
        b.total_goals
            .cmp(&a.total_goals)
            .then_with(|| b.start_time.cmp(&a.start_time))
    });
    featured.truncate(MAX_FEATURED_MATCHES);

    let count = finished.len();
    let avg_goals = f64::from(total_goals) / count as f64;
    let over25_percentage = f64::from(over25_count) / count as f64 * 100.0;
    let btts_percentage = f64::from(btts_count) / count as f64 * 100.0;

    debug!(
        "Analyzed {} finished matches: avg_goals={:.2}, over25={:.1}%, btts={:.1}%",
        count, avg_goals, over25_percentage, btts_percentage
    );

    Some(LeagueStats {
        avg_goals,
        over25_percentage,
        btts_percentage,
        total_matches: count,
        accuracy: calculate_accuracy(avg_goals, over25_percentage),
        confidence: calculate_confidence(count, over25_count, btts_count),
        featured_matches: featured,
    })
}
