//! Head-to-head comparison and a goals prediction built from team records.
//!
//! The prediction is a simple average of the two records and is only meant
//! as a talking point next to the numbers it comes from.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::team_stats::TeamStats;
use crate::constants::stats::{MODERATE_RECOMMENDATION_THRESHOLD, STRONG_RECOMMENDATION_THRESHOLD};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
    Even,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamComparison {
    pub team_a: TeamStats,
    pub team_b: TeamStats,
    /// Higher goals scored per match
    pub better_attack: Side,
    /// Lower goals conceded per match
    pub better_defense: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Strong,
    Moderate,
    Low,
}

impl Recommendation {
    pub fn from_probability(combined: f64) -> Self {
        if combined >= STRONG_RECOMMENDATION_THRESHOLD {
            Recommendation::Strong
        } else if combined >= MODERATE_RECOMMENDATION_THRESHOLD {
            Recommendation::Moderate
        } else {
            Recommendation::Low
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::Strong => "Strong",
            Recommendation::Moderate => "Moderate",
            Recommendation::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchPrediction {
    pub team_a: String,
    pub team_b: String,
    pub avg_goals_predicted: f64,
    pub over25_probability: f64,
    pub btts_probability: f64,
    pub combined_probability: f64,
    pub recommendation: Recommendation,
}

fn pick_pair<'a>(
    stats: &'a BTreeMap<String, TeamStats>,
    team_a: &str,
    team_b: &str,
) -> Result<(&'a TeamStats, &'a TeamStats), AppError> {
    if team_a == team_b {
        return Err(AppError::invalid_input(format!(
            "cannot compare team {team_a} with itself"
        )));
    }
    let a = stats
        .get(team_a)
        .ok_or_else(|| AppError::team_stats_not_found(team_a))?;
    let b = stats
        .get(team_b)
        .ok_or_else(|| AppError::team_stats_not_found(team_b))?;
    Ok((a, b))
}

fn higher(a: f64, b: f64) -> Side {
    match a.partial_cmp(&b) {
        Some(std::cmp::Ordering::Greater) => Side::A,
        Some(std::cmp::Ordering::Less) => Side::B,
        _ => Side::Even,
    }
}

pub fn compare_teams(
    stats: &BTreeMap<String, TeamStats>,
    team_a: &str,
    team_b: &str,
) -> Result<TeamComparison, AppError> {
    let (a, b) = pick_pair(stats, team_a, team_b)?;
    Ok(TeamComparison {
        team_a: a.clone(),
        team_b: b.clone(),
        better_attack: higher(a.avg_goals_for, b.avg_goals_for),
        // Fewer goals conceded wins, so the arguments swap
        better_defense: higher(b.avg_goals_against, a.avg_goals_against),
    })
}

pub fn predict_match(
    stats: &BTreeMap<String, TeamStats>,
    team_a: &str,
    team_b: &str,
) -> Result<MatchPrediction, AppError> {
    let (a, b) = pick_pair(stats, team_a, team_b)?;

    let avg_goals_predicted =
        (a.avg_goals_for + b.avg_goals_for + a.avg_goals_against + b.avg_goals_against) / 2.0;
    let over25_probability = (a.over25_percentage + b.over25_percentage) / 2.0;
    let btts_probability = (a.btts_percentage + b.btts_percentage) / 2.0;
    let combined_probability = (over25_probability + btts_probability) / 2.0;
    let recommendation = Recommendation::from_probability(combined_probability);

    debug!(
        "Prediction {} vs {}: goals={:.2}, over25={:.1}%, btts={:.1}%, {}",
        a.name, b.name, avg_goals_predicted, over25_probability, btts_probability, recommendation
    );

    Ok(MatchPrediction {
        team_a: a.name.clone(),
        team_b: b.name.clone(),
        avg_goals_predicted,
        over25_probability,
        btts_probability,
        combined_probability,
        recommendation,
    })
}
