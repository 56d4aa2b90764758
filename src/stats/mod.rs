//! Goal statistics derived from match summaries.

pub mod calculator;
pub mod heuristics;
pub mod prediction;
pub mod team_stats;

pub use calculator::{FeaturedMatch, LeagueStats, analyze_matches};
pub use heuristics::{calculate_accuracy, calculate_confidence};
pub use prediction::{
    MatchPrediction, Recommendation, Side, TeamComparison, compare_teams, predict_match,
};
pub use team_stats::{TeamStats, generate_team_stats};
