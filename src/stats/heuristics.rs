//! Accuracy and confidence scores shown next to league statistics.
//!
//! These are display heuristics, not calibrated probabilities.

const BASE_ACCURACY: f64 = 75.0;
const MAX_GOAL_CONSISTENCY: f64 = 15.0;
const MAX_PREDICTION_CONSISTENCY: f64 = 10.0;

const BASE_CONFIDENCE: f64 = 60.0;
const MAX_SAMPLE_BONUS: f64 = 20.0;
const CONSISTENCY_BONUS: f64 = 10.0;
/// Over 2.5 and BTTS counts closer than this earn the consistency bonus
const CONSISTENCY_WINDOW: u32 = 10;

const SCORE_CAP: f64 = 95.0;

/// `min(75 + min((avg-1)*10, 15) + min(|50-over25|/2, 10), 95)`
pub fn calculate_accuracy(avg_goals: f64, over25_percentage: f64) -> f64 {
    let goal_consistency = ((avg_goals - 1.0) * 10.0).min(MAX_GOAL_CONSISTENCY);
    let prediction_consistency =
        ((50.0 - over25_percentage).abs() / 2.0).min(MAX_PREDICTION_CONSISTENCY);
    (BASE_ACCURACY + goal_consistency + prediction_consistency).min(SCORE_CAP)
}

/// `min(60 + min(n/10, 20) + (|over25 - btts| < 10 ? 10 : 0), 95)`
pub fn calculate_confidence(total_matches: usize, over25_count: u32, btts_count: u32) -> f64 {
    let sample_size = (total_matches as f64 / 10.0).min(MAX_SAMPLE_BONUS);
    let consistency = if over25_count.abs_diff(btts_count) < CONSISTENCY_WINDOW {
        CONSISTENCY_BONUS
    } else {
        0.0
    };
    (BASE_CONFIDENCE + sample_size + consistency).min(SCORE_CAP)
}
