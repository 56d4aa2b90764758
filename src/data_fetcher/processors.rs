//! Filtering, ordering and grouping of sport events for display

use chrono::{DateTime, Local};
use std::collections::BTreeMap;

use crate::data_fetcher::models::{EventStatus, MatchSummary, SportEvent};
use crate::error::AppError;

/// Keeps only the events that are being played right now.
pub fn filter_live_matches(events: &[SportEvent]) -> Vec<SportEvent> {
    events
        .iter()
        .filter(|e| e.status == EventStatus::Live)
        .cloned()
        .collect()
}

/// Sorts events by kickoff, earliest first. Events whose start time cannot
/// be parsed go last, keeping their relative order.
pub fn sort_events_by_time(events: &mut [SportEvent]) {
    events.sort_by_key(|e| match e.start_datetime() {
        Some(dt) => (false, Some(dt)),
        None => (true, None),
    });
}

/// Groups events by the date part of their start time.
pub fn group_events_by_date(events: &[SportEvent]) -> BTreeMap<String, Vec<SportEvent>> {
    let mut groups: BTreeMap<String, Vec<SportEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry(event.start_date().to_string())
            .or_default()
            .push(event.clone());
    }
    groups
}

/// Kickoff time as local `HH:MM`.
///
/// # Examples
///
/// ```rust
/// use soccer_dashboard::data_fetcher::processors::format_kickoff_time;
///
/// assert!(format_kickoff_time("2024-01-15T19:45:00+00:00").is_ok());
/// assert!(format_kickoff_time("tonight").is_err());
/// ```
pub fn format_kickoff_time(start_time: &str) -> Result<String, AppError> {
    let parsed = DateTime::parse_from_rfc3339(start_time)
        .map_err(|e| AppError::invalid_input(format!("Bad start time '{start_time}': {e}")))?;
    Ok(parsed.with_timezone(&Local).format("%H:%M").to_string())
}

/// Score text for a match: the final result, the running score of a live
/// match, or "-" before kickoff.
pub fn score_label(summary: &MatchSummary) -> String {
    let status = &summary.sport_event_status;
    match (status.home_score, status.away_score) {
        (Some(home), Some(away)) => format!("{home} - {away}"),
        _ => "-".to_string(),
    }
}
