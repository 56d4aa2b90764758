use crate::data_fetcher::models::{
    Competitor, EventStatus, MatchSummary, Qualifier, SportEvent, SportEventStatus,
};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a competitor whose display name is the upper-cased id
    pub fn competitor(id: &str, qualifier: Qualifier) -> Competitor {
        Competitor {
            id: id.to_string(),
            name: id.to_uppercase(),
            country: None,
            country_code: None,
            abbreviation: None,
            qualifier: Some(qualifier),
            is_virtual: false,
        }
    }

    /// Creates an event between two competitor ids
    pub fn event(id: &str, home_id: &str, away_id: &str, start_time: &str, status: EventStatus) -> SportEvent {
        SportEvent {
            id: id.to_string(),
            start_time: start_time.to_string(),
            start_time_confirmed: true,
            competitors: vec![
                Self::competitor(home_id, Qualifier::Home),
                Self::competitor(away_id, Qualifier::Away),
            ],
            venue: None,
            status,
            match_status: None,
        }
    }

    /// Creates a closed match with a final score
    pub fn finished_match(
        id: &str,
        home_id: &str,
        away_id: &str,
        home_score: u32,
        away_score: u32,
        start_time: &str,
    ) -> MatchSummary {
        MatchSummary {
            sport_event: Self::event(id, home_id, away_id, start_time, EventStatus::Closed),
            sport_event_status: SportEventStatus {
                status: EventStatus::Closed,
                match_status: "ended".to_string(),
                home_score: Some(home_score),
                away_score: Some(away_score),
                ..Default::default()
            },
            statistics: None,
        }
    }

    /// Creates a match that has not kicked off yet
    pub fn unfinished_match(id: &str, home_id: &str, away_id: &str) -> MatchSummary {
        MatchSummary {
            sport_event: Self::event(
                id,
                home_id,
                away_id,
                "2024-01-20T15:00:00+00:00",
                EventStatus::NotStarted,
            ),
            sport_event_status: SportEventStatus {
                status: EventStatus::NotStarted,
                match_status: "not_started".to_string(),
                ..Default::default()
            },
            statistics: None,
        }
    }

    /// Creates a match in progress with its running score
    pub fn live_match(id: &str, home_id: &str, away_id: &str, home_score: u32, away_score: u32) -> MatchSummary {
        MatchSummary {
            sport_event: Self::event(
                id,
                home_id,
                away_id,
                "2024-01-15T19:45:00+00:00",
                EventStatus::Live,
            ),
            sport_event_status: SportEventStatus {
                status: EventStatus::Live,
                match_status: "2nd_half".to_string(),
                home_score: Some(home_score),
                away_score: Some(away_score),
                ..Default::default()
            },
            statistics: None,
        }
    }

    /// Provider JSON for a summaries payload holding the given matches
    pub fn summaries_json(matches: &[MatchSummary]) -> serde_json::Value {
        serde_json::json!({ "summaries": matches })
    }

    /// Provider JSON for a schedule payload holding the given events
    pub fn schedules_json(events: &[SportEvent]) -> serde_json::Value {
        serde_json::json!({ "sport_events": events })
    }
}
