use super::competitor::{Competitor, Qualifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle status of a match as reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    NotStarted,
    Live,
    Ended,
    Closed,
    Postponed,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, EventStatus::Ended | EventStatus::Closed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SportEvent {
    pub id: String,
    pub start_time: String,
    #[serde(default)]
    pub start_time_confirmed: bool,
    pub competitors: Vec<Competitor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_status: Option<String>,
}

impl SportEvent {
    pub fn competitor(&self, qualifier: Qualifier) -> Option<&Competitor> {
        self.competitors
            .iter()
            .find(|c| c.qualifier == Some(qualifier))
    }

    pub fn home(&self) -> Option<&Competitor> {
        self.competitor(Qualifier::Home)
    }

    pub fn away(&self) -> Option<&Competitor> {
        self.competitor(Qualifier::Away)
    }

    /// Name of the competitor on the given side, or "Home"/"Away" when missing.
    pub fn side_name(&self, qualifier: Qualifier) -> &str {
        match self.competitor(qualifier) {
            Some(c) => &c.name,
            None => match qualifier {
                Qualifier::Home => "Home",
                Qualifier::Away => "Away",
            },
        }
    }

    pub fn involves(&self, competitor_id: &str) -> bool {
        self.competitors.iter().any(|c| c.id == competitor_id)
    }

    /// Date part (YYYY-MM-DD) of the start time.
    pub fn start_date(&self) -> &str {
        self.start_time
            .split('T')
            .next()
            .unwrap_or(self.start_time.as_str())
    }

    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.start_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Checks that the event has exactly one home and exactly one away competitor.
    pub fn validate_sides(&self) -> Result<(), String> {
        let count = |q: Qualifier| {
            self.competitors
                .iter()
                .filter(|c| c.qualifier == Some(q))
                .count()
        };
        let (home, away) = (count(Qualifier::Home), count(Qualifier::Away));
        if home == 1 && away == 1 {
            Ok(())
        } else {
            Err(format!(
                "event {} has {} home and {} away competitors",
                self.id, home, away
            ))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodScore {
    pub home_score: u32,
    pub away_score: u32,
    #[serde(rename = "type", default)]
    pub period_type: String,
    #[serde(default)]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SportEventStatus {
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub match_status: String,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub period_scores: Vec<PeriodScore>,
}

impl SportEventStatus {
    /// True when the event status is `ended`/`closed`, or the match status
    /// is `ended` for feeds that omit the event status.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal() || self.match_status == "ended"
    }

    /// Final (home, away) score, only for finished matches with both scores present.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if !self.is_finished() {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorStatistics {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub statistics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatisticsTotals {
    #[serde(default)]
    pub competitors: Vec<CompetitorStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchStatistics {
    pub totals: StatisticsTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub sport_event: SportEvent,
    #[serde(default)]
    pub sport_event_status: SportEventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<MatchStatistics>,
}

impl MatchSummary {
    pub fn final_score(&self) -> Option<(u32, u32)> {
        self.sport_event_status.final_score()
    }

    pub fn total_goals(&self) -> Option<u32> {
        self.final_score().map(|(home, away)| home + away)
    }
}
