//! Top-level payload shapes returned by the provider endpoints

use super::competition::{Competition, Season};
use super::competitor::{Competitor, PlayerProfile, Standing, StandingTable};
use super::sport_event::{MatchSummary, SportEvent};
use serde::{Deserialize, Serialize};

/// Invariant checks applied to a payload after it deserialized successfully.
///
/// A payload that parses but breaks an invariant is rejected the same way as
/// one that does not parse at all.
pub trait Validate {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

fn validate_events<'a>(events: impl IntoIterator<Item = &'a SportEvent>) -> Result<(), String> {
    events.into_iter().try_for_each(SportEvent::validate_sides)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitionsResponse {
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

impl Validate for CompetitionsResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitionInfoResponse {
    pub competition: Competition,
}

impl Validate for CompetitionInfoResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonsResponse {
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Validate for SeasonsResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonInfoResponse {
    pub season: Season,
}

impl Validate for SeasonInfoResponse {}

/// Live and daily schedules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulesResponse {
    #[serde(default)]
    pub sport_events: Vec<SportEvent>,
}

impl Validate for SchedulesResponse {
    fn validate(&self) -> Result<(), String> {
        validate_events(&self.sport_events)
    }
}

/// Season, competitor and player schedules. Each entry carries the event and,
/// for played matches, its status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonScheduleResponse {
    #[serde(default)]
    pub schedules: Vec<MatchSummary>,
}

impl SeasonScheduleResponse {
    pub fn sport_events(&self) -> impl Iterator<Item = &SportEvent> {
        self.schedules.iter().map(|s| &s.sport_event)
    }
}

impl Validate for SeasonScheduleResponse {
    fn validate(&self) -> Result<(), String> {
        validate_events(self.sport_events())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummariesResponse {
    #[serde(default)]
    pub summaries: Vec<MatchSummary>,
}

impl Validate for SummariesResponse {
    fn validate(&self) -> Result<(), String> {
        validate_events(self.summaries.iter().map(|s| &s.sport_event))
    }
}

impl Validate for MatchSummary {
    fn validate(&self) -> Result<(), String> {
        self.sport_event.validate_sides()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorsResponse {
    #[serde(default)]
    pub season_competitors: Vec<Competitor>,
}

impl Validate for CompetitorsResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorProfileResponse {
    pub competitor: Competitor,
    #[serde(default)]
    pub players: Vec<PlayerProfile>,
}

impl Validate for CompetitorProfileResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerProfileResponse {
    pub player: PlayerProfile,
}

impl Validate for PlayerProfileResponse {}

/// Head-to-head history between two competitors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersusResponse {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub last_meetings: Vec<MatchSummary>,
    #[serde(default)]
    pub next_meetings: Vec<MatchSummary>,
}

impl Validate for VersusResponse {
    fn validate(&self) -> Result<(), String> {
        validate_events(
            self.last_meetings
                .iter()
                .chain(&self.next_meetings)
                .map(|s| &s.sport_event),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingTable>,
}

impl StandingsResponse {
    /// Flattened overall table ordered by rank.
    ///
    /// Uses the table of type "total" when present, otherwise the first table.
    /// Rows of all groups are merged, so multi-group competitions come out as
    /// one list.
    pub fn total_table(&self) -> Vec<Standing> {
        let table = self
            .standings
            .iter()
            .find(|t| t.table_type == "total")
            .or_else(|| self.standings.first());

        let mut rows: Vec<Standing> = table
            .map(|t| {
                t.groups
                    .iter()
                    .flat_map(|g| g.group_standings.iter().cloned())
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by_key(|s| s.rank);
        rows
    }
}

impl Validate for StandingsResponse {}

/// Untyped endpoints (timelines, fun facts, leaders, probabilities, push feeds)
impl Validate for serde_json::Value {}
