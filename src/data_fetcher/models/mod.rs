pub mod competition;
pub mod competitor;
pub mod envelope;
pub mod responses;
pub mod sport_event;

pub use competition::{Category, Competition, CurrentSeason, Season};
pub use competitor::{
    Competitor, PlayerProfile, Qualifier, Standing, StandingGroup, StandingTable,
};
pub use envelope::{ApiResponse, DataSource};
pub use responses::{
    CompetitionInfoResponse, CompetitionsResponse, CompetitorProfileResponse,
    CompetitorsResponse, PlayerProfileResponse, SchedulesResponse, SeasonInfoResponse,
    SeasonScheduleResponse, SeasonsResponse, StandingsResponse, SummariesResponse, Validate,
    VersusResponse,
};
pub use sport_event::{
    CompetitorStatistics, EventStatus, MatchStatistics, MatchSummary, PeriodScore, SportEvent,
    SportEventStatus, StatisticsTotals, Venue,
};
