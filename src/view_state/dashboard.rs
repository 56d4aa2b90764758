use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::state::{LoadingState, ViewState};
use crate::constants::view::DEMO_DATA_NOTICE;
use crate::data_fetcher::cache::CacheStats;
use crate::data_fetcher::demo;
use crate::data_fetcher::models::{
    ApiResponse, Competition, DataSource, MatchSummary, SchedulesResponse, Season, SportEvent,
    Standing,
};
use crate::data_fetcher::processors::sort_events_by_time;
use crate::data_fetcher::SportradarClient;
use crate::error::AppError;
use crate::stats::{LeagueStats, TeamStats, analyze_matches, generate_team_stats};

/// Names one of the dashboard collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Competitions,
    Seasons,
    LiveMatches,
    DailyMatches,
    MatchSummaries,
    Standings,
}

/// A load that can be replayed by [`Dashboard::retry_last_failed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Competitions,
    ActiveCompetitions,
    CompetitionSeasons(String),
    LiveMatches,
    DailyMatches(String),
    MatchSummaries(String),
    SeasonSummaries(String),
    SeasonStandings(String),
}

enum Outcome {
    Loaded,
    Demo,
    Failed,
}

/// Applies a response to a state, substituting demo data when given some
fn settle<T>(
    state: &mut ViewState<T>,
    response: ApiResponse<T>,
    demo_data: impl FnOnce() -> Option<T>,
) -> Outcome {
    let source = response.source.unwrap_or(DataSource::Network);
    match (response.success, response.data) {
        (true, Some(data)) => {
            state.succeed(data, source);
            Outcome::Loaded
        }
        (_, _) => {
            let message = response
                .error
                .unwrap_or_else(|| "Unknown error occurred".to_string());
            match demo_data() {
                Some(data) => {
                    warn!("Load failed ({}), showing demo data", message);
                    state.succeed(data, DataSource::Demo);
                    state.set_notice_at(DEMO_DATA_NOTICE, Instant::now());
                    Outcome::Demo
                }
                None => {
                    warn!("Load failed: {}", message);
                    state.fail(message);
                    Outcome::Failed
                }
            }
        }
    }
}

fn fallback<T>(enabled: bool, build: impl FnOnce() -> T) -> impl FnOnce() -> Option<T> {
    move || enabled.then(build)
}

/// Turns an empty successful list into the given business error
fn require_non_empty<T>(
    response: ApiResponse<Vec<T>>,
    error: impl FnOnce() -> AppError,
) -> ApiResponse<Vec<T>> {
    let empty = response.success && response.data.as_ref().is_some_and(Vec::is_empty);
    if empty {
        ApiResponse::from_error(&error())
    } else {
        response
    }
}

/// View state for every collection the dashboard shows, loaded through one
/// shared client.
pub struct Dashboard {
    client: Arc<SportradarClient>,
    demo_fallback: bool,
    pub competitions: ViewState<Vec<Competition>>,
    pub seasons: ViewState<Vec<Season>>,
    pub live_matches: ViewState<Vec<SportEvent>>,
    pub daily_matches: ViewState<Vec<SportEvent>>,
    pub match_summaries: ViewState<Vec<MatchSummary>>,
    pub standings: ViewState<Vec<Standing>>,
    pub selected_competition: Option<Competition>,
    pub selected_season: Option<Season>,
    is_connected: bool,
    /// Competitions with a running season, keyed by season id
    active_competitions: BTreeMap<String, Competition>,
    failed: Vec<LoadRequest>,
}

impl Dashboard {
    pub fn new(client: Arc<SportradarClient>, demo_fallback: bool) -> Self {
        Self {
            client,
            demo_fallback,
            competitions: ViewState::default(),
            seasons: ViewState::default(),
            live_matches: ViewState::default(),
            daily_matches: ViewState::default(),
            match_summaries: ViewState::default(),
            standings: ViewState::default(),
            selected_competition: None,
            selected_season: None,
            is_connected: false,
            active_competitions: BTreeMap::new(),
            failed: Vec::new(),
        }
    }

    pub fn client(&self) -> &Arc<SportradarClient> {
        &self.client
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    /// True while any collection is loading
    pub fn global_loading(&self) -> bool {
        self.competitions.is_loading()
            || self.seasons.is_loading()
            || self.live_matches.is_loading()
            || self.daily_matches.is_loading()
            || self.match_summaries.is_loading()
            || self.standings.is_loading()
    }

    pub fn active_competitions(&self) -> &BTreeMap<String, Competition> {
        &self.active_competitions
    }

    pub fn failed_loads(&self) -> &[LoadRequest] {
        &self.failed
    }

    pub fn select_competition(&mut self, competition: Option<Competition>) {
        self.selected_competition = competition;
    }

    pub fn select_season(&mut self, season: Option<Season>) {
        self.selected_season = season;
    }

    fn record(&mut self, outcome: Outcome, request: LoadRequest) {
        match outcome {
            Outcome::Loaded => self.is_connected = true,
            Outcome::Demo => self.is_connected = false,
            Outcome::Failed => {
                self.is_connected = false;
                if !self.failed.contains(&request) {
                    debug!("Queued failed load {:?}", request);
                    self.failed.push(request);
                }
            }
        }
    }

    pub async fn load_competitions(&mut self) {
        self.competitions.start_loading();
        let response = self.client.competitions().await.map(|r| r.competitions);
        let demo_data = fallback(self.demo_fallback, demo::demo_competitions);
        let outcome = settle(&mut self.competitions, response, demo_data);
        self.record(outcome, LoadRequest::Competitions);
    }

    /// Loads competitions and keeps those with a running season.
    pub async fn load_active_competitions(&mut self) {
        self.competitions.start_loading();
        let response = self.client.competitions().await.map(|r| {
            r.competitions
                .into_iter()
                .filter(|c| c.current_season.is_some())
                .collect::<Vec<_>>()
        });
        let response = require_non_empty(response, || AppError::NoActiveCompetitions);
        let demo_data = fallback(self.demo_fallback, demo::demo_competitions);
        let outcome = settle(&mut self.competitions, response, demo_data);

        self.active_competitions = self
            .competitions
            .data
            .iter()
            .filter_map(|c| {
                c.current_season
                    .as_ref()
                    .map(|season| (season.id.clone(), c.clone()))
            })
            .collect();
        info!("{} competitions with an active season", self.active_competitions.len());
        self.record(outcome, LoadRequest::ActiveCompetitions);
    }

    pub async fn load_competition_seasons(&mut self, competition_id: &str) {
        self.seasons.start_loading();
        let response = self
            .client
            .competition_seasons(competition_id)
            .await
            .map(|r| r.seasons);
        let response =
            require_non_empty(response, || AppError::no_seasons_found(competition_id));
        let outcome = settle(&mut self.seasons, response, || None);
        self.record(
            outcome,
            LoadRequest::CompetitionSeasons(competition_id.to_string()),
        );
    }

    pub async fn load_live_matches(&mut self) {
        self.live_matches.start_loading();
        let response = self.client.live_schedules().await;
        self.apply_live_update(response);
    }

    /// Applies a live schedule envelope, e.g. one delivered by a poller.
    pub fn apply_live_update(&mut self, response: ApiResponse<SchedulesResponse>) {
        let response = response.map(|r| {
            let mut events = r.sport_events;
            sort_events_by_time(&mut events);
            events
        });
        let outcome = settle(&mut self.live_matches, response, || None);
        self.record(outcome, LoadRequest::LiveMatches);
    }

    pub async fn load_daily_matches(&mut self, date: &str) {
        self.daily_matches.start_loading();
        let response = self.client.daily_schedules(date).await.map(|r| {
            let mut events = r.sport_events;
            sort_events_by_time(&mut events);
            events
        });
        let outcome = settle(&mut self.daily_matches, response, || None);
        self.record(outcome, LoadRequest::DailyMatches(date.to_string()));
    }

    pub async fn load_match_summaries(&mut self, date: &str) {
        self.match_summaries.start_loading();
        let response = self.client.daily_summaries(date).await.map(|r| r.summaries);
        let seed = format!("daily:{date}");
        let demo_data = fallback(self.demo_fallback, move || demo::demo_matches(&seed));
        let outcome = settle(&mut self.match_summaries, response, demo_data);
        self.record(outcome, LoadRequest::MatchSummaries(date.to_string()));
    }

    /// Loads every summary of a season into the match summaries collection.
    pub async fn load_season_summaries(&mut self, season_id: &str) {
        self.match_summaries.start_loading();
        let response = self
            .client
            .season_summaries(season_id)
            .await
            .map(|r| r.summaries);
        let response = require_non_empty(response, || {
            AppError::no_matches_found(format!("season {season_id}"))
        });
        let owned_id = season_id.to_string();
        let demo_data = fallback(self.demo_fallback, move || demo::demo_matches(&owned_id));
        let outcome = settle(&mut self.match_summaries, response, demo_data);
        self.record(outcome, LoadRequest::SeasonSummaries(season_id.to_string()));
    }

    pub async fn load_season_standings(&mut self, season_id: &str) {
        self.standings.start_loading();
        let response = self
            .client
            .season_standings(season_id)
            .await
            .map(|r| r.total_table());
        let demo_data = fallback(self.demo_fallback, || demo::demo_standings().total_table());
        let outcome = settle(&mut self.standings, response, demo_data);
        self.record(outcome, LoadRequest::SeasonStandings(season_id.to_string()));
    }

    async fn run(&mut self, request: LoadRequest) {
        match request {
            LoadRequest::Competitions => self.load_competitions().await,
            LoadRequest::ActiveCompetitions => self.load_active_competitions().await,
            LoadRequest::CompetitionSeasons(id) => self.load_competition_seasons(&id).await,
            LoadRequest::LiveMatches => self.load_live_matches().await,
            LoadRequest::DailyMatches(date) => self.load_daily_matches(&date).await,
            LoadRequest::MatchSummaries(date) => self.load_match_summaries(&date).await,
            LoadRequest::SeasonSummaries(id) => self.load_season_summaries(&id).await,
            LoadRequest::SeasonStandings(id) => self.load_season_standings(&id).await,
        }
    }

    /// Replays every queued failed load once. Loads that fail again are
    /// queued again.
    pub async fn retry_last_failed(&mut self) {
        let pending = std::mem::take(&mut self.failed);
        if pending.is_empty() {
            return;
        }
        info!("Retrying {} failed loads", pending.len());
        for request in pending {
            self.run(request).await;
        }
    }

    /// Swaps the API key. The client drops its cache; states keep their data.
    pub async fn set_api_key(&mut self, api_key: &str) {
        self.client.set_api_key(api_key).await;
        self.is_connected = false;
    }

    pub async fn clear_cache(&self, key: Option<&str>) {
        self.client.clear_cache(key).await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.client.cache_stats().await
    }

    fn clear_state_error(&mut self, key: StateKey) {
        match key {
            StateKey::Competitions => self.competitions.clear_error(),
            StateKey::Seasons => self.seasons.clear_error(),
            StateKey::LiveMatches => self.live_matches.clear_error(),
            StateKey::DailyMatches => self.daily_matches.clear_error(),
            StateKey::MatchSummaries => self.match_summaries.clear_error(),
            StateKey::Standings => self.standings.clear_error(),
        }
    }

    /// Clears one collection's error, or all of them.
    pub fn clear_error(&mut self, key: Option<StateKey>) {
        match key {
            Some(key) => self.clear_state_error(key),
            None => {
                for key in [
                    StateKey::Competitions,
                    StateKey::Seasons,
                    StateKey::LiveMatches,
                    StateKey::DailyMatches,
                    StateKey::MatchSummaries,
                    StateKey::Standings,
                ] {
                    self.clear_state_error(key);
                }
            }
        }
    }

    pub fn status(&self, key: StateKey) -> LoadingState {
        match key {
            StateKey::Competitions => self.competitions.status,
            StateKey::Seasons => self.seasons.status,
            StateKey::LiveMatches => self.live_matches.status,
            StateKey::DailyMatches => self.daily_matches.status,
            StateKey::MatchSummaries => self.match_summaries.status,
            StateKey::Standings => self.standings.status,
        }
    }

    /// League statistics over the loaded match summaries
    pub fn stats(&self) -> Option<LeagueStats> {
        analyze_matches(&self.match_summaries.data)
    }

    pub fn team_stats(&self) -> BTreeMap<String, TeamStats> {
        generate_team_stats(&self.match_summaries.data)
    }
}
