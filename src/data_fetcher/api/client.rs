use futures::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::date_utils::validate_date;
use super::fetch_utils::{RetryPolicy, fetch_text, parse_response};
use super::http_client::create_http_client_with_timeout;
use super::in_flight::InFlightRequests;
use super::urls::{Endpoint, build_url};
use crate::config::Config;
use crate::constants::retry;
use crate::data_fetcher::cache::{CacheStats, TtlCache};
use crate::data_fetcher::models::{
    ApiResponse, CompetitionInfoResponse, CompetitionsResponse, CompetitorProfileResponse,
    CompetitorsResponse, DataSource, MatchSummary, PlayerProfileResponse, SchedulesResponse,
    SeasonInfoResponse, SeasonScheduleResponse, SeasonsResponse, StandingsResponse,
    SummariesResponse, Validate, VersusResponse,
};
use crate::error::AppError;

/// Connection settings for [`SportradarClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub api_key: String,
    /// Bound on a single attempt
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub cache_capacity: usize,
}

impl ClientSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.http_timeout_seconds),
            retry: RetryPolicy {
                max_attempts: config.retry_attempts,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
                max_delay: Duration::from_secs(retry::MAX_DELAY_SECONDS),
            },
            cache_capacity: config.cache_capacity,
        }
    }
}

/// Result of [`SportradarClient::batch_live_data`] for one match
#[derive(Debug, Clone)]
pub struct LiveMatchData {
    pub event_id: String,
    pub summary: ApiResponse<MatchSummary>,
    pub timeline: ApiResponse<Value>,
}

/// Client for the soccer data provider.
///
/// Reads through an in-memory TTL cache, bounds every attempt with a timeout,
/// retries transient failures with exponential backoff and keeps at most one
/// request per resource in flight. Construct one and share it behind an `Arc`.
#[derive(Debug)]
pub struct SportradarClient {
    http: Client,
    api_base_url: String,
    api_key: RwLock<String>,
    timeout: Duration,
    retry: RetryPolicy,
    cache: Mutex<TtlCache<String>>,
    in_flight: InFlightRequests,
}

impl SportradarClient {
    pub fn new(settings: ClientSettings) -> Result<Self, AppError> {
        // Client-wide bound stays above the per-attempt timeout
        let client_timeout = settings.timeout.as_secs().max(1).saturating_mul(2);
        let http = create_http_client_with_timeout(client_timeout)?;
        Ok(Self::with_http_client(http, settings))
    }

    pub fn with_http_client(http: Client, settings: ClientSettings) -> Self {
        Self {
            http,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(settings.api_key),
            timeout: settings.timeout,
            retry: settings.retry,
            cache: Mutex::new(TtlCache::new(settings.cache_capacity)),
            in_flight: InFlightRequests::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(ClientSettings::from_config(config))
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_key(&self) -> String {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the API key. Cached responses were fetched with the old key
    /// and are dropped.
    pub async fn set_api_key(&self, api_key: impl Into<String>) {
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = api_key.into();
        self.cache.lock().await.clear();
        info!("API key updated, response cache cleared");
    }

    /// Removes one cached resource, or everything when `key` is `None`.
    pub async fn clear_cache(&self, key: Option<&str>) {
        let mut cache = self.cache.lock().await;
        match key {
            Some(key) => {
                cache.remove(key);
                debug!("Cleared cache entry {}", key);
            }
            None => {
                cache.clear();
                cache.reset_stats();
            }
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    /// Cancels every request that is still running
    pub fn cancel_all(&self) {
        self.in_flight.cancel_all();
    }

    /// Fetches an endpoint and reports where the data came from.
    #[instrument(skip(self), fields(path = %endpoint.path))]
    pub async fn fetch<T>(&self, endpoint: &Endpoint) -> Result<(T, DataSource), AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let key = endpoint.cache_key();

        if endpoint.cacheable {
            let cached = self.cache.lock().await.get(key);
            if let Some(body) = cached {
                match parse_response::<T>(&body, key) {
                    Ok(parsed) => {
                        debug!("Using cached response for {}", key);
                        return Ok((parsed, DataSource::Cache));
                    }
                    Err(e) => {
                        warn!("Discarding unreadable cached response for {}: {}", key, e);
                        self.cache.lock().await.remove(key);
                    }
                }
            }
        }

        let url = build_url(&self.api_base_url, endpoint)?;
        info!("Fetching data from URL: {}", url);

        let api_key = self.api_key();
        let body = self
            .in_flight
            .run(
                key,
                fetch_text(&self.http, &url, &api_key, self.timeout, &self.retry),
            )
            .await?;
        let parsed = parse_response::<T>(&body, url.as_str())?;

        if endpoint.cacheable {
            self.cache
                .lock()
                .await
                .set(key, body, endpoint.category.ttl());
        }

        Ok((parsed, DataSource::Network))
    }

    /// Like [`request`](Self::request) but hands back the raw error.
    pub async fn try_request<T>(&self, endpoint: &Endpoint) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        self.fetch(endpoint).await.map(|(data, _)| data)
    }

    /// Fetches an endpoint and folds any failure into the envelope.
    pub async fn request<T>(&self, endpoint: &Endpoint) -> ApiResponse<T>
    where
        T: DeserializeOwned + Validate,
    {
        ApiResponse::from_result(self.fetch(endpoint).await)
    }

    async fn request_for_date<T>(&self, date: &str, endpoint: fn(&str) -> Endpoint) -> ApiResponse<T>
    where
        T: DeserializeOwned + Validate,
    {
        match validate_date(date) {
            Ok(_) => self.request(&endpoint(date)).await,
            Err(e) => {
                warn!("Rejected date parameter: {}", date);
                ApiResponse::from_error(&e)
            }
        }
    }

    // Competitions and seasons

    pub async fn competitions(&self) -> ApiResponse<CompetitionsResponse> {
        self.request(&Endpoint::competitions()).await
    }

    pub async fn competition_info(&self, competition_id: &str) -> ApiResponse<CompetitionInfoResponse> {
        self.request(&Endpoint::competition_info(competition_id))
            .await
    }

    pub async fn competition_seasons(&self, competition_id: &str) -> ApiResponse<SeasonsResponse> {
        self.request(&Endpoint::competition_seasons(competition_id))
            .await
    }

    pub async fn season_info(&self, season_id: &str) -> ApiResponse<SeasonInfoResponse> {
        self.request(&Endpoint::season_info(season_id)).await
    }

    pub async fn season_standings(&self, season_id: &str) -> ApiResponse<StandingsResponse> {
        self.request(&Endpoint::season_standings(season_id)).await
    }

    pub async fn season_schedule(&self, season_id: &str) -> ApiResponse<SeasonScheduleResponse> {
        self.request(&Endpoint::season_schedule(season_id)).await
    }

    pub async fn season_competitors(&self, season_id: &str) -> ApiResponse<CompetitorsResponse> {
        self.request(&Endpoint::season_competitors(season_id))
            .await
    }

    pub async fn season_summaries(&self, season_id: &str) -> ApiResponse<SummariesResponse> {
        self.request(&Endpoint::season_summaries(season_id)).await
    }

    // Live data

    pub async fn live_schedules(&self) -> ApiResponse<SchedulesResponse> {
        self.request(&Endpoint::live_schedules()).await
    }

    pub async fn live_summaries(&self) -> ApiResponse<SummariesResponse> {
        self.request(&Endpoint::live_summaries()).await
    }

    pub async fn live_timelines(&self) -> ApiResponse<Value> {
        self.request(&Endpoint::live_timelines()).await
    }

    // Daily data

    pub async fn daily_schedules(&self, date: &str) -> ApiResponse<SchedulesResponse> {
        self.request_for_date(date, Endpoint::daily_schedules).await
    }

    pub async fn daily_summaries(&self, date: &str) -> ApiResponse<SummariesResponse> {
        self.request_for_date(date, Endpoint::daily_summaries).await
    }

    // Competitors and players

    pub async fn competitor_profile(&self, competitor_id: &str) -> ApiResponse<CompetitorProfileResponse> {
        self.request(&Endpoint::competitor_profile(competitor_id))
            .await
    }

    pub async fn competitor_schedules(&self, competitor_id: &str) -> ApiResponse<SeasonScheduleResponse> {
        self.request(&Endpoint::competitor_schedules(competitor_id))
            .await
    }

    pub async fn competitor_summaries(&self, competitor_id: &str) -> ApiResponse<SummariesResponse> {
        self.request(&Endpoint::competitor_summaries(competitor_id))
            .await
    }

    pub async fn competitor_versus(
        &self,
        competitor_id: &str,
        other_id: &str,
    ) -> ApiResponse<VersusResponse> {
        self.request(&Endpoint::competitor_versus(competitor_id, other_id))
            .await
    }

    pub async fn player_profile(&self, player_id: &str) -> ApiResponse<PlayerProfileResponse> {
        self.request(&Endpoint::player_profile(player_id)).await
    }

    pub async fn player_schedules(&self, player_id: &str) -> ApiResponse<SeasonScheduleResponse> {
        self.request(&Endpoint::player_schedules(player_id)).await
    }

    pub async fn player_summaries(&self, player_id: &str) -> ApiResponse<SummariesResponse> {
        self.request(&Endpoint::player_summaries(player_id)).await
    }

    // Single matches

    pub async fn sport_event_summary(&self, event_id: &str) -> ApiResponse<MatchSummary> {
        self.request(&Endpoint::sport_event_summary(event_id))
            .await
    }

    pub async fn sport_event_timeline(&self, event_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::sport_event_timeline(event_id))
            .await
    }

    pub async fn sport_event_lineups(&self, event_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::sport_event_lineups(event_id))
            .await
    }

    pub async fn sport_event_fun_facts(&self, event_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::sport_event_fun_facts(event_id))
            .await
    }

    // Statistics and probabilities

    pub async fn season_leaders(&self, season_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::season_leaders(season_id)).await
    }

    pub async fn seasonal_competitor_statistics(
        &self,
        season_id: &str,
        competitor_id: &str,
    ) -> ApiResponse<Value> {
        self.request(&Endpoint::seasonal_competitor_statistics(
            season_id,
            competitor_id,
        ))
        .await
    }

    pub async fn sport_event_probabilities(&self, event_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::sport_event_probabilities(event_id))
            .await
    }

    pub async fn season_probabilities(&self, season_id: &str) -> ApiResponse<Value> {
        self.request(&Endpoint::season_probabilities(season_id))
            .await
    }

    pub async fn live_probabilities(&self) -> ApiResponse<Value> {
        self.request(&Endpoint::live_probabilities()).await
    }

    // Push feeds

    pub async fn push_events(&self) -> ApiResponse<Value> {
        self.request(&Endpoint::push_events()).await
    }

    pub async fn push_statistics(&self) -> ApiResponse<Value> {
        self.request(&Endpoint::push_statistics()).await
    }

    /// Fetches summary and timeline of every match concurrently. One failing
    /// match does not affect the others.
    pub async fn batch_live_data(&self, event_ids: &[String]) -> Vec<LiveMatchData> {
        let futs = event_ids.iter().map(|id| async move {
            let (summary, timeline) =
                tokio::join!(self.sport_event_summary(id), self.sport_event_timeline(id));
            LiveMatchData {
                event_id: id.clone(),
                summary,
                timeline,
            }
        });
        join_all(futs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, max_attempts: u32) -> SportradarClient {
        SportradarClient::with_http_client(
            create_test_http_client(),
            ClientSettings {
                api_base_url: server.uri(),
                api_key: "test-key".to_string(),
                timeout: Duration::from_secs(2),
                retry: RetryPolicy {
                    max_attempts,
                    base_delay: Duration::from_millis(1),
                    max_delay: Duration::from_millis(10),
                },
                cache_capacity: 16,
            },
        )
    }

    fn competitions_body() -> Value {
        serde_json::json!({
            "competitions": [
                {"id": "sr:competition:17", "name": "Premier League",
                 "category": {"id": "sr:category:1", "name": "England"}, "type": "league", "gender": "men"}
            ]
        })
    }

    #[tokio::test]
    async fn test_api_key_sent_as_query_param_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(competitions_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 3);
        let first = client.competitions().await;
        assert!(first.success);
        assert_eq!(first.source, Some(DataSource::Network));
        assert_eq!(first.data.unwrap().competitions.len(), 1);

        let second = client.competitions().await;
        assert!(second.success);
        assert!(second.is_from_cache());

        let stats = client.cache_stats().await;
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_api_key_with_reserved_characters_is_sent_intact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .and(query_param("api_key", "ab+c&d#e"))
            .respond_with(ResponseTemplate::new(200).set_body_json(competitions_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        client.set_api_key("ab+c&d#e").await;
        let response = client.competitions().await;
        assert!(response.success, "{:?}", response.error);
    }

    #[tokio::test]
    async fn test_ids_cannot_rewrite_the_request_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions/sr:competition:17%3Fx=1%23/seasons.json"))
            .and(query_param("api_key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"seasons": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        let response = client.competition_seasons("sr:competition:17?x=1#").await;
        assert!(response.success, "{:?}", response.error);
    }

    #[test]
    fn test_huge_timeout_does_not_overflow() {
        let settings = ClientSettings {
            api_base_url: "http://localhost:1".to_string(),
            api_key: "k".to_string(),
            timeout: Duration::from_secs(u64::MAX),
            retry: RetryPolicy::default(),
            cache_capacity: 4,
        };
        assert!(SportradarClient::new(settings).is_ok());
    }

    #[tokio::test]
    async fn test_live_endpoint_is_never_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/live/schedules.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"sport_events": []})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        assert_eq!(client.live_schedules().await.source, Some(DataSource::Network));
        assert_eq!(client.live_schedules().await.source, Some(DataSource::Network));
        assert_eq!(client.cache_stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_failure_becomes_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server, 3);
        let response = client.season_info("sr:season:1").await;
        assert!(!response.success);
        assert!(response.data.is_none());
        let message = response.error.unwrap();
        assert!(message.contains("500"));
        assert!(!message.contains("test-key"));
    }

    #[tokio::test]
    async fn test_invalid_payload_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 3);
        let response = client.competitions().await;
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("The server response format is invalid")
        );
        // Nothing unreadable is cached
        assert_eq!(client.cache_stats().await.size, 0);
    }

    #[tokio::test]
    async fn test_invalid_date_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server, 3);
        for date in ["2024-13-01", "2024-1-1"] {
            let response = client.daily_schedules(date).await;
            assert!(!response.success);
            assert_eq!(
                response.error.unwrap(),
                format!("Invalid date format: {date}. Use YYYY-MM-DD")
            );
        }
    }

    #[tokio::test]
    async fn test_valid_date_hits_daily_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedules/2024-01-15/summaries.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"summaries": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        let response = client.daily_summaries("2024-01-15").await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(competitions_body())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let client = Arc::new(test_client(&server, 1));
        let first = {
            let client = client.clone();
            tokio::spawn(async move { client.competitions().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = client.competitions().await;
        let first = first.await.unwrap();

        assert!(!first.success);
        assert!(first.error.unwrap().contains("superseded"));
        assert!(second.success);
        assert_eq!(second.data.unwrap().competitions[0].name, "Premier League");
    }

    #[tokio::test]
    async fn test_set_api_key_clears_cache_and_uses_new_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(competitions_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .and(query_param("api_key", "new-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(competitions_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        assert!(client.competitions().await.success);
        client.set_api_key("new-key").await;
        assert_eq!(client.cache_stats().await.size, 0);

        let response = client.competitions().await;
        assert_eq!(response.source, Some(DataSource::Network));
    }

    #[tokio::test]
    async fn test_clear_single_cache_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(competitions_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        client.competitions().await;
        client.clear_cache(Some("/competitions")).await;
        assert_eq!(client.competitions().await.source, Some(DataSource::Network));
    }

    #[tokio::test]
    async fn test_batch_live_data_isolates_failures() {
        let server = MockServer::start().await;
        let summary = serde_json::json!({
            "sport_event": {
                "id": "sr:sport_event:1",
                "start_time": "2024-01-15T19:45:00+00:00",
                "competitors": [
                    {"id": "a", "name": "A", "qualifier": "home"},
                    {"id": "b", "name": "B", "qualifier": "away"}
                ],
                "status": "live"
            },
            "sport_event_status": {"status": "live", "match_status": "1st_half", "home_score": 0, "away_score": 0}
        });
        Mock::given(method("GET"))
            .and(path("/sport_events/sr:sport_event:1/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(summary))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sport_events/sr:sport_event:1/timeline.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"timeline": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server, 1);
        let results = client
            .batch_live_data(&["sr:sport_event:1".to_string(), "sr:sport_event:2".to_string()])
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].event_id, "sr:sport_event:1");
        assert!(results[0].summary.success);
        assert!(results[0].timeline.success);
        assert!(!results[1].summary.success);
        assert!(!results[1].timeline.success);
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            api_key: "k".to_string(),
            http_timeout_seconds: 7,
            retry_attempts: 5,
            retry_base_delay_ms: 250,
            cache_capacity: 32,
            ..Config::default()
        };
        let settings = ClientSettings::from_config(&config);
        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert_eq!(settings.retry.max_attempts, 5);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(250));
        assert_eq!(settings.cache_capacity, 32);
    }
}
