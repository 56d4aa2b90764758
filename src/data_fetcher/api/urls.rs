//! Endpoint paths and URL building for the provider API

use reqwest::Url;

use crate::data_fetcher::cache::CacheCategory;
use crate::error::AppError;

/// One provider resource: its path segments (without the `.json` suffix),
/// its cache category and whether responses may be served from cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Raw segments. Ids are kept as given and encoded by [`build_url`].
    pub segments: Vec<String>,
    /// Display form of the path, also the cache key
    pub path: String,
    pub category: CacheCategory,
    pub cacheable: bool,
}

impl Endpoint {
    fn new(segments: &[&str], category: CacheCategory, cacheable: bool) -> Self {
        let path = segments.iter().fold(String::new(), |mut path, segment| {
            path.push('/');
            // `/` and `%` inside an id must not alias another resource's key
            path.push_str(&segment.replace('%', "%25").replace('/', "%2F"));
            path
        });
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            path,
            category,
            cacheable,
        }
    }

    fn cached(segments: &[&str], category: CacheCategory) -> Self {
        Self::new(segments, category, true)
    }

    fn live(segments: &[&str]) -> Self {
        Self::new(segments, CacheCategory::Live, false)
    }

    /// Key used for the response cache and for in-flight de-duplication.
    /// Never contains the API key.
    pub fn cache_key(&self) -> &str {
        &self.path
    }

    // Competitions and seasons

    pub fn competitions() -> Self {
        Self::cached(&["competitions"], CacheCategory::Static)
    }

    pub fn competition_info(competition_id: &str) -> Self {
        Self::cached(
            &["competitions", competition_id, "info"],
            CacheCategory::Static,
        )
    }

    pub fn competition_seasons(competition_id: &str) -> Self {
        Self::cached(
            &["competitions", competition_id, "seasons"],
            CacheCategory::Season,
        )
    }

    pub fn season_info(season_id: &str) -> Self {
        Self::cached(&["seasons", season_id, "info"], CacheCategory::Season)
    }

    pub fn season_standings(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "standings"],
            CacheCategory::Standings,
        )
    }

    pub fn season_schedule(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "schedules"],
            CacheCategory::Season,
        )
    }

    pub fn season_competitors(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "competitors"],
            CacheCategory::Season,
        )
    }

    pub fn season_summaries(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "summaries"],
            CacheCategory::Season,
        )
    }

    // Live data, never cached

    pub fn live_schedules() -> Self {
        Self::live(&["schedules", "live", "schedules"])
    }

    pub fn live_summaries() -> Self {
        Self::live(&["schedules", "live", "summaries"])
    }

    pub fn live_timelines() -> Self {
        Self::live(&["schedules", "live", "timelines"])
    }

    // Daily data. Callers validate the date first.

    pub fn daily_schedules(date: &str) -> Self {
        Self::cached(&["schedules", date, "schedules"], CacheCategory::Daily)
    }

    pub fn daily_summaries(date: &str) -> Self {
        Self::cached(&["schedules", date, "summaries"], CacheCategory::Daily)
    }

    // Competitors and players

    pub fn competitor_profile(competitor_id: &str) -> Self {
        Self::cached(
            &["competitors", competitor_id, "profile"],
            CacheCategory::Competitor,
        )
    }

    pub fn competitor_schedules(competitor_id: &str) -> Self {
        Self::cached(
            &["competitors", competitor_id, "schedules"],
            CacheCategory::Competitor,
        )
    }

    pub fn competitor_summaries(competitor_id: &str) -> Self {
        Self::cached(
            &["competitors", competitor_id, "summaries"],
            CacheCategory::Competitor,
        )
    }

    pub fn competitor_versus(competitor_id: &str, other_id: &str) -> Self {
        Self::cached(
            &["competitors", competitor_id, "versus", other_id, "summaries"],
            CacheCategory::Competitor,
        )
    }

    pub fn player_profile(player_id: &str) -> Self {
        Self::cached(
            &["players", player_id, "profile"],
            CacheCategory::Competitor,
        )
    }

    pub fn player_schedules(player_id: &str) -> Self {
        Self::cached(
            &["players", player_id, "schedules"],
            CacheCategory::Competitor,
        )
    }

    pub fn player_summaries(player_id: &str) -> Self {
        Self::cached(
            &["players", player_id, "summaries"],
            CacheCategory::Competitor,
        )
    }

    // Single matches

    pub fn sport_event_summary(event_id: &str) -> Self {
        Self::cached(
            &["sport_events", event_id, "summary"],
            CacheCategory::Live,
        )
    }

    pub fn sport_event_timeline(event_id: &str) -> Self {
        Self::cached(
            &["sport_events", event_id, "timeline"],
            CacheCategory::Live,
        )
    }

    pub fn sport_event_lineups(event_id: &str) -> Self {
        Self::cached(
            &["sport_events", event_id, "lineups"],
            CacheCategory::Daily,
        )
    }

    pub fn sport_event_fun_facts(event_id: &str) -> Self {
        Self::cached(
            &["sport_events", event_id, "fun_facts"],
            CacheCategory::Daily,
        )
    }

    // Statistics and probabilities

    pub fn season_leaders(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "leaders"],
            CacheCategory::Standings,
        )
    }

    pub fn seasonal_competitor_statistics(season_id: &str, competitor_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "competitors", competitor_id, "statistics"],
            CacheCategory::Standings,
        )
    }

    pub fn sport_event_probabilities(event_id: &str) -> Self {
        Self::cached(
            &["sport_events", event_id, "probabilities"],
            CacheCategory::Daily,
        )
    }

    pub fn season_probabilities(season_id: &str) -> Self {
        Self::cached(
            &["seasons", season_id, "probabilities"],
            CacheCategory::Daily,
        )
    }

    pub fn live_probabilities() -> Self {
        Self::live(&["schedules", "live", "probabilities"])
    }

    // Push feeds

    pub fn push_events() -> Self {
        Self::live(&["push", "events"])
    }

    pub fn push_statistics() -> Self {
        Self::live(&["push", "statistics"])
    }
}

/// Builds the request URL for an endpoint, without the API key.
///
/// Every segment is percent-encoded on its own, so an id can never add path
/// segments or start a query. The key is attached as a query parameter when
/// the request is sent.
///
/// # Example
/// ```
/// use soccer_dashboard::data_fetcher::api::{Endpoint, build_url};
///
/// let url = build_url("https://api.example.com/v4/en/", &Endpoint::competitions()).unwrap();
/// assert_eq!(url.as_str(), "https://api.example.com/v4/en/competitions.json");
/// ```
pub fn build_url(api_base_url: &str, endpoint: &Endpoint) -> Result<Url, AppError> {
    let mut url = Url::parse(api_base_url).map_err(|e| {
        AppError::config_error(format!("Invalid API base URL '{api_base_url}': {e}"))
    })?;
    let Some((last, rest)) = endpoint.segments.split_last() else {
        return Ok(url);
    };

    url.path_segments_mut()
        .map_err(|_| {
            AppError::config_error(format!("API base URL '{api_base_url}' cannot take a path"))
        })?
        .pop_if_empty()
        .extend(rest)
        .push(&format!("{last}.json"));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let url = build_url(
            "https://api.example.com/v4/en",
            &Endpoint::season_standings("sr:season:1"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v4/en/seasons/sr:season:1/standings.json"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_build_url_encodes_ids() {
        let url = build_url(
            "https://api.example.com",
            &Endpoint::competition_seasons("sr:competition:17?x=1#"),
        )
        .unwrap();
        assert_eq!(
            url.path(),
            "/competitions/sr:competition:17%3Fx=1%23/seasons.json"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = build_url("https://api.example.com", &Endpoint::season_info("a/../b")).unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        let err = build_url("not a url", &Endpoint::competitions()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_ids_with_slashes_get_their_own_cache_key() {
        assert_ne!(
            Endpoint::season_info("a/info").cache_key(),
            Endpoint::season_info("a").cache_key()
        );
        assert_eq!(
            Endpoint::season_info("a/b").cache_key(),
            "/seasons/a%2Fb/info"
        );
    }

    #[test]
    fn test_live_endpoints_bypass_cache() {
        for endpoint in [
            Endpoint::live_schedules(),
            Endpoint::live_summaries(),
            Endpoint::live_timelines(),
            Endpoint::live_probabilities(),
            Endpoint::push_events(),
            Endpoint::push_statistics(),
        ] {
            assert!(!endpoint.cacheable, "{} should not be cached", endpoint.path);
        }
        assert!(Endpoint::competitions().cacheable);
        assert!(Endpoint::daily_schedules("2024-01-15").cacheable);
    }

    #[test]
    fn test_endpoint_categories() {
        assert_eq!(Endpoint::competitions().category, CacheCategory::Static);
        assert_eq!(
            Endpoint::season_standings("s").category,
            CacheCategory::Standings
        );
        assert_eq!(
            Endpoint::daily_summaries("2024-01-15").category,
            CacheCategory::Daily
        );
        assert_eq!(
            Endpoint::competitor_profile("c").category,
            CacheCategory::Competitor
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            Endpoint::competitor_versus("sr:competitor:1", "sr:competitor:2").path,
            "/competitors/sr:competitor:1/versus/sr:competitor:2/summaries"
        );
        assert_eq!(
            Endpoint::seasonal_competitor_statistics("s", "c").cache_key(),
            "/seasons/s/competitors/c/statistics"
        );
        assert_eq!(
            Endpoint::daily_schedules("2024-01-15").path,
            "/schedules/2024-01-15/schedules"
        );
    }
}
