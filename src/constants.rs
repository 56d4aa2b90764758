//! Application-wide constants and configuration defaults
//!
//! This module centralizes the magic numbers used by the client, the cache
//! and the statistics so they can be tuned in one place.

/// Default upstream base URL (Sportradar soccer extended API, trial access level)
pub const DEFAULT_API_BASE_URL: &str = "https://api.sportradar.com/soccer-extended/trial/v4/en";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Largest accepted per-attempt HTTP timeout in seconds
pub const MAX_HTTP_TIMEOUT_SECONDS: u64 = 300;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Cache TTL (Time To Live) values in seconds, one per kind of data
pub mod cache_ttl {
    /// Live scores and live schedules
    pub const LIVE_SECONDS: u64 = 10;

    /// Daily schedules and summaries (5 minutes)
    pub const DAILY_SECONDS: u64 = 300;

    /// League tables (5 minutes)
    pub const STANDINGS_SECONDS: u64 = 300;

    /// Season info, season schedules and season summaries (1 hour)
    pub const SEASON_SECONDS: u64 = 3600;

    /// Competitor and player profiles (30 minutes)
    pub const COMPETITOR_SECONDS: u64 = 1800;

    /// Competition metadata that practically never changes (24 hours)
    pub const STATIC_SECONDS: u64 = 86400;
}

/// Cache sizing
pub mod cache {
    /// Default number of responses kept in memory
    pub const DEFAULT_CAPACITY: usize = 256;
}

/// Retry configuration
pub mod retry {
    /// Total number of attempts for one request (first try included)
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 1000;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECONDS: u64 = 30;
}

/// Live view polling
pub mod polling {
    /// Default interval between live schedule refreshes
    pub const LIVE_REFRESH_SECONDS: u64 = 30;

    /// Lower bound accepted from configuration
    pub const MIN_LIVE_REFRESH_SECONDS: u64 = 10;

    /// Upper bound accepted from configuration
    pub const MAX_LIVE_REFRESH_SECONDS: u64 = 300;
}

/// View state tuning
pub mod view {
    /// How long an error stays visible before it is cleared automatically
    pub const ERROR_DISPLAY_SECONDS: u64 = 5;

    /// Message shown when demo data replaces a failed load
    pub const DEMO_DATA_NOTICE: &str = "Using demo data - API unavailable";
}

/// Statistics thresholds
pub mod stats {
    /// Goal line for the "over 2.5" market
    pub const OVER_GOALS_LINE: f64 = 2.5;

    /// Maximum number of featured (over 2.5 and BTTS) matches reported
    pub const MAX_FEATURED_MATCHES: usize = 15;

    /// Combined probability at or above which a prediction is a strong recommendation
    pub const STRONG_RECOMMENDATION_THRESHOLD: f64 = 70.0;

    /// Combined probability at or above which a prediction is a moderate recommendation
    pub const MODERATE_RECOMMENDATION_THRESHOLD: f64 = 50.0;
}

/// Demo data generation
pub mod demo {
    /// Number of generated matches per season
    pub const MATCHES_PER_SEASON: usize = 150;

    /// Generated matches are spread over this many past days
    pub const MATCH_WINDOW_DAYS: i64 = 180;
}

/// Environment variable names
pub mod env_vars {
    /// Upstream base URL override
    pub const API_BASE_URL: &str = "SOCCER_API_BASE_URL";

    /// API key
    pub const API_KEY: &str = "SPORTRADAR_API_KEY";

    /// Log file path override
    pub const LOG_FILE: &str = "SOCCER_LOG_FILE";

    /// HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "SOCCER_HTTP_TIMEOUT";

    /// Retry attempt count override
    pub const RETRY_ATTEMPTS: &str = "SOCCER_RETRY_ATTEMPTS";

    /// Enables demo data when the API is unavailable ("1"/"true")
    pub const DEMO_FALLBACK: &str = "SOCCER_DEMO_FALLBACK";
}
