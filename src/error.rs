use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API key rejected ({status}): {message} (URL: {url})")]
    ApiUnauthorized {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("API response failed validation: {message} (URL: {url})")]
    ApiValidation { message: String, url: String },

    // Local input validation, raised before any request is sent
    #[error("Invalid date format: {date}. Use YYYY-MM-DD")]
    InvalidDate { date: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Business logic errors
    #[error("No seasons found for competition {competition_id}")]
    NoSeasonsFound { competition_id: String },

    #[error("No matches found for {scope}")]
    NoMatchesFound { scope: String },

    #[error("No competitions with an active season were found")]
    NoActiveCompetitions,

    #[error("No statistics found for team {team_id}")]
    TeamStatsNotFound { team_id: String },

    #[error("Request superseded by a newer request for {key}")]
    RequestSuperseded { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an unauthorized error (401/403, usually a bad API key)
    pub fn api_unauthorized(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiUnauthorized {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes not covered elsewhere)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a payload validation error
    pub fn api_validation(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiValidation {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate { date: date.into() }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn no_seasons_found(competition_id: impl Into<String>) -> Self {
        Self::NoSeasonsFound {
            competition_id: competition_id.into(),
        }
    }

    pub fn no_matches_found(scope: impl Into<String>) -> Self {
        Self::NoMatchesFound {
            scope: scope.into(),
        }
    }

    pub fn team_stats_not_found(team_id: impl Into<String>) -> Self {
        Self::TeamStatsNotFound {
            team_id: team_id.into(),
        }
    }

    pub fn request_superseded(key: impl Into<String>) -> Self {
        Self::RequestSuperseded { key: key.into() }
    }

    /// Check if a request that failed with this error is worth sending again.
    ///
    /// Transport failures and any non-success HTTP status are retried. Payload
    /// validation, local input errors and cancellations are not: the same
    /// request would fail the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiNotFound { .. }
                | AppError::ApiUnauthorized { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::ApiRateLimit { .. }
        )
    }

    /// Check if error indicates data not found (business logic, not technical error)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::ApiNotFound { .. }
                | AppError::ApiNoData { .. }
                | AppError::NoSeasonsFound { .. }
                | AppError::NoMatchesFound { .. }
                | AppError::NoActiveCompetitions
                | AppError::TeamStatsNotFound { .. }
        )
    }

    /// Short message suitable for showing to the user in place of data.
    ///
    /// Payload problems collapse into one generic line; the full error with
    /// the URL is still logged by the fetch layer.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ApiMalformedJson { .. }
            | AppError::ApiUnexpectedStructure { .. }
            | AppError::ApiValidation { .. } => "The server response format is invalid".to_string(),
            AppError::NetworkTimeout { .. } => "The request took too long".to_string(),
            AppError::ApiUnauthorized { .. } => {
                "The API key was rejected. Check your configuration".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/competitions.json");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/competitions.json"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too many requests", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too many requests (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_network_timeout_helper() {
        let error = AppError::network_timeout("https://api.example.com");
        assert_eq!(
            error.to_string(),
            "Network timeout while fetching data from: https://api.example.com"
        );
    }

    #[test]
    fn test_invalid_date_message() {
        let error = AppError::invalid_date("2024-1-1");
        assert_eq!(error.to_string(), "Invalid date format: 2024-1-1. Use YYYY-MM-DD");
    }

    #[test]
    fn test_no_seasons_found_message() {
        let error = AppError::no_seasons_found("sr:competition:17");
        assert_eq!(
            error.to_string(),
            "No seasons found for competition sr:competition:17"
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn test_is_retryable() {
        assert!(AppError::network_timeout("u").is_retryable());
        assert!(AppError::network_connection("u", "refused").is_retryable());
        assert!(AppError::api_server_error(500, "x", "u").is_retryable());
        assert!(AppError::api_service_unavailable(503, "x", "u").is_retryable());
        assert!(AppError::api_rate_limit("x", "u").is_retryable());
        assert!(AppError::api_client_error(400, "x", "u").is_retryable());

        assert!(!AppError::api_malformed_json("x", "u").is_retryable());
        assert!(!AppError::api_validation("x", "u").is_retryable());
        assert!(!AppError::invalid_date("2024-13-01").is_retryable());
        assert!(!AppError::request_superseded("/competitions").is_retryable());
        assert!(!AppError::config_error("x").is_retryable());
    }

    #[test]
    fn test_is_not_found() {
        assert!(AppError::api_not_found("u").is_not_found());
        assert!(AppError::api_no_data("empty", "u").is_not_found());
        assert!(AppError::NoActiveCompetitions.is_not_found());
        assert!(AppError::no_matches_found("season x").is_not_found());
        assert!(!AppError::network_timeout("u").is_not_found());
    }

    #[test]
    fn test_user_message_hides_payload_details() {
        let error = AppError::api_unexpected_structure("missing field `id`", "https://x");
        assert_eq!(error.user_message(), "The server response format is invalid");

        let error = AppError::network_timeout("https://x");
        assert_eq!(error.user_message(), "The request took too long");

        let error = AppError::invalid_date("2024-13-01");
        assert_eq!(error.user_message(), error.to_string());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert_eq!(app_error.to_string(), "I/O error: File not found");
    }

    #[test]
    fn test_error_from_toml_de() {
        let toml_error = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }
}
