//! HTTP fetching with retry, backoff and response classification

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::constants::retry;
use crate::data_fetcher::models::Validate;
use crate::error::AppError;

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry::BASE_DELAY_MS),
            max_delay: Duration::from_secs(retry::MAX_DELAY_SECONDS),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based): `base * 2^(attempt-1)`,
    /// capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

struct FailedAttempt {
    error: AppError,
    retry_after: Option<Duration>,
}

/// Fetches the body of `url`, retrying transient failures.
///
/// Every attempt is bounded by `timeout`. A non-success status or a transport
/// error is retried until `policy.max_attempts` attempts have been made; a
/// `Retry-After` header on 429/503 replaces the computed backoff. The API key
/// travels as the `api_key` query parameter and never shows up in logs or
/// errors, which only see `url`.
#[instrument(skip(client, url, api_key, policy), fields(url = %url))]
pub async fn fetch_text(
    client: &Client,
    url: &Url,
    api_key: &str,
    timeout: Duration,
    policy: &RetryPolicy,
) -> Result<String, AppError> {
    let log_url = url.as_str();
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match send_once(client, url, api_key, log_url, timeout).await {
            Ok(body) => {
                if attempt > 1 {
                    debug!("Succeeded on attempt {}/{}", attempt, max_attempts);
                }
                return Ok(body);
            }
            Err(failed) => {
                if !failed.error.is_retryable() || attempt >= max_attempts {
                    error!(
                        "Request failed after {} attempt(s): {}",
                        attempt, failed.error
                    );
                    return Err(failed.error);
                }
                let wait = failed
                    .retry_after
                    .unwrap_or_else(|| policy.delay_for(attempt))
                    .min(policy.max_delay);
                warn!(
                    "Transient error {} for {}. Retrying in {:?} (attempt {}/{})",
                    failed.error, log_url, wait, attempt, max_attempts
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}

async fn send_once(
    client: &Client,
    url: &Url,
    api_key: &str,
    log_url: &str,
    timeout: Duration,
) -> Result<String, FailedAttempt> {
    let response = client
        .get(url.clone())
        .query(&[("api_key", api_key)])
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FailedAttempt {
            error: classify_transport_error(e, log_url),
            retry_after: None,
        })?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let retry_after = if status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::SERVICE_UNAVAILABLE
        {
            response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
        } else {
            None
        };
        let body = response.text().await.unwrap_or_default();
        return Err(FailedAttempt {
            error: status_error(status, &body, log_url),
            retry_after,
        });
    }

    let text = response.text().await.map_err(|e| FailedAttempt {
        error: classify_transport_error(e, log_url),
        retry_after: None,
    })?;

    debug!("Response length: {} bytes", text.len());
    let preview: String = text.chars().take(1024).collect();
    debug!("Response text (first 1024 chars): {preview}");

    Ok(text)
}

fn classify_transport_error(e: reqwest::Error, log_url: &str) -> AppError {
    // reqwest's message would carry the full URL, key included
    let e = e.without_url();
    if e.is_timeout() {
        AppError::network_timeout(log_url)
    } else if e.is_connect() {
        AppError::network_connection(log_url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Maps a non-success status to an error. The provider puts a short reason
/// in `message` for some errors; otherwise the canonical reason is used.
fn status_error(status: StatusCode, body: &str, log_url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    error!("HTTP {} - {} (URL: {})", status_code, reason, log_url);

    match status_code {
        401 | 403 => AppError::api_unauthorized(status_code, reason, log_url),
        404 => AppError::api_not_found(log_url),
        429 => AppError::api_rate_limit(reason, log_url),
        400..=499 => AppError::api_client_error(status_code, reason, log_url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, log_url),
        _ => AppError::api_server_error(status_code, reason, log_url),
    }
}

/// Parses a response body and checks its invariants.
///
/// An empty body is `ApiNoData`, text that is not JSON is `ApiMalformedJson`,
/// JSON of the wrong shape is `ApiUnexpectedStructure` and a payload that
/// breaks an invariant is `ApiValidation`.
pub fn parse_response<T>(text: &str, log_url: &str) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let parsed = serde_json::from_str::<T>(text).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, log_url);
        error!(
            "Response text (first 200 chars): {}",
            text.chars().take(200).collect::<String>()
        );

        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            AppError::api_no_data("Response body is empty", log_url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            AppError::api_malformed_json("Response is not valid JSON", log_url)
        } else if e.is_syntax() || e.is_eof() {
            AppError::api_malformed_json(e.to_string(), log_url)
        } else {
            AppError::api_unexpected_structure(e.to_string(), log_url)
        }
    })?;

    parsed.validate().map_err(|message| {
        warn!("Response failed validation: {} (URL: {})", message, log_url);
        AppError::api_validation(message, log_url)
    })?;

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::data_fetcher::models::{CompetitionsResponse, SummariesResponse};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(5), Duration::from_millis(16000));
        assert_eq!(policy.delay_for(6), Duration::from_secs(30));
        assert_eq!(policy.delay_for(40), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/competitions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"competitions": []}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = Url::parse(&format!("{}/competitions.json", server.uri())).unwrap();
        let body = fetch_text(&client, &url, "k", Duration::from_secs(5), &fast_policy(3))
            .await
            .unwrap();
        assert_eq!(body, r#"{"competitions": []}"#);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = Url::parse(&format!("{}/competitions.json", server.uri())).unwrap();
        let err = fetch_text(&client, &url, "secret", Duration::from_secs(5), &fast_policy(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        for (route, status) in [("/a", 401), ("/b", 404), ("/c", 429), ("/d", 400), ("/e", 500)] {
            Mock::given(method("GET"))
                .and(path(format!("{route}.json")))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;
        }

        let client = create_test_http_client();
        let fetch = |route: &str| {
            let url = Url::parse(&format!("{}{}.json", server.uri(), route)).unwrap();
            let client = client.clone();
            async move {
                fetch_text(&client, &url, "k", Duration::from_secs(5), &fast_policy(1))
                    .await
                    .unwrap_err()
            }
        };

        assert!(matches!(fetch("/a").await, AppError::ApiUnauthorized { status: 401, .. }));
        assert!(matches!(fetch("/b").await, AppError::ApiNotFound { .. }));
        assert!(matches!(fetch("/c").await, AppError::ApiRateLimit { .. }));
        assert!(matches!(fetch("/d").await, AppError::ApiClientError { status: 400, .. }));
        assert!(matches!(fetch("/e").await, AppError::ApiServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_provider_message_is_used_as_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "Invalid key"})),
            )
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = Url::parse(&format!("{}/competitions.json", server.uri())).unwrap();
        let err = fetch_text(&client, &url, "k", Duration::from_secs(5), &fast_policy(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid key"));
    }

    #[tokio::test]
    async fn test_retry_after_header_is_honored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        // Base delay far above the test timeout: only the header can make this fast
        let policy = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
        };
        let client = create_test_http_client();
        let url = Url::parse(&format!("{}/x.json", server.uri())).unwrap();
        let result = tokio::time::timeout(
            Duration::from_secs(3),
            fetch_text(&client, &url, "k", Duration::from_secs(5), &policy),
        )
        .await
        .expect("Retry-After should replace the backoff");
        assert_eq!(result.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .expect(2)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = Url::parse(&format!("{}/slow.json", server.uri())).unwrap();
        let err = fetch_text(&client, &url, "k", Duration::from_millis(50), &fast_policy(2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NetworkTimeout { .. }));
    }

    #[test]
    fn test_parse_response_classification() {
        let empty = parse_response::<CompetitionsResponse>("", "u").unwrap_err();
        assert!(matches!(empty, AppError::ApiNoData { .. }));

        let html = parse_response::<CompetitionsResponse>("<html>oops</html>", "u").unwrap_err();
        assert!(matches!(html, AppError::ApiMalformedJson { .. }));

        let truncated =
            parse_response::<CompetitionsResponse>(r#"{"competitions": ["#, "u").unwrap_err();
        assert!(matches!(truncated, AppError::ApiMalformedJson { .. }));

        let wrong_shape =
            parse_response::<CompetitionsResponse>(r#"{"competitions": 5}"#, "u").unwrap_err();
        assert!(matches!(wrong_shape, AppError::ApiUnexpectedStructure { .. }));

        let ok = parse_response::<CompetitionsResponse>(r#"{"competitions": []}"#, "u").unwrap();
        assert!(ok.competitions.is_empty());
    }

    #[test]
    fn test_parse_response_runs_validation() {
        let body = serde_json::json!({
            "summaries": [{
                "sport_event": {
                    "id": "sr:sport_event:1",
                    "start_time": "2024-01-15T19:45:00+00:00",
                    "competitors": [{"id": "a", "name": "A", "qualifier": "home"}]
                }
            }]
        })
        .to_string();
        let err = parse_response::<SummariesResponse>(&body, "u").unwrap_err();
        assert!(matches!(err, AppError::ApiValidation { .. }));
        assert!(!err.is_retryable());
    }
}
