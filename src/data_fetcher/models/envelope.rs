use crate::error::AppError;
use chrono::{DateTime, Utc};

/// Where the data in a successful response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Network,
    Cache,
    Demo,
}

/// Uniform result of a client call.
///
/// Failures never escape as `Err`; they are folded into `success: false` with
/// a user-facing message so views can render them in place of data.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: Option<DataSource>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, source: DataSource) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            source: Some(source),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
            source: None,
        }
    }

    pub fn from_error(error: &AppError) -> Self {
        Self::err(error.user_message())
    }

    pub fn from_result(result: Result<(T, DataSource), AppError>) -> Self {
        match result {
            Ok((data, source)) => Self::ok(data, source),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn is_from_cache(&self) -> bool {
        self.source == Some(DataSource::Cache)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            timestamp: self.timestamp,
            source: self.source,
        }
    }

    /// Converts back into a `Result` carrying the error message on failure.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(self
                .error
                .unwrap_or_else(|| "Request failed without an error message".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let response = ApiResponse::ok(vec![1, 2, 3], DataSource::Cache);
        assert!(response.success);
        assert!(response.is_from_cache());
        assert!(response.error.is_none());
        assert_eq!(response.into_result(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_error_envelope_uses_user_message() {
        let response: ApiResponse<()> =
            ApiResponse::from_error(&AppError::api_malformed_json("bad", "https://x"));
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.source.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("The server response format is invalid")
        );
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = ApiResponse::ok("abc".to_string(), DataSource::Network);
        let timestamp = response.timestamp;
        let mapped = response.map(|s| s.len());
        assert_eq!(mapped.data, Some(3));
        assert_eq!(mapped.source, Some(DataSource::Network));
        assert_eq!(mapped.timestamp, timestamp);
    }
}
