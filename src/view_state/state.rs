//! Per-collection loading state
//!
//! Each collection the dashboard shows carries its own status, data and
//! error so a failing load never blanks out the others.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

use crate::constants::view::ERROR_DISPLAY_SECONDS;
use crate::data_fetcher::models::DataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Data, status and last error of one collection
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub data: T,
    pub status: LoadingState,
    pub error: Option<String>,
    pub last_fetch: Option<DateTime<Utc>>,
    pub source: Option<DataSource>,
    error_set_at: Option<Instant>,
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            status: LoadingState::Idle,
            error: None,
            last_fetch: None,
            source: None,
            error_set_at: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == LoadingState::Loading
    }

    /// Marks a load as started. Existing data stays visible meanwhile.
    pub fn start_loading(&mut self) {
        self.status = LoadingState::Loading;
        self.error = None;
        self.error_set_at = None;
    }

    pub fn succeed(&mut self, data: T, source: DataSource) {
        self.data = data;
        self.status = LoadingState::Success;
        self.error = None;
        self.error_set_at = None;
        self.last_fetch = Some(Utc::now());
        self.source = Some(source);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.fail_at(message, Instant::now());
    }

    pub fn fail_at(&mut self, message: impl Into<String>, now: Instant) {
        self.status = LoadingState::Error;
        self.set_notice_at(message, now);
    }

    /// Sets an error message without changing the status
    pub fn set_notice_at(&mut self, message: impl Into<String>, now: Instant) {
        self.error = Some(message.into());
        self.error_set_at = Some(now);
    }

    /// Drops the error; an errored state falls back to idle.
    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_set_at = None;
        if self.status == LoadingState::Error {
            self.status = LoadingState::Idle;
        }
    }

    pub fn visible_error(&self) -> Option<&str> {
        self.visible_error_at(Instant::now())
    }

    /// The error while it is still within its display window
    pub fn visible_error_at(&self, now: Instant) -> Option<&str> {
        let set_at = self.error_set_at?;
        if now.saturating_duration_since(set_at) >= Duration::from_secs(ERROR_DISPLAY_SECONDS) {
            return None;
        }
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state: ViewState<Vec<u32>> = ViewState::default();
        assert_eq!(state.status, LoadingState::Idle);
        assert!(state.data.is_empty());
        assert!(state.last_fetch.is_none());
        assert!(state.visible_error().is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let mut state: ViewState<Vec<u32>> = ViewState::default();
        state.fail("boom");
        state.start_loading();
        assert!(state.is_loading());
        assert!(state.error.is_none());

        state.succeed(vec![1, 2], DataSource::Network);
        assert_eq!(state.status, LoadingState::Success);
        assert_eq!(state.data, vec![1, 2]);
        assert!(state.last_fetch.is_some());
        assert_eq!(state.source, Some(DataSource::Network));
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state: ViewState<Vec<u32>> = ViewState::default();
        state.succeed(vec![7], DataSource::Network);
        state.start_loading();
        state.fail("timeout");
        assert_eq!(state.status, LoadingState::Error);
        assert_eq!(state.data, vec![7]);
        assert_eq!(state.visible_error(), Some("timeout"));
    }

    #[test]
    fn test_error_expires_after_display_window() {
        let mut state: ViewState<()> = ViewState::default();
        let start = Instant::now();
        state.fail_at("rate limited", start);

        let window = Duration::from_secs(ERROR_DISPLAY_SECONDS);
        assert_eq!(state.visible_error_at(start), Some("rate limited"));
        assert_eq!(
            state.visible_error_at(start + window - Duration::from_millis(1)),
            Some("rate limited")
        );
        assert_eq!(state.visible_error_at(start + window), None);
        // The status itself is not reset by expiry
        assert_eq!(state.status, LoadingState::Error);
    }

    #[test]
    fn test_clear_error_resets_status() {
        let mut state: ViewState<()> = ViewState::default();
        state.fail("x");
        state.clear_error();
        assert_eq!(state.status, LoadingState::Idle);
        assert!(state.error.is_none());

        state.succeed((), DataSource::Cache);
        state.clear_error();
        assert_eq!(state.status, LoadingState::Success);
    }
}
