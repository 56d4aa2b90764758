//! Loading state for the dashboard views, the loads that fill it and the
//! live polling task.

pub mod dashboard;
pub mod polling;
pub mod state;

pub use dashboard::{Dashboard, LoadRequest, StateKey};
pub use polling::{LivePoller, clamp_refresh_interval};
pub use state::{LoadingState, ViewState};
