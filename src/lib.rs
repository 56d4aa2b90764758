//! Soccer competitions, matches and goal statistics from the Sportradar API
//!
//! This library provides a cached, retrying client for the provider, goal
//! statistics over match summaries and the view state used by the terminal
//! dashboard.
//!
//! # Examples
//!
//! ```rust,no_run
//! use soccer_dashboard::config::Config;
//! use soccer_dashboard::data_fetcher::SportradarClient;
//! use soccer_dashboard::error::AppError;
//! use soccer_dashboard::stats::analyze_matches;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = SportradarClient::from_config(&config)?;
//!
//!     let response = client.season_summaries("sr:season:118689").await;
//!     match response.into_result() {
//!         Ok(payload) => {
//!             if let Some(stats) = analyze_matches(&payload.summaries) {
//!                 println!("{:.2} goals per match", stats.avg_goals);
//!             }
//!         }
//!         Err(message) => eprintln!("{message}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod logging;
pub mod stats;
pub mod testing_utils;
pub mod view_state;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::{ApiResponse, DataSource, SportradarClient};
pub use error::AppError;
pub use view_state::Dashboard;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
