pub mod client;
pub mod date_utils;
pub mod fetch_utils;
pub mod http_client;
pub mod in_flight;
pub mod urls;

pub use client::{ClientSettings, LiveMatchData, SportradarClient};
pub use date_utils::{date_range, format_date, today, tomorrow, validate_date, yesterday};
pub use fetch_utils::RetryPolicy;
pub use http_client::create_http_client_with_timeout;
pub use urls::{Endpoint, build_url};
