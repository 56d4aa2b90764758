pub mod api;
pub mod cache;
pub mod demo;
pub mod models;
pub mod processors;

pub use api::{ClientSettings, Endpoint, SportradarClient};
pub use models::{ApiResponse, DataSource};
