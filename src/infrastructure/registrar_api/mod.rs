//! Billing platform API adapters

pub mod http_client;

pub use http_client::PlatformApiClient;
