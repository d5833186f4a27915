//! Transport adapters for the insights service.

pub mod http_client;

pub use http_client::HttpInsightsClient;
