//! HTTP backend client for StudyMate.
//!
//! `StudyMateApiClient` implements the service traits from `studymate-core`
//! against the backend's REST contracts.

pub mod api_client;
pub mod config;

pub use api_client::StudyMateApiClient;
pub use config::{ApiConfig, load_api_config};
