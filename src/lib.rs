//! Temperature/humidity ingestion service and polling dashboard client.
//!
//! The server ingests readings posted by a sensor device, persists them to
//! PostgreSQL, and serves them back over a small JSON API; the `client`
//! module implements the dashboard's polling contract against that API.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
