//! This crate provides a read-only statistics service for the Mahatma Gandhi National Rural
//! Employment Guarantee Act (MGNREGA) scheme. It serves district-level employment statistics for
//! a state from a dataset bundled with the service, and computes state-wide aggregates and
//! district rankings on demand for the MGNREGA dashboard.
//!
//! The dataset is loaded once at startup into a [dataset::DatasetStore]. If it cannot be loaded,
//! a single placeholder district is served instead, so the service always starts. All queries in
//! [query] are pure functions over the store.
//!
//! The service is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team.
//! * [Serde](serde) performs (de)serialisation of the dataset and of JSON responses.
//! * [tower-http](tower_http) provides CORS, tracing and path normalisation middleware.
//! * [Prometheus](prometheus) metrics are exposed at `/metrics`.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod server;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod types;
pub mod validated_query;
