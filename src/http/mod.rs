//! HTTP client module
//!
//! Fetches catalog pages as JSON.
//!
//! # Features
//!
//! - **Per-request timeout**: every page request is bounded
//! - **Page query parameter**: appended to whatever query the base URL carries
//! - **Error classification**: timeouts and connection failures are reported
//!   as transient so the collector can retry them; everything else is final

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
