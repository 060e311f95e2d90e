//! Library exports for the Zero Waste API client, shared between the binary and tests.

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod store;
pub mod utils;
