//! Receipt validation, points scoring, and the HTTP surface that serves them.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
