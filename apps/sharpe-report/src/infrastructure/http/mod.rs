//! Shared HTTP plumbing for the data adapters.
//!
//! A thin wrapper around `reqwest` that retries rate limits, timeouts and
//! 5xx responses with exponential backoff and jitter.

mod backoff;
mod client;
mod error;

pub use backoff::ExponentialBackoff;
pub use client::{HttpClient, HttpSettings, RetrySettings};
pub use error::HttpError;
