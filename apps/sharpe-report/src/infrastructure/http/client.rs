//! HTTP client wrapper with retry logic.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::backoff::ExponentialBackoff;
use super::error::HttpError;
use crate::config::HttpConfig;

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetrySettings {
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Initial backoff delay.
    pub initial_backoff: Duration,
    /// Maximum backoff delay.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// Jitter as a fraction of the delay (0.1 = ±10%).
    pub jitter_factor: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header value.
    pub user_agent: String,
    /// Retry policy.
    pub retry: RetrySettings,
}

impl From<&HttpConfig> for HttpSettings {
    fn from(config: &HttpConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
            retry: RetrySettings {
                max_attempts: config.retry.max_attempts,
                initial_backoff: Duration::from_millis(config.retry.initial_backoff_ms),
                max_backoff: Duration::from_millis(config.retry.max_backoff_ms),
                multiplier: config.retry.multiplier,
                jitter_factor: config.retry.jitter_factor,
            },
        }
    }
}

/// GET-only HTTP client shared by the data adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetrySettings,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Network` if the underlying client cannot be built.
    pub fn new(settings: &HttpSettings) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Ok(Self {
            client,
            retry: settings.retry.clone(),
        })
    }

    /// GET `url` and deserialize the JSON body.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors from [`Self::get_text`], and
    /// returns `HttpError::JsonParse` for malformed bodies.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<T, HttpError> {
        let text = self.get_text(url, query, headers).await?;
        serde_json::from_str(&text).map_err(|e| HttpError::JsonParse(e.to_string()))
    }

    /// GET `url` and return the body as text, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` describing the final failure.
    pub async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<String, HttpError> {
        let mut backoff = ExponentialBackoff::new(&self.retry);

        loop {
            let mut request = self.client.get(url).query(query);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    // reqwest keeps the OS-level cause (e.g. connection refused) in the source chain.
                    let cause = format!("{:#}", anyhow::Error::new(e));
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %cause,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt(),
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    tracing::error!(
                        error = %cause,
                        attempts = backoff.attempt(),
                        "Network error, giving up"
                    );
                    return Err(HttpError::MaxRetriesExceeded {
                        attempts: backoff.attempt(),
                        last_error: cause,
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                return response
                    .text()
                    .await
                    .map_err(|e| HttpError::Network(e.to_string()));
            }

            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();
            let message = if error_body.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                error_body
            };

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let Some(delay) = backoff.next_backoff() else {
                        return Err(HttpError::RateLimited {
                            retry_after_secs: retry_after.unwrap_or(60),
                        });
                    };
                    // Never sleep longer than the configured backoff ceiling.
                    let delay = retry_after
                        .map_or(delay, Duration::from_secs)
                        .min(self.retry.max_backoff);
                    tracing::warn!(
                        status = status.as_u16(),
                        delay_ms = delay.as_millis(),
                        attempt = backoff.attempt(),
                        "Rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                ErrorCategory::Retryable => {
                    let Some(delay) = backoff.next_backoff() else {
                        return Err(HttpError::MaxRetriesExceeded {
                            attempts: backoff.attempt(),
                            last_error: format!("HTTP {}: {message}", status.as_u16()),
                        });
                    };
                    tracing::warn!(
                        status = status.as_u16(),
                        message = %message,
                        delay_ms = delay.as_millis(),
                        attempt = backoff.attempt(),
                        "Retryable error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                ErrorCategory::NonRetryable => {
                    return match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            Err(HttpError::AuthenticationFailed)
                        }
                        StatusCode::NOT_FOUND => Err(HttpError::NotFound {
                            url: url.to_string(),
                        }),
                        _ => Err(HttpError::Api {
                            status: status.as_u16(),
                            message,
                        }),
                    };
                }
            }
        }
    }
}

/// Error category for determining retry behavior.
#[derive(Debug, PartialEq, Eq)]
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}
