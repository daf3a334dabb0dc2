//! Bounded retry for requests that hit transient server errors.

use std::time::Duration;

use log::warn;
use reqwest::StatusCode;

use crate::error::ApiError;

/// Maximum number of attempts per request, first try included.
pub const MAX_ATTEMPTS: usize = 3;

/// Default delay between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Status codes treated as transient server conditions worth retrying.
pub const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Returns true for the server statuses that may succeed if retried.
pub fn is_retryable_status(status: StatusCode) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Executes an async operation with bounded retry.
///
/// Only retryable server statuses are repeated; every other error is
/// returned from the attempt that produced it. Sleeps `retry_delay` between
/// attempts, never after the last one, so exhausting [`MAX_ATTEMPTS`] costs
/// at most two delays.
pub async fn with_retry<F, Fut, T>(
    resource: &str,
    retry_delay: Duration,
    operation: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    for attempt in 1..=MAX_ATTEMPTS {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(ApiError::Status { status, .. }) if is_retryable_status(status) => {
                if attempt < MAX_ATTEMPTS {
                    warn!(
                        "Server temporarily unavailable (code {}), will retry in {} seconds (attempt {}/{})",
                        status.as_u16(),
                        retry_delay.as_secs(),
                        attempt,
                        MAX_ATTEMPTS
                    );
                    tokio::time::sleep(retry_delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(ApiError::RetriesExhausted {
        resource: resource.to_string(),
        attempts: MAX_ATTEMPTS,
    })
}
