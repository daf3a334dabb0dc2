//! HTTP plumbing shared by the API client: retry constants and bounded retry.

mod retry;

pub use retry::{is_retryable_status, with_retry, MAX_ATTEMPTS, RETRYABLE_STATUSES, RETRY_DELAY};
