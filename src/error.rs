//! Error types for the Playvox API client.

use reqwest::StatusCode;

/// Errors produced while constructing or using the API client.
///
/// Nothing in the library terminates the process; the CLI decides which of
/// these are fatal.
#[derive(Debug)]
pub enum ApiError {
    /// Required connection settings were absent or empty at construction.
    MissingCredentials(Vec<&'static str>),
    /// The API answered with a status code that is not retried.
    Status { resource: String, status: StatusCode },
    /// Retryable server errors persisted through every attempt.
    RetriesExhausted { resource: String, attempts: usize },
    /// The request could not be sent or the response body could not be decoded.
    Request(reqwest::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingCredentials(fields) => {
                write!(f, "credentials missing: {}", fields.join(", "))
            }
            ApiError::Status { resource, status } => {
                write!(
                    f,
                    "get {} request failed with status code {}",
                    resource,
                    status.as_u16()
                )
            }
            ApiError::RetriesExhausted { resource, attempts } => {
                write!(
                    f,
                    "get {} reached the maximum number of tries ({}) without success",
                    resource, attempts
                )
            }
            ApiError::Request(err) => {
                write!(f, "request error: {}", err)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request(err)
    }
}
