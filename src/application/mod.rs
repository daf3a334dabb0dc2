//! Application layer - use cases that connect the CLI to the API client.

mod fetch;

pub use fetch::{fetch_page, FetchOptions};
