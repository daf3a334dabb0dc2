//! Playvox API access: credentials, page parameters and the paged fetch.

mod client;
mod credentials;
mod params;

pub use client::{FetchPages, Playvox};
pub use credentials::Credentials;
pub use params::{page_params, DEFAULT_PER_PAGE};

#[cfg(test)]
pub use client::MockFetchPages;
