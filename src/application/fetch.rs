//! Fetch use case - retrieves one page of a resource for the CLI.

use anyhow::Result;
use log::info;
use serde_json::Value;

use crate::playvox::FetchPages;

/// Options for a single page fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Endpoint path below the API root, e.g. "users".
    pub endpoint: String,
    /// Resource name for logs and error messages; defaults to the endpoint.
    pub resource: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Free-text filter forwarded as the `query` parameter.
    pub query: Option<String>,
}

/// Fetches one page and returns the parsed response body.
pub async fn fetch_page(api: &impl FetchPages, options: &FetchOptions) -> Result<Value> {
    let resource = options.resource.as_deref().unwrap_or(&options.endpoint);
    let value = api
        .fetch_page(resource, &options.endpoint, options.page, options.query.clone())
        .await?;
    info!("Fetched {} page {}", resource, options.page);
    Ok(value)
}
