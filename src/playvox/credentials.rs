//! Connection credentials for the Playvox API.

use crate::error::ApiError;

/// Immutable connection settings: workspace subdomain and API key pair.
pub struct Credentials {
    pub domain: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Validates the given settings.
    ///
    /// Absent and empty values are both treated as missing, and the error
    /// names every missing field so a misconfigured deployment surfaces all
    /// of its problems at once.
    pub fn new(
        domain: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Self, ApiError> {
        let domain = domain.filter(|v| !v.is_empty());
        let api_key = api_key.filter(|v| !v.is_empty());
        let api_secret = api_secret.filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        if domain.is_none() {
            missing.push("domain");
        }
        if api_key.is_none() {
            missing.push("api_key");
        }
        if api_secret.is_none() {
            missing.push("api_secret");
        }

        match (domain, api_key, api_secret) {
            (Some(domain), Some(api_key), Some(api_secret)) => Ok(Self {
                domain,
                api_key,
                api_secret,
            }),
            _ => Err(ApiError::MissingCredentials(missing)),
        }
    }
}

// The secret must not leak through debug logging or instrumented spans.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("api_key", &self.api_key)
            .field("api_secret", &"********")
            .finish()
    }
}
