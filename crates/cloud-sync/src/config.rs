//! Remote endpoint configuration.
//!
//! Credentials are never compiled in; they come from the environment (or
//! directly from the caller) and are passed into every client constructor.

use crate::error::{CloudSyncError, Result};

pub const ENV_SUPABASE_URL: &str = "SHOWDESK_SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SHOWDESK_SUPABASE_KEY";

/// Connection settings for the remote store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

impl RemoteConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Read the endpoint URL and API key from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_SUPABASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                CloudSyncError::invalid_request(format!("{} is not set", ENV_SUPABASE_URL))
            })?;
        let api_key = std::env::var(ENV_SUPABASE_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                CloudSyncError::invalid_request(format!("{} is not set", ENV_SUPABASE_KEY))
            })?;
        Ok(Self::new(&base_url, &api_key))
    }
}
