//! Per-show license record and the status adapter gating every sync.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Cached activation record for a show.
///
/// The activation web flow is out of scope; only the cached status text is
/// consulted here, normalized through [`LicenseStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub show_id: i32,
    pub license_key: String,
    pub cached_status: String,
    pub checked_at: Option<String>,
}

/// Normalized license state. The upstream status is free text matched by
/// substring; anything without a known activation marker is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Active,
    Inactive,
}

impl LicenseStatus {
    pub fn from_cached_status(status: &str) -> Self {
        let normalized = status.to_ascii_lowercase();
        if normalized.contains("active and valid") || normalized.contains("activated") {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        *self == Self::Active
    }
}

#[async_trait]
pub trait LicenseRepositoryTrait: Send + Sync {
    fn license_for_show(&self, show_id: i32) -> Result<Option<License>>;
    async fn save_license(&self, license: License) -> Result<()>;
}
