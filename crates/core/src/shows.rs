//! Show domain model and repository contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// An organization-level event. The license key is the business identifier
/// shared with the remote replica; primary keys are never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: i32,
    pub license_key: String,
    pub name: String,
    pub club: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    pub license_key: String,
    pub name: String,
    pub club: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait ShowRepositoryTrait: Send + Sync {
    fn get_show(&self, show_id: i32) -> Result<Show>;
    fn list_shows(&self) -> Result<Vec<Show>>;
    async fn insert_show(&self, new_show: NewShow) -> Result<Show>;
    async fn update_show(&self, show: Show) -> Result<Show>;
    async fn delete_show(&self, show_id: i32) -> Result<usize>;
}
