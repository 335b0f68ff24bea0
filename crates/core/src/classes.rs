//! Class domain model and repository contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A judged class within a trial: one element/level/section combination.
///
/// Time limits are kept locally as `"MM:SS"` text; blank means "not set"
/// and must reach the wire as `null`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i32,
    pub trial_id: i32,
    pub element: String,
    pub level: String,
    pub section: Option<String>,
    pub judge: Option<String>,
    pub sort_order: i32,
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub trial_id: i32,
    pub element: String,
    pub level: String,
    pub section: Option<String>,
    pub judge: Option<String>,
    pub sort_order: i32,
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

/// Time-limit fields written back by the download reconciler.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLimitUpdate {
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

#[async_trait]
pub trait ClassRepositoryTrait: Send + Sync {
    fn get_class(&self, class_id: i32) -> Result<Class>;
    fn list_classes_for_trial(&self, trial_id: i32) -> Result<Vec<Class>>;
    async fn insert_class(&self, new_class: NewClass) -> Result<Class>;
    async fn update_class(&self, class: Class) -> Result<Class>;
    async fn delete_class(&self, class_id: i32) -> Result<usize>;
    /// Overwrite the class's time-limit fields from downloaded remote state.
    async fn set_time_limits(&self, class_id: i32, update: TimeLimitUpdate) -> Result<()>;
}
