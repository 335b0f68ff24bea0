//! Trial domain model and repository contract.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One trial day/session within a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub id: i32,
    pub show_id: i32,
    pub name: String,
    pub trial_date: NaiveDate,
    pub trial_number: i32,
    pub trial_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrial {
    pub show_id: i32,
    pub name: String,
    pub trial_date: NaiveDate,
    pub trial_number: i32,
    pub trial_type: String,
}

#[async_trait]
pub trait TrialRepositoryTrait: Send + Sync {
    fn get_trial(&self, trial_id: i32) -> Result<Trial>;
    fn list_trials_for_show(&self, show_id: i32) -> Result<Vec<Trial>>;
    async fn insert_trial(&self, new_trial: NewTrial) -> Result<Trial>;
    async fn update_trial(&self, trial: Trial) -> Result<Trial>;
    async fn delete_trial(&self, trial_id: i32) -> Result<usize>;
}
