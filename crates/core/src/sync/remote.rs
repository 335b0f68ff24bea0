//! Contract for the remote replica, implemented by the cloud-sync crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::sync::records::{
    ClassRecord, EntryRecord, EntryRosterRecord, ShowRecord, TrialRecord,
};

/// Identification of an already-scored remote or local entry, shown to the
/// operator at the three-way decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredEntrySummary {
    pub armband: i32,
    pub call_name: String,
    pub handler: String,
}

/// Remote class time limits pulled by the download reconciler.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteClassLimits {
    pub time_limit: Option<f64>,
    pub time_limit2: Option<f64>,
    pub time_limit3: Option<f64>,
    pub area_count: Option<i32>,
}

/// Remote entry scoring fields pulled by the download reconciler. The
/// status stays a wire string here; it is adapted (strictly) at
/// write-back time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntryResult {
    pub access_entry_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub handler: String,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub is_scored: bool,
    pub search_time: Option<f64>,
    pub area_time1: Option<f64>,
    pub area_time2: Option<f64>,
    pub area_time3: Option<f64>,
    pub total_faults: Option<i32>,
    pub correct_count: Option<i32>,
    pub incorrect_count: Option<i32>,
}

/// The remote replica.
///
/// Identifier resolution is a pure function of (license key, local id):
/// nothing is cached locally, so every operation re-resolves the parent
/// chain. `None` means "no remote counterpart" and callers no-op silently;
/// it is never an error.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn resolve_show_id(&self, license_key: &str) -> Result<Option<i64>>;
    async fn resolve_trial_id(&self, license_key: &str, local_trial_id: i32)
        -> Result<Option<i64>>;
    async fn resolve_class_id(&self, license_key: &str, local_class_id: i32)
        -> Result<Option<i64>>;
    /// Batch form used by entry sync: resolves every local class id in one
    /// remote query, returning `(local_class_id, remote_class_id)` pairs
    /// for the classes that exist remotely.
    async fn resolve_class_ids(
        &self,
        license_key: &str,
        local_class_ids: &[i32],
    ) -> Result<Vec<(i32, i64)>>;
    async fn trial_ids_for_show(&self, remote_show_id: i64) -> Result<Vec<i64>>;

    async fn upsert_show(&self, record: &ShowRecord) -> Result<()>;
    async fn upsert_trials(&self, records: &[TrialRecord]) -> Result<()>;
    async fn upsert_classes(&self, records: &[ClassRecord]) -> Result<()>;
    async fn upsert_entries(&self, records: &[EntryRecord]) -> Result<()>;
    async fn upsert_entry_roster(&self, records: &[EntryRosterRecord]) -> Result<()>;

    /// Scored entries in the given remote classes; supports both the
    /// single-class and the all-classes-in-trial query shape.
    async fn scored_entries(&self, remote_class_ids: &[i64]) -> Result<Vec<ScoredEntrySummary>>;

    /// Clear the scored protection for a class; returns entries affected.
    async fn unlock_class(&self, remote_class_id: i64) -> Result<i64>;
    /// Clear the scored protection for a whole trial; returns entries affected.
    async fn unlock_trial(&self, remote_trial_id: i64) -> Result<i64>;

    async fn class_limits(&self, remote_class_id: i64) -> Result<Option<RemoteClassLimits>>;
    async fn class_results(&self, remote_class_id: i64) -> Result<Vec<RemoteEntryResult>>;

    async fn delete_show(&self, license_key: &str) -> Result<()>;
    async fn delete_trial(&self, remote_show_id: i64, local_trial_id: i32) -> Result<()>;
    async fn delete_class(&self, remote_trial_ids: &[i64], local_class_id: i32) -> Result<()>;
    async fn delete_entry(&self, remote_class_id: i64, local_entry_id: i32) -> Result<()>;
}
