//! Bidirectional reconciliation between the local store and the remote
//! replica.
//!
//! Upload pushes Show → Trial → Class → Entry state to the remote store,
//! gated by the scored-entry guard; download pulls scoring results back,
//! gated by the symmetric local guard. Both sides of an entity pair are
//! joined by back-reference columns, never by shared primary keys, so the
//! remote id of every parent is re-resolved on each operation.

pub mod delete;
pub mod download;
pub mod guard;
pub mod records;
pub mod remote;
pub mod report;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classes::ClassRepositoryTrait;
use crate::entries::EntryRepositoryTrait;
use crate::errors::Result;
use crate::license::LicenseRepositoryTrait;
use crate::shows::ShowRepositoryTrait;
use crate::trials::TrialRepositoryTrait;

pub use delete::DeletePropagator;
pub use download::DownloadReconciler;
pub use guard::{EntryUploadMode, UploadGuardOutcome};
pub use records::{
    dedupe_by_armband, encode_class, encode_entry, encode_entry_roster, encode_show, encode_trial,
    ArmbandKeyed, ClassRecord, EntryRecord, EntryRosterRecord, ShowRecord, TrialRecord,
};
pub use remote::{RemoteClassLimits, RemoteEntryResult, RemoteStore, ScoredEntrySummary};
pub use report::{
    DownloadOutcome, DownloadReport, StageReport, SyncStage, UploadOutcome, UploadReport,
};
pub use upload::UploadOrchestrator;

/// Granularity of an upload operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope")]
pub enum SyncScope {
    Class { class_id: i32 },
    Trial { trial_id: i32 },
}

/// Operator's choice when remote entries in scope are already scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadConflictChoice {
    /// Abort the upload entirely; no writes occur.
    Cancel,
    /// Upload rosters only; remote scores win.
    KeepRemoteScores,
    /// Unlock the scope remotely, then upload local scores over it.
    OverwriteRemoteScores,
}

/// Operator's choice when downloaded results would touch locally scored
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadConflictChoice {
    /// Abort the download; no entry writes occur.
    Cancel,
    /// Skip locally scored entries, write the rest.
    KeepLocalScores,
    /// Write every downloaded result, overwriting local scores.
    OverwriteLocalScores,
}

/// Modal choice dialog collaborator (the UI layer is out of scope).
pub trait ConflictPrompt: Send + Sync {
    fn resolve_upload_conflict(
        &self,
        scope: &SyncScope,
        scored: &[ScoredEntrySummary],
    ) -> UploadConflictChoice;

    fn resolve_download_conflict(
        &self,
        class_id: i32,
        scored: &[ScoredEntrySummary],
    ) -> DownloadConflictChoice;
}

/// Progress caption sink collaborator. Both methods default to no-ops.
pub trait ProgressSink: Send + Sync {
    fn scope(&self, _text: &str) {}
    fn task(&self, _text: &str) {}
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {}

/// External placement/score recompute collaborator, invoked once after a
/// class's results have been written back.
pub trait ScoreRecalculator: Send + Sync {
    fn recalculate_class(&self, class_id: i32) -> Result<()>;
}

/// Bundle of local repositories the sync engine works against.
#[derive(Clone)]
pub struct LocalReplica {
    pub shows: Arc<dyn ShowRepositoryTrait>,
    pub trials: Arc<dyn TrialRepositoryTrait>,
    pub classes: Arc<dyn ClassRepositoryTrait>,
    pub entries: Arc<dyn EntryRepositoryTrait>,
    pub licenses: Arc<dyn LicenseRepositoryTrait>,
}
