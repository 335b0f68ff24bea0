//! Structured outcome reports for sync operations.
//!
//! Stages after a failed one still run and already-committed stages are
//! never rolled back, so the report records exactly which stages
//! succeeded rather than pretending the operation is atomic.

use serde::{Deserialize, Serialize};

use crate::sync::remote::ScoredEntrySummary;

/// Upload pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Show,
    Trials,
    Classes,
    Entries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub stage: SyncStage,
    pub rows: usize,
    pub error: Option<String>,
}

impl StageReport {
    pub fn ok(stage: SyncStage, rows: usize) -> Self {
        Self {
            stage,
            rows,
            error: None,
        }
    }

    pub fn failed(stage: SyncStage, error: impl Into<String>) -> Self {
        Self {
            stage,
            rows: 0,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadOutcome {
    Completed,
    CompletedWithErrors,
    Cancelled,
    LicenseInactive,
}

/// Result of one upload run: the terminal outcome, the scored remote
/// entries shown at the decision point, and per-stage results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub outcome: UploadOutcome,
    pub scored_remote: Vec<ScoredEntrySummary>,
    pub stages: Vec<StageReport>,
}

impl UploadReport {
    pub fn license_inactive() -> Self {
        Self {
            outcome: UploadOutcome::LicenseInactive,
            scored_remote: Vec::new(),
            stages: Vec::new(),
        }
    }

    pub fn cancelled(scored_remote: Vec<ScoredEntrySummary>) -> Self {
        Self {
            outcome: UploadOutcome::Cancelled,
            scored_remote,
            stages: Vec::new(),
        }
    }

    pub fn completed(scored_remote: Vec<ScoredEntrySummary>, stages: Vec<StageReport>) -> Self {
        let outcome = if stages.iter().any(|s| s.error.is_some()) {
            UploadOutcome::CompletedWithErrors
        } else {
            UploadOutcome::Completed
        };
        Self {
            outcome,
            scored_remote,
            stages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadOutcome {
    Completed,
    Cancelled,
    /// The class has no remote counterpart; nothing was pulled.
    NotLinked,
    LicenseInactive,
}

/// Result of one download run for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReport {
    pub outcome: DownloadOutcome,
    /// Results written into the local store.
    pub applied: usize,
    /// Remote results skipped because the local entry was already scored.
    pub skipped_scored: usize,
    /// Remote results whose back-reference no longer matches a local entry.
    pub missing_local: usize,
}

impl DownloadReport {
    pub fn empty(outcome: DownloadOutcome) -> Self {
        Self {
            outcome,
            applied: 0,
            skipped_scored: 0,
            missing_local: 0,
        }
    }
}
