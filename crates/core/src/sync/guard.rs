//! Scored-entry guard, upload direction.
//!
//! Destructive uploads are gated on whether entries in scope are already
//! scored on the remote side. The guard queries, surfaces the three-way
//! decision, and performs the unlock before any entry sync can run.

use log::{debug, info};

use crate::errors::Result;
use crate::sync::remote::{RemoteStore, ScoredEntrySummary};
use crate::sync::{ConflictPrompt, SyncScope, UploadConflictChoice};

/// How entry payloads are built for the rest of the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryUploadMode {
    /// Full records, local result state included.
    WithScores,
    /// Roster records with no result columns; remote scores win.
    RosterOnly,
}

/// Terminal guard outcome consumed by the upload orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadGuardOutcome {
    Proceed {
        mode: EntryUploadMode,
        scored: Vec<ScoredEntrySummary>,
    },
    Cancelled {
        scored: Vec<ScoredEntrySummary>,
    },
}

/// Resolved remote scope the guard queries and unlocks against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardTarget {
    Class {
        remote_class_id: i64,
    },
    /// Trial scope expands to the class set under the trial before the
    /// scored-entry query.
    Trial {
        remote_trial_id: i64,
        remote_class_ids: Vec<i64>,
    },
}

impl GuardTarget {
    fn class_ids(&self) -> Vec<i64> {
        match self {
            Self::Class { remote_class_id } => vec![*remote_class_id],
            Self::Trial {
                remote_class_ids, ..
            } => remote_class_ids.clone(),
        }
    }
}

/// Run the guard for an upload.
///
/// `target` is `None` when the scope has no remote counterpart yet; there
/// is nothing to protect and the upload proceeds with scores.
pub async fn run_upload_guard(
    remote: &dyn RemoteStore,
    prompt: &dyn ConflictPrompt,
    scope: &SyncScope,
    target: Option<GuardTarget>,
) -> Result<UploadGuardOutcome> {
    let Some(target) = target else {
        debug!("Scope not linked remotely; nothing to protect");
        return Ok(UploadGuardOutcome::Proceed {
            mode: EntryUploadMode::WithScores,
            scored: Vec::new(),
        });
    };

    let class_ids = target.class_ids();
    let scored = if class_ids.is_empty() {
        Vec::new()
    } else {
        remote.scored_entries(&class_ids).await?
    };
    if scored.is_empty() {
        return Ok(UploadGuardOutcome::Proceed {
            mode: EntryUploadMode::WithScores,
            scored,
        });
    }

    info!("{} scored remote entries in scope", scored.len());
    match prompt.resolve_upload_conflict(scope, &scored) {
        UploadConflictChoice::Cancel => Ok(UploadGuardOutcome::Cancelled { scored }),
        UploadConflictChoice::KeepRemoteScores => Ok(UploadGuardOutcome::Proceed {
            mode: EntryUploadMode::RosterOnly,
            scored,
        }),
        UploadConflictChoice::OverwriteRemoteScores => {
            let unlocked = match &target {
                GuardTarget::Class { remote_class_id } => {
                    remote.unlock_class(*remote_class_id).await?
                }
                GuardTarget::Trial {
                    remote_trial_id, ..
                } => remote.unlock_trial(*remote_trial_id).await?,
            };
            info!("Unlocked {} remote entries before overwrite", unlocked);
            Ok(UploadGuardOutcome::Proceed {
                mode: EntryUploadMode::WithScores,
                scored,
            })
        }
    }
}
