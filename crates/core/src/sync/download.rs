//! Download reconciler: pull remote scoring results for a class and merge
//! them into the local store, protecting locally scored entries.

use std::sync::Arc;

use log::{info, warn};

use crate::classes::TimeLimitUpdate;
use crate::entries::{Entry, EntryResultUpdate, ResultState};
use crate::errors::{Error, Result};
use crate::license::LicenseStatus;
use crate::sync::remote::{RemoteEntryResult, RemoteStore, ScoredEntrySummary};
use crate::sync::report::{DownloadOutcome, DownloadReport};
use crate::sync::{
    ConflictPrompt, DownloadConflictChoice, LocalReplica, ProgressSink, ScoreRecalculator,
};
use crate::utils::clock::{decode_clock_field, positive_count};

pub struct DownloadReconciler {
    local: LocalReplica,
    remote: Arc<dyn RemoteStore>,
    prompt: Arc<dyn ConflictPrompt>,
    progress: Arc<dyn ProgressSink>,
    recalculator: Arc<dyn ScoreRecalculator>,
}

impl DownloadReconciler {
    pub fn new(
        local: LocalReplica,
        remote: Arc<dyn RemoteStore>,
        prompt: Arc<dyn ConflictPrompt>,
        progress: Arc<dyn ProgressSink>,
        recalculator: Arc<dyn ScoreRecalculator>,
    ) -> Self {
        Self {
            local,
            remote,
            prompt,
            progress,
            recalculator,
        }
    }

    /// Pull time limits and results for one class.
    ///
    /// Time limits are overwritten unconditionally; entry results go
    /// through the local scored-entry guard. Each row's write is its own
    /// statement: a failure aborts the run, rows already written stay.
    pub async fn download_class(&self, class_id: i32) -> Result<DownloadReport> {
        let class = self.local.classes.get_class(class_id)?;
        let trial = self.local.trials.get_trial(class.trial_id)?;
        let show = self.local.shows.get_show(trial.show_id)?;

        if !self.license_is_active(show.id)? {
            warn!(
                "Download blocked: license for show {} is not active",
                show.id
            );
            return Ok(DownloadReport::empty(DownloadOutcome::LicenseInactive));
        }

        let Some(remote_class_id) = self
            .remote
            .resolve_class_id(&show.license_key, class_id)
            .await?
        else {
            info!("Class {} has no remote counterpart; skipping", class_id);
            return Ok(DownloadReport::empty(DownloadOutcome::NotLinked));
        };

        self.progress
            .scope(&format!("Downloading \"{} {}\"", class.element, class.level));

        self.progress.task("Updating time limits");
        if let Some(limits) = self.remote.class_limits(remote_class_id).await? {
            let update = TimeLimitUpdate {
                time_limit: decode_clock_field(limits.time_limit),
                time_limit2: decode_clock_field(limits.time_limit2),
                time_limit3: decode_clock_field(limits.time_limit3),
                area_count: positive_count(limits.area_count),
            };
            self.local.classes.set_time_limits(class_id, update).await?;
        }

        self.progress.task("Fetching results");
        let results = self.remote.class_results(remote_class_id).await?;
        let scored_results: Vec<&RemoteEntryResult> =
            results.iter().filter(|r| r.is_scored).collect();

        let mut missing_local = 0usize;
        let mut pairs: Vec<(&RemoteEntryResult, Entry)> = Vec::new();
        for result in scored_results {
            match self.local.entries.find_entry(result.access_entry_id)? {
                Some(entry) if entry.class_id == class_id => pairs.push((result, entry)),
                _ => {
                    warn!(
                        "Remote result for armband {} has no local entry {}",
                        result.armband, result.access_entry_id
                    );
                    missing_local += 1;
                }
            }
        }

        let locally_scored: Vec<ScoredEntrySummary> = pairs
            .iter()
            .filter(|(_, entry)| entry.is_scored())
            .map(|(_, entry)| ScoredEntrySummary {
                armband: entry.armband,
                call_name: entry.call_name.clone(),
                handler: entry.handler.clone(),
            })
            .collect();

        let choice = if locally_scored.is_empty() {
            DownloadConflictChoice::OverwriteLocalScores
        } else {
            self.prompt
                .resolve_download_conflict(class_id, &locally_scored)
        };
        if choice == DownloadConflictChoice::Cancel {
            info!("Download cancelled at the scored-entry guard");
            return Ok(DownloadReport {
                outcome: DownloadOutcome::Cancelled,
                applied: 0,
                skipped_scored: 0,
                missing_local,
            });
        }

        self.progress
            .task(&format!("Writing {} results", pairs.len()));
        let mut applied = 0usize;
        let mut skipped_scored = 0usize;
        for (result, entry) in pairs {
            if entry.is_scored() && choice == DownloadConflictChoice::KeepLocalScores {
                skipped_scored += 1;
                continue;
            }
            let update = Self::build_result_update(result)?;
            self.local.entries.apply_result(entry.id, update).await?;
            applied += 1;
        }

        self.recalculator.recalculate_class(class_id)?;

        Ok(DownloadReport {
            outcome: DownloadOutcome::Completed,
            applied,
            skipped_scored,
            missing_local,
        })
    }

    fn license_is_active(&self, show_id: i32) -> Result<bool> {
        let license = self.local.licenses.license_for_show(show_id)?;
        Ok(license
            .map(|l| LicenseStatus::from_cached_status(&l.cached_status).is_active())
            .unwrap_or(false))
    }

    fn build_result_update(result: &RemoteEntryResult) -> Result<EntryResultUpdate> {
        let wire_status = result.status.as_deref().ok_or(Error::UnknownWireValue {
            field: "status",
            value: String::from("null"),
        })?;
        let state = ResultState::from_wire(wire_status)?;

        Ok(EntryResultUpdate {
            state,
            reason: result.reason.clone(),
            search_time: decode_clock_field(result.search_time),
            area_time1: decode_clock_field(result.area_time1),
            area_time2: decode_clock_field(result.area_time2),
            area_time3: decode_clock_field(result.area_time3),
            total_faults: result.total_faults.unwrap_or(0),
            correct_count: result.correct_count.unwrap_or(0),
            incorrect_count: result.incorrect_count.unwrap_or(0),
            clear_area_millis: state != ResultState::Qualified,
        })
    }
}
