//! Upload orchestrator: Show → Trial → Class → Entry, gated by the
//! scored-entry guard.
//!
//! Stages run in sequence and a failed stage does not abort the ones
//! after it; already-committed upserts stay committed. The structured
//! report records what actually happened.

use std::collections::HashMap;
use std::sync::Arc;

use log::{error, info, warn};

use crate::classes::Class;
use crate::entries::Entry;
use crate::errors::{Error, Result};
use crate::license::LicenseStatus;
use crate::shows::Show;
use crate::sync::guard::{run_upload_guard, EntryUploadMode, GuardTarget, UploadGuardOutcome};
use crate::sync::records::{
    dedupe_by_armband, encode_class, encode_entry, encode_entry_roster, encode_show, encode_trial,
};
use crate::sync::remote::RemoteStore;
use crate::sync::report::{StageReport, SyncStage, UploadOutcome, UploadReport};
use crate::sync::{ConflictPrompt, LocalReplica, ProgressSink, SyncScope};
use crate::trials::Trial;

/// Local rows covered by one upload scope.
struct ScopeContext {
    show: Show,
    trials: Vec<Trial>,
    classes: Vec<Class>,
    entries: Vec<Entry>,
}

pub struct UploadOrchestrator {
    local: LocalReplica,
    remote: Arc<dyn RemoteStore>,
    prompt: Arc<dyn ConflictPrompt>,
    progress: Arc<dyn ProgressSink>,
}

impl UploadOrchestrator {
    pub fn new(
        local: LocalReplica,
        remote: Arc<dyn RemoteStore>,
        prompt: Arc<dyn ConflictPrompt>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            local,
            remote,
            prompt,
            progress,
        }
    }

    /// Upload one class or one whole trial.
    pub async fn upload(&self, scope: SyncScope) -> Result<UploadReport> {
        let ctx = self.load_scope(&scope)?;

        if !self.license_is_active(ctx.show.id)? {
            warn!(
                "Upload blocked: license for show {} is not active",
                ctx.show.id
            );
            return Ok(UploadReport::license_inactive());
        }

        self.progress
            .scope(&format!("Uploading \"{}\"", ctx.show.name));

        let target = self.resolve_guard_target(&scope, &ctx).await?;
        let (mode, scored) = match run_upload_guard(
            self.remote.as_ref(),
            self.prompt.as_ref(),
            &scope,
            target,
        )
        .await?
        {
            UploadGuardOutcome::Cancelled { scored } => {
                info!("Upload cancelled at the scored-entry guard");
                return Ok(UploadReport::cancelled(scored));
            }
            UploadGuardOutcome::Proceed { mode, scored } => (mode, scored),
        };

        let mut stages = Vec::new();

        self.progress.task("Syncing show");
        stages.push(self.run_stage(SyncStage::Show, self.sync_show(&ctx).await));

        self.progress.task("Syncing trials");
        stages.push(self.run_stage(SyncStage::Trials, self.sync_trials(&ctx).await));

        self.progress.task("Syncing classes");
        stages.push(self.run_stage(SyncStage::Classes, self.sync_classes(&ctx).await));

        self.progress.task("Syncing entries");
        stages.push(self.run_stage(SyncStage::Entries, self.sync_entries(&ctx, mode).await));

        Ok(UploadReport::completed(scored, stages))
    }

    /// Upload every trial under a show, one trial-scope run per trial.
    /// Stops early when the operator cancels or the license gate fails.
    pub async fn upload_show(&self, show_id: i32) -> Result<Vec<UploadReport>> {
        let trials = self.local.trials.list_trials_for_show(show_id)?;
        let mut reports = Vec::with_capacity(trials.len());
        for trial in trials {
            let report = self.upload(SyncScope::Trial { trial_id: trial.id }).await?;
            let stop = matches!(
                report.outcome,
                UploadOutcome::Cancelled | UploadOutcome::LicenseInactive
            );
            reports.push(report);
            if stop {
                break;
            }
        }
        Ok(reports)
    }

    fn run_stage(&self, stage: SyncStage, result: Result<usize>) -> StageReport {
        match result {
            Ok(rows) => StageReport::ok(stage, rows),
            Err(err) => {
                error!("Stage {:?} failed: {}", stage, err);
                StageReport::failed(stage, err.to_string())
            }
        }
    }

    fn load_scope(&self, scope: &SyncScope) -> Result<ScopeContext> {
        match scope {
            SyncScope::Class { class_id } => {
                let class = self.local.classes.get_class(*class_id)?;
                let trial = self.local.trials.get_trial(class.trial_id)?;
                let show = self.local.shows.get_show(trial.show_id)?;
                let entries = self.local.entries.list_entries_for_class(*class_id)?;
                Ok(ScopeContext {
                    show,
                    trials: vec![trial],
                    classes: vec![class],
                    entries,
                })
            }
            SyncScope::Trial { trial_id } => {
                let trial = self.local.trials.get_trial(*trial_id)?;
                let show = self.local.shows.get_show(trial.show_id)?;
                let classes = self.local.classes.list_classes_for_trial(*trial_id)?;
                let entries = self.local.entries.list_entries_for_trial(*trial_id)?;
                Ok(ScopeContext {
                    show,
                    trials: vec![trial],
                    classes,
                    entries,
                })
            }
        }
    }

    fn license_is_active(&self, show_id: i32) -> Result<bool> {
        let license = self.local.licenses.license_for_show(show_id)?;
        Ok(license
            .map(|l| LicenseStatus::from_cached_status(&l.cached_status).is_active())
            .unwrap_or(false))
    }

    /// Resolve the remote scope for the guard. `None` when the show, trial
    /// or class has never been uploaded; there is nothing to protect then.
    async fn resolve_guard_target(
        &self,
        scope: &SyncScope,
        ctx: &ScopeContext,
    ) -> Result<Option<GuardTarget>> {
        let key = ctx.show.license_key.as_str();
        if self.remote.resolve_show_id(key).await?.is_none() {
            return Ok(None);
        }

        match scope {
            SyncScope::Class { class_id } => {
                Ok(self
                    .remote
                    .resolve_class_id(key, *class_id)
                    .await?
                    .map(|remote_class_id| GuardTarget::Class { remote_class_id }))
            }
            SyncScope::Trial { trial_id } => {
                let Some(remote_trial_id) = self.remote.resolve_trial_id(key, *trial_id).await?
                else {
                    return Ok(None);
                };
                let local_ids: Vec<i32> = ctx.classes.iter().map(|c| c.id).collect();
                let resolved = self.remote.resolve_class_ids(key, &local_ids).await?;
                Ok(Some(GuardTarget::Trial {
                    remote_trial_id,
                    remote_class_ids: resolved.into_iter().map(|(_, remote)| remote).collect(),
                }))
            }
        }
    }

    async fn sync_show(&self, ctx: &ScopeContext) -> Result<usize> {
        let record = encode_show(&ctx.show);
        self.remote.upsert_show(&record).await?;
        Ok(1)
    }

    async fn sync_trials(&self, ctx: &ScopeContext) -> Result<usize> {
        let key = ctx.show.license_key.as_str();
        let remote_show_id = self
            .remote
            .resolve_show_id(key)
            .await?
            .ok_or_else(|| Error::validation("show has no remote row after show sync"))?;

        let records: Vec<_> = ctx
            .trials
            .iter()
            .map(|trial| encode_trial(trial, remote_show_id))
            .collect();
        if records.is_empty() {
            return Ok(0);
        }
        self.remote.upsert_trials(&records).await?;
        Ok(records.len())
    }

    async fn sync_classes(&self, ctx: &ScopeContext) -> Result<usize> {
        let key = ctx.show.license_key.as_str();
        let mut remote_trial_ids = HashMap::new();
        for trial in &ctx.trials {
            if let Some(remote_id) = self.remote.resolve_trial_id(key, trial.id).await? {
                remote_trial_ids.insert(trial.id, remote_id);
            }
        }

        let records: Vec<_> = ctx
            .classes
            .iter()
            .filter_map(|class| {
                remote_trial_ids
                    .get(&class.trial_id)
                    .map(|remote_trial_id| encode_class(class, *remote_trial_id))
            })
            .collect();
        if records.is_empty() {
            return Ok(0);
        }
        self.remote.upsert_classes(&records).await?;
        Ok(records.len())
    }

    async fn sync_entries(&self, ctx: &ScopeContext, mode: EntryUploadMode) -> Result<usize> {
        let key = ctx.show.license_key.as_str();

        // Distinct local class ids in the filtered entry set, first
        // occurrence order, resolved remotely in a single query.
        let mut class_ids: Vec<i32> = Vec::new();
        for entry in &ctx.entries {
            if !class_ids.contains(&entry.class_id) {
                class_ids.push(entry.class_id);
            }
        }
        if class_ids.is_empty() {
            return Ok(0);
        }
        let remote_class_ids: HashMap<i32, i64> = self
            .remote
            .resolve_class_ids(key, &class_ids)
            .await?
            .into_iter()
            .collect();

        match mode {
            EntryUploadMode::WithScores => {
                let records = dedupe_by_armband(
                    ctx.entries
                        .iter()
                        .filter_map(|entry| {
                            remote_class_ids
                                .get(&entry.class_id)
                                .map(|remote_class_id| encode_entry(entry, *remote_class_id))
                        })
                        .collect(),
                );
                if records.is_empty() {
                    return Ok(0);
                }
                self.remote.upsert_entries(&records).await?;
                Ok(records.len())
            }
            EntryUploadMode::RosterOnly => {
                let records = dedupe_by_armband(
                    ctx.entries
                        .iter()
                        .filter_map(|entry| {
                            remote_class_ids
                                .get(&entry.class_id)
                                .map(|remote_class_id| encode_entry_roster(entry, *remote_class_id))
                        })
                        .collect(),
                );
                if records.is_empty() {
                    return Ok(0);
                }
                self.remote.upsert_entry_roster(&records).await?;
                Ok(records.len())
            }
        }
    }
}
