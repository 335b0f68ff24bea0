//! In-memory fakes and fixtures for engine tests.
//!
//! The fake remote logs every call so tests can assert what went over the
//! wire and in which order; its upsert semantics mirror the real
//! merge-duplicates behavior keyed on each collection's natural key.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::classes::{Class, ClassRepositoryTrait, NewClass, TimeLimitUpdate};
use crate::entries::{Entry, EntryRepositoryTrait, EntryResultUpdate, NewEntry, ResultState};
use crate::errors::{DatabaseError, Error, Result};
use crate::license::{License, LicenseRepositoryTrait};
use crate::shows::{NewShow, Show, ShowRepositoryTrait};
use crate::sync::records::{
    ClassRecord, EntryRecord, EntryRosterRecord, ShowRecord, TrialRecord,
};
use crate::sync::remote::{
    RemoteClassLimits, RemoteEntryResult, RemoteStore, ScoredEntrySummary,
};
use crate::sync::{
    ConflictPrompt, DownloadConflictChoice, ScoreRecalculator, SyncScope, UploadConflictChoice,
};
use crate::trials::{NewTrial, Trial, TrialRepositoryTrait};

pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date")
}

pub fn sample_show(id: i32) -> Show {
    Show {
        id,
        license_key: "SWN-2026-0042".to_string(),
        name: "Autumn Classic".to_string(),
        club: "Cascade Scent Work Club".to_string(),
        start_date: sample_date(),
        end_date: sample_date(),
        location: Some("Fairgrounds Hall B".to_string()),
        contact: None,
        notes: None,
    }
}

pub fn sample_trial(id: i32, show_id: i32) -> Trial {
    Trial {
        id,
        show_id,
        name: format!("Trial {}", id),
        trial_date: sample_date(),
        trial_number: 1,
        trial_type: "Regular".to_string(),
    }
}

pub fn sample_class(id: i32, trial_id: i32) -> Class {
    Class {
        id,
        trial_id,
        element: "Interior".to_string(),
        level: "Excellent".to_string(),
        section: Some("A".to_string()),
        judge: Some("R. Alvarez".to_string()),
        sort_order: 1,
        time_limit: Some("03:00".to_string()),
        time_limit2: None,
        time_limit3: None,
        area_count: Some(1),
    }
}

pub fn sample_entry(id: i32, class_id: i32, armband: i32) -> Entry {
    Entry {
        id,
        class_id,
        armband,
        call_name: format!("Dog {}", armband),
        breed: Some("Border Collie".to_string()),
        handler: format!("Handler {}", armband),
        sort_order: armband,
        qualified: false,
        not_qualified: false,
        excused: false,
        absent: false,
        withdrawn: false,
        reason: None,
        search_time: None,
        area_time1: None,
        area_time2: None,
        area_time3: None,
        area_time1_ms: 0,
        area_time2_ms: 0,
        area_time3_ms: 0,
        total_faults: 0,
        correct_count: 0,
        incorrect_count: 0,
        placement: None,
        total_score: None,
    }
}

pub fn active_license(show_id: i32) -> License {
    License {
        show_id,
        license_key: "SWN-2026-0042".to_string(),
        cached_status: "Active and Valid".to_string(),
        checked_at: None,
    }
}

pub fn remote_result(
    access_entry_id: i32,
    armband: i32,
    status: &str,
    is_scored: bool,
) -> RemoteEntryResult {
    RemoteEntryResult {
        access_entry_id,
        armband,
        call_name: format!("Dog {}", armband),
        handler: format!("Handler {}", armband),
        status: Some(status.to_string()),
        reason: None,
        is_scored,
        search_time: Some(75.0),
        area_time1: None,
        area_time2: None,
        area_time3: None,
        total_faults: Some(1),
        correct_count: Some(2),
        incorrect_count: Some(0),
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Fake local replica
// ─────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeLocalState {
    pub shows: Vec<Show>,
    pub trials: Vec<Trial>,
    pub classes: Vec<Class>,
    pub entries: Vec<Entry>,
    pub licenses: Vec<License>,
    pub applied_results: Vec<(i32, EntryResultUpdate)>,
    pub time_limit_updates: Vec<(i32, TimeLimitUpdate)>,
}

#[derive(Default)]
pub struct FakeLocal {
    pub state: Mutex<FakeLocalState>,
}

impl FakeLocal {
    /// Show 1 (active license) → trial 3 → class 7 → entries 101, 102.
    pub fn standard() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.shows.push(sample_show(1));
            state.trials.push(sample_trial(3, 1));
            state.classes.push(sample_class(7, 3));
            state.entries.push(sample_entry(101, 7, 101));
            state.entries.push(sample_entry(102, 7, 102));
            state.licenses.push(active_license(1));
        }
        fake
    }

    fn missing(kind: &str, id: i32) -> Error {
        Error::Database(DatabaseError::Internal(format!("{} {} not found", kind, id)))
    }
}

#[async_trait]
impl ShowRepositoryTrait for FakeLocal {
    fn get_show(&self, show_id: i32) -> Result<Show> {
        self.state
            .lock()
            .unwrap()
            .shows
            .iter()
            .find(|s| s.id == show_id)
            .cloned()
            .ok_or_else(|| Self::missing("show", show_id))
    }

    fn list_shows(&self) -> Result<Vec<Show>> {
        Ok(self.state.lock().unwrap().shows.clone())
    }

    async fn insert_show(&self, new_show: NewShow) -> Result<Show> {
        let mut state = self.state.lock().unwrap();
        let id = state.shows.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let show = Show {
            id,
            license_key: new_show.license_key,
            name: new_show.name,
            club: new_show.club,
            start_date: new_show.start_date,
            end_date: new_show.end_date,
            location: new_show.location,
            contact: new_show.contact,
            notes: new_show.notes,
        };
        state.shows.push(show.clone());
        Ok(show)
    }

    async fn update_show(&self, show: Show) -> Result<Show> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .shows
            .iter_mut()
            .find(|s| s.id == show.id)
            .ok_or_else(|| Self::missing("show", show.id))?;
        *slot = show.clone();
        Ok(show)
    }

    async fn delete_show(&self, show_id: i32) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.shows.len();
        state.shows.retain(|s| s.id != show_id);
        Ok(before - state.shows.len())
    }
}

#[async_trait]
impl TrialRepositoryTrait for FakeLocal {
    fn get_trial(&self, trial_id: i32) -> Result<Trial> {
        self.state
            .lock()
            .unwrap()
            .trials
            .iter()
            .find(|t| t.id == trial_id)
            .cloned()
            .ok_or_else(|| Self::missing("trial", trial_id))
    }

    fn list_trials_for_show(&self, show_id: i32) -> Result<Vec<Trial>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .trials
            .iter()
            .filter(|t| t.show_id == show_id)
            .cloned()
            .collect())
    }

    async fn insert_trial(&self, new_trial: NewTrial) -> Result<Trial> {
        let mut state = self.state.lock().unwrap();
        let id = state.trials.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let trial = Trial {
            id,
            show_id: new_trial.show_id,
            name: new_trial.name,
            trial_date: new_trial.trial_date,
            trial_number: new_trial.trial_number,
            trial_type: new_trial.trial_type,
        };
        state.trials.push(trial.clone());
        Ok(trial)
    }

    async fn update_trial(&self, trial: Trial) -> Result<Trial> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .trials
            .iter_mut()
            .find(|t| t.id == trial.id)
            .ok_or_else(|| Self::missing("trial", trial.id))?;
        *slot = trial.clone();
        Ok(trial)
    }

    async fn delete_trial(&self, trial_id: i32) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.trials.len();
        state.trials.retain(|t| t.id != trial_id);
        Ok(before - state.trials.len())
    }
}

#[async_trait]
impl ClassRepositoryTrait for FakeLocal {
    fn get_class(&self, class_id: i32) -> Result<Class> {
        self.state
            .lock()
            .unwrap()
            .classes
            .iter()
            .find(|c| c.id == class_id)
            .cloned()
            .ok_or_else(|| Self::missing("class", class_id))
    }

    fn list_classes_for_trial(&self, trial_id: i32) -> Result<Vec<Class>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .classes
            .iter()
            .filter(|c| c.trial_id == trial_id)
            .cloned()
            .collect())
    }

    async fn insert_class(&self, new_class: NewClass) -> Result<Class> {
        let mut state = self.state.lock().unwrap();
        let id = state.classes.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let class = Class {
            id,
            trial_id: new_class.trial_id,
            element: new_class.element,
            level: new_class.level,
            section: new_class.section,
            judge: new_class.judge,
            sort_order: new_class.sort_order,
            time_limit: new_class.time_limit,
            time_limit2: new_class.time_limit2,
            time_limit3: new_class.time_limit3,
            area_count: new_class.area_count,
        };
        state.classes.push(class.clone());
        Ok(class)
    }

    async fn update_class(&self, class: Class) -> Result<Class> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .classes
            .iter_mut()
            .find(|c| c.id == class.id)
            .ok_or_else(|| Self::missing("class", class.id))?;
        *slot = class.clone();
        Ok(class)
    }

    async fn delete_class(&self, class_id: i32) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.classes.len();
        state.classes.retain(|c| c.id != class_id);
        Ok(before - state.classes.len())
    }

    async fn set_time_limits(&self, class_id: i32, update: TimeLimitUpdate) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .classes
            .iter_mut()
            .find(|c| c.id == class_id)
            .ok_or_else(|| Self::missing("class", class_id))?;
        slot.time_limit = update.time_limit.clone();
        slot.time_limit2 = update.time_limit2.clone();
        slot.time_limit3 = update.time_limit3.clone();
        slot.area_count = update.area_count;
        state.time_limit_updates.push((class_id, update));
        Ok(())
    }
}

#[async_trait]
impl EntryRepositoryTrait for FakeLocal {
    fn get_entry(&self, entry_id: i32) -> Result<Entry> {
        self.find_entry(entry_id)?
            .ok_or_else(|| Self::missing("entry", entry_id))
    }

    fn find_entry(&self, entry_id: i32) -> Result<Option<Entry>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .cloned())
    }

    fn list_entries_for_class(&self, class_id: i32) -> Result<Vec<Entry>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|e| e.class_id == class_id)
            .cloned()
            .collect())
    }

    fn list_entries_for_trial(&self, trial_id: i32) -> Result<Vec<Entry>> {
        let state = self.state.lock().unwrap();
        let class_ids: Vec<i32> = state
            .classes
            .iter()
            .filter(|c| c.trial_id == trial_id)
            .map(|c| c.id)
            .collect();
        Ok(state
            .entries
            .iter()
            .filter(|e| class_ids.contains(&e.class_id))
            .cloned()
            .collect())
    }

    async fn insert_entry(&self, new_entry: NewEntry) -> Result<Entry> {
        let mut state = self.state.lock().unwrap();
        let id = state.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let mut entry = sample_entry(id, new_entry.class_id, new_entry.armband);
        entry.call_name = new_entry.call_name;
        entry.breed = new_entry.breed;
        entry.handler = new_entry.handler;
        entry.sort_order = new_entry.sort_order;
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, entry: Entry) -> Result<Entry> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| Self::missing("entry", entry.id))?;
        *slot = entry.clone();
        Ok(entry)
    }

    async fn delete_entry(&self, entry_id: i32) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.entries.len();
        state.entries.retain(|e| e.id != entry_id);
        Ok(before - state.entries.len())
    }

    async fn apply_result(&self, entry_id: i32, update: EntryResultUpdate) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| Self::missing("entry", entry_id))?;
        slot.qualified = update.state == ResultState::Qualified;
        slot.not_qualified = update.state == ResultState::Nq;
        slot.excused = update.state == ResultState::Excused;
        slot.absent = update.state == ResultState::Absent;
        slot.withdrawn = update.state == ResultState::Withdrawn;
        slot.reason = update.reason.clone();
        slot.search_time = update.search_time.clone();
        slot.area_time1 = update.area_time1.clone();
        slot.area_time2 = update.area_time2.clone();
        slot.area_time3 = update.area_time3.clone();
        slot.total_faults = update.total_faults;
        slot.correct_count = update.correct_count;
        slot.incorrect_count = update.incorrect_count;
        if update.clear_area_millis {
            slot.area_time1_ms = 0;
            slot.area_time2_ms = 0;
            slot.area_time3_ms = 0;
        }
        state.applied_results.push((entry_id, update));
        Ok(())
    }
}

#[async_trait]
impl LicenseRepositoryTrait for FakeLocal {
    fn license_for_show(&self, show_id: i32) -> Result<Option<License>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .licenses
            .iter()
            .find(|l| l.show_id == show_id)
            .cloned())
    }

    async fn save_license(&self, license: License) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.licenses.retain(|l| l.show_id != license.show_id);
        state.licenses.push(license);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Fake remote replica
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RemoteTrialRow {
    pub id: i64,
    pub access_trial_id: i32,
    pub record: TrialRecord,
}

#[derive(Debug, Clone)]
pub struct RemoteClassRow {
    pub id: i64,
    pub access_class_id: i32,
    pub record: ClassRecord,
}

#[derive(Default)]
pub struct RemoteState {
    next_id: i64,
    pub shows: HashMap<String, (i64, ShowRecord)>,
    pub trials: Vec<RemoteTrialRow>,
    pub classes: Vec<RemoteClassRow>,
    pub entries: HashMap<(i64, i32), EntryRecord>,
    pub roster: HashMap<(i64, i32), EntryRosterRecord>,
    pub scored: Vec<(i64, ScoredEntrySummary)>,
    pub limits: HashMap<i64, RemoteClassLimits>,
    pub results: HashMap<i64, Vec<RemoteEntryResult>>,
    pub unlock_returns: i64,
    pub calls: Vec<String>,
    pub fail_method: Option<&'static str>,
}

impl RemoteState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 10;
        self.next_id
    }
}

#[derive(Default)]
pub struct FakeRemote {
    pub state: Mutex<RemoteState>,
}

impl FakeRemote {
    /// Pre-link the standard fixture: show 10, trial 30, class 70.
    pub fn linked() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.next_id = 100;
            let show = sample_show(1);
            state.shows.insert(
                show.license_key.clone(),
                (10, crate::sync::records::encode_show(&show)),
            );
            state.trials.push(RemoteTrialRow {
                id: 30,
                access_trial_id: 3,
                record: crate::sync::records::encode_trial(&sample_trial(3, 1), 10),
            });
            state.classes.push(RemoteClassRow {
                id: 70,
                access_class_id: 7,
                record: crate::sync::records::encode_class(&sample_class(7, 3), 30),
            });
        }
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn write_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                c.starts_with("upsert") || c.starts_with("unlock") || c.starts_with("delete")
            })
            .collect()
    }

    fn enter(&self, method: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method.to_string());
        if state.fail_method == Some(method) {
            return Err(Error::remote(Some(500), format!("{} failed", method)));
        }
        Ok(())
    }

    fn show_id_for(&self, license_key: &str) -> Option<i64> {
        if license_key.trim().is_empty() {
            return None;
        }
        self.state
            .lock()
            .unwrap()
            .shows
            .get(license_key)
            .map(|(id, _)| *id)
    }

    fn class_pairs(&self, license_key: &str, local_class_ids: &[i32]) -> Vec<(i32, i64)> {
        let Some(show_id) = self.show_id_for(license_key) else {
            return Vec::new();
        };
        let state = self.state.lock().unwrap();
        let trial_ids: Vec<i64> = state
            .trials
            .iter()
            .filter(|t| t.record.show_id == show_id)
            .map(|t| t.id)
            .collect();
        state
            .classes
            .iter()
            .filter(|c| {
                trial_ids.contains(&c.record.trial_id)
                    && local_class_ids.contains(&c.access_class_id)
            })
            .map(|c| (c.access_class_id, c.id))
            .collect()
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn resolve_show_id(&self, license_key: &str) -> Result<Option<i64>> {
        self.enter("resolve_show_id")?;
        Ok(self.show_id_for(license_key))
    }

    async fn resolve_trial_id(
        &self,
        license_key: &str,
        local_trial_id: i32,
    ) -> Result<Option<i64>> {
        self.enter("resolve_trial_id")?;
        let Some(show_id) = self.show_id_for(license_key) else {
            return Ok(None);
        };
        Ok(self
            .state
            .lock()
            .unwrap()
            .trials
            .iter()
            .find(|t| t.record.show_id == show_id && t.access_trial_id == local_trial_id)
            .map(|t| t.id))
    }

    async fn resolve_class_id(
        &self,
        license_key: &str,
        local_class_id: i32,
    ) -> Result<Option<i64>> {
        self.enter("resolve_class_id")?;
        Ok(self
            .class_pairs(license_key, &[local_class_id])
            .first()
            .map(|(_, id)| *id))
    }

    async fn resolve_class_ids(
        &self,
        license_key: &str,
        local_class_ids: &[i32],
    ) -> Result<Vec<(i32, i64)>> {
        self.enter("resolve_class_ids")?;
        Ok(self.class_pairs(license_key, local_class_ids))
    }

    async fn trial_ids_for_show(&self, remote_show_id: i64) -> Result<Vec<i64>> {
        self.enter("trial_ids_for_show")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .trials
            .iter()
            .filter(|t| t.record.show_id == remote_show_id)
            .map(|t| t.id)
            .collect())
    }

    async fn upsert_show(&self, record: &ShowRecord) -> Result<()> {
        self.enter("upsert_show")?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.shows.get(&record.license_key).map(|(id, _)| *id) {
            state
                .shows
                .insert(record.license_key.clone(), (existing, record.clone()));
        } else {
            let id = state.allocate_id();
            state
                .shows
                .insert(record.license_key.clone(), (id, record.clone()));
        }
        Ok(())
    }

    async fn upsert_trials(&self, records: &[TrialRecord]) -> Result<()> {
        self.enter("upsert_trials")?;
        let mut state = self.state.lock().unwrap();
        for record in records {
            let existing = state.trials.iter().position(|t| {
                t.record.show_id == record.show_id
                    && t.record.trial_number == record.trial_number
                    && t.record.trial_date == record.trial_date
            });
            match existing {
                Some(index) => {
                    state.trials[index].access_trial_id = record.access_trial_id;
                    state.trials[index].record = record.clone();
                }
                None => {
                    let id = state.allocate_id();
                    state.trials.push(RemoteTrialRow {
                        id,
                        access_trial_id: record.access_trial_id,
                        record: record.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn upsert_classes(&self, records: &[ClassRecord]) -> Result<()> {
        self.enter("upsert_classes")?;
        let mut state = self.state.lock().unwrap();
        for record in records {
            let existing = state.classes.iter().position(|c| {
                c.record.trial_id == record.trial_id
                    && c.record.element == record.element
                    && c.record.level == record.level
                    && c.record.section == record.section
            });
            match existing {
                Some(index) => {
                    state.classes[index].access_class_id = record.access_class_id;
                    state.classes[index].record = record.clone();
                }
                None => {
                    let id = state.allocate_id();
                    state.classes.push(RemoteClassRow {
                        id,
                        access_class_id: record.access_class_id,
                        record: record.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn upsert_entries(&self, records: &[EntryRecord]) -> Result<()> {
        self.enter("upsert_entries")?;
        let mut state = self.state.lock().unwrap();
        for record in records {
            state
                .entries
                .insert((record.class_id, record.armband), record.clone());
        }
        Ok(())
    }

    async fn upsert_entry_roster(&self, records: &[EntryRosterRecord]) -> Result<()> {
        self.enter("upsert_entry_roster")?;
        let mut state = self.state.lock().unwrap();
        for record in records {
            let key = (record.class_id, record.armband);
            // Merge-duplicates only touches the columns present in the
            // payload, so an existing row keeps its score columns.
            if let Some(existing) = state.entries.get_mut(&key) {
                existing.access_entry_id = record.access_entry_id;
                existing.call_name = record.call_name.clone();
                existing.breed = record.breed.clone();
                existing.handler = record.handler.clone();
                existing.sort_order = record.sort_order;
            } else {
                state.roster.insert(key, record.clone());
            }
        }
        Ok(())
    }

    async fn scored_entries(&self, remote_class_ids: &[i64]) -> Result<Vec<ScoredEntrySummary>> {
        self.enter("scored_entries")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .scored
            .iter()
            .filter(|(class_id, _)| remote_class_ids.contains(class_id))
            .map(|(_, summary)| summary.clone())
            .collect())
    }

    async fn unlock_class(&self, _remote_class_id: i64) -> Result<i64> {
        self.enter("unlock_class")?;
        let mut state = self.state.lock().unwrap();
        let count = state.unlock_returns;
        state.unlock_returns = 0;
        Ok(count)
    }

    async fn unlock_trial(&self, _remote_trial_id: i64) -> Result<i64> {
        self.enter("unlock_trial")?;
        let mut state = self.state.lock().unwrap();
        let count = state.unlock_returns;
        state.unlock_returns = 0;
        Ok(count)
    }

    async fn class_limits(&self, remote_class_id: i64) -> Result<Option<RemoteClassLimits>> {
        self.enter("class_limits")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .limits
            .get(&remote_class_id)
            .cloned())
    }

    async fn class_results(&self, remote_class_id: i64) -> Result<Vec<RemoteEntryResult>> {
        self.enter("class_results")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .results
            .get(&remote_class_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_show(&self, license_key: &str) -> Result<()> {
        self.enter("delete_show")?;
        self.state.lock().unwrap().shows.remove(license_key);
        Ok(())
    }

    async fn delete_trial(&self, remote_show_id: i64, local_trial_id: i32) -> Result<()> {
        self.enter("delete_trial")?;
        self.state.lock().unwrap().trials.retain(|t| {
            !(t.record.show_id == remote_show_id && t.access_trial_id == local_trial_id)
        });
        Ok(())
    }

    async fn delete_class(&self, remote_trial_ids: &[i64], local_class_id: i32) -> Result<()> {
        self.enter("delete_class")?;
        self.state.lock().unwrap().classes.retain(|c| {
            !(remote_trial_ids.contains(&c.record.trial_id)
                && c.access_class_id == local_class_id)
        });
        Ok(())
    }

    async fn delete_entry(&self, remote_class_id: i64, local_entry_id: i32) -> Result<()> {
        self.enter("delete_entry")?;
        self.state.lock().unwrap().entries.retain(|(class_id, _), record| {
            !(*class_id == remote_class_id && record.access_entry_id == local_entry_id)
        });
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Scripted collaborators
// ─────────────────────────────────────────────────────────────────────────

pub struct ScriptedPrompt {
    pub upload_choice: UploadConflictChoice,
    pub download_choice: DownloadConflictChoice,
    pub seen_upload: Mutex<Vec<Vec<ScoredEntrySummary>>>,
    pub seen_download: Mutex<Vec<Vec<ScoredEntrySummary>>>,
}

impl ScriptedPrompt {
    pub fn new(upload_choice: UploadConflictChoice, download_choice: DownloadConflictChoice) -> Self {
        Self {
            upload_choice,
            download_choice,
            seen_upload: Mutex::new(Vec::new()),
            seen_download: Mutex::new(Vec::new()),
        }
    }
}

impl ConflictPrompt for ScriptedPrompt {
    fn resolve_upload_conflict(
        &self,
        _scope: &SyncScope,
        scored: &[ScoredEntrySummary],
    ) -> UploadConflictChoice {
        self.seen_upload.lock().unwrap().push(scored.to_vec());
        self.upload_choice
    }

    fn resolve_download_conflict(
        &self,
        _class_id: i32,
        scored: &[ScoredEntrySummary],
    ) -> DownloadConflictChoice {
        self.seen_download.lock().unwrap().push(scored.to_vec());
        self.download_choice
    }
}

#[derive(Default)]
pub struct RecordingRecalculator {
    pub calls: Mutex<Vec<i32>>,
}

impl ScoreRecalculator for RecordingRecalculator {
    fn recalculate_class(&self, class_id: i32) -> Result<()> {
        self.calls.lock().unwrap().push(class_id);
        Ok(())
    }
}
