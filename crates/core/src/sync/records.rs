//! Wire record encoder.
//!
//! One record per local row, field names matching the remote columns.
//! Free-text escaping is handled by serde during serialization; the rules
//! that need care here are null-vs-zero on clock/count fields and the
//! mutually exclusive result state. Result columns are always present
//! (explicit `null` when unset) because heterogeneous key sets within one
//! bulk upsert array are rejected by the remote endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::classes::Class;
use crate::entries::{Entry, ResultState};
use crate::shows::Show;
use crate::trials::Trial;
use crate::utils::clock::{encode_clock_field, positive_count};

/// Upserted on `license_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub access_show_id: i32,
    pub license_key: String,
    pub name: String,
    pub club: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

/// Upserted on `(show_id, trial_number, trial_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub show_id: i64,
    pub access_trial_id: i32,
    pub name: String,
    pub trial_date: NaiveDate,
    pub trial_number: i32,
    pub trial_type: String,
}

/// Upserted on `(trial_id, element, level, section)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub trial_id: i64,
    pub access_class_id: i32,
    pub element: String,
    pub level: String,
    pub section: Option<String>,
    pub judge: Option<String>,
    pub sort_order: i32,
    pub time_limit: Option<f64>,
    pub time_limit2: Option<f64>,
    pub time_limit3: Option<f64>,
    pub area_count: Option<i32>,
}

/// Entry payload for the score-protecting upload path: no result columns
/// at all, so the bulk upsert cannot touch remote scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRosterRecord {
    pub class_id: i64,
    pub access_entry_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
}

/// Full entry payload, result columns included. Upserted on
/// `(class_id, armband)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub class_id: i64,
    pub access_entry_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
    pub status: ResultState,
    pub reason: Option<String>,
    pub is_scored: bool,
    pub search_time: Option<f64>,
    pub area_time1: Option<f64>,
    pub area_time2: Option<f64>,
    pub area_time3: Option<f64>,
    pub total_faults: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub placement: Option<i32>,
    pub total_score: Option<f64>,
}

pub fn encode_show(show: &Show) -> ShowRecord {
    ShowRecord {
        access_show_id: show.id,
        license_key: show.license_key.clone(),
        name: show.name.clone(),
        club: show.club.clone(),
        start_date: show.start_date,
        end_date: show.end_date,
        location: show.location.clone(),
        contact: show.contact.clone(),
        notes: show.notes.clone(),
    }
}

pub fn encode_trial(trial: &Trial, remote_show_id: i64) -> TrialRecord {
    TrialRecord {
        show_id: remote_show_id,
        access_trial_id: trial.id,
        name: trial.name.clone(),
        trial_date: trial.trial_date,
        trial_number: trial.trial_number,
        trial_type: trial.trial_type.clone(),
    }
}

pub fn encode_class(class: &Class, remote_trial_id: i64) -> ClassRecord {
    ClassRecord {
        trial_id: remote_trial_id,
        access_class_id: class.id,
        element: class.element.clone(),
        level: class.level.clone(),
        section: class.section.clone(),
        judge: class.judge.clone(),
        sort_order: class.sort_order,
        time_limit: encode_clock_field(class.time_limit.as_deref()),
        time_limit2: encode_clock_field(class.time_limit2.as_deref()),
        time_limit3: encode_clock_field(class.time_limit3.as_deref()),
        area_count: positive_count(class.area_count),
    }
}

pub fn encode_entry_roster(entry: &Entry, remote_class_id: i64) -> EntryRosterRecord {
    EntryRosterRecord {
        class_id: remote_class_id,
        access_entry_id: entry.id,
        armband: entry.armband,
        call_name: entry.call_name.clone(),
        breed: entry.breed.clone(),
        handler: entry.handler.clone(),
        sort_order: entry.sort_order,
    }
}

pub fn encode_entry(entry: &Entry, remote_class_id: i64) -> EntryRecord {
    let state = entry.result_state();
    EntryRecord {
        class_id: remote_class_id,
        access_entry_id: entry.id,
        armband: entry.armband,
        call_name: entry.call_name.clone(),
        breed: entry.breed.clone(),
        handler: entry.handler.clone(),
        sort_order: entry.sort_order,
        status: state,
        reason: if state.carries_reason() {
            entry.reason.clone()
        } else {
            None
        },
        is_scored: state.is_scored(),
        search_time: encode_clock_field(entry.search_time.as_deref()),
        area_time1: encode_clock_field(entry.area_time1.as_deref()),
        area_time2: encode_clock_field(entry.area_time2.as_deref()),
        area_time3: encode_clock_field(entry.area_time3.as_deref()),
        total_faults: entry.total_faults,
        correct_count: entry.correct_count,
        incorrect_count: entry.incorrect_count,
        placement: entry.placement,
        total_score: entry.total_score,
    }
}

/// Records carrying the remote natural key `(class_id, armband)`.
pub trait ArmbandKeyed {
    fn armband_key(&self) -> (i64, i32);
}

impl ArmbandKeyed for EntryRecord {
    fn armband_key(&self) -> (i64, i32) {
        (self.class_id, self.armband)
    }
}

impl ArmbandKeyed for EntryRosterRecord {
    fn armband_key(&self) -> (i64, i32) {
        (self.class_id, self.armband)
    }
}

/// Drop armband collisions within a class, keeping the first occurrence.
///
/// The remote uniqueness constraint on `(class_id, armband)` would
/// otherwise make the bulk upsert's outcome order-dependent.
pub fn dedupe_by_armband<T: ArmbandKeyed>(records: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.armband_key()))
        .collect()
}
