use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use showdesk_core::entries::{Entry, EntryResultUpdate, NewEntry, ResultState};

#[derive(
    Queryable,
    Identifiable,
    Selectable,
    AsChangeset,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EntryDB {
    pub id: i32,
    pub class_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
    pub qualified: bool,
    pub not_qualified: bool,
    pub excused: bool,
    pub absent: bool,
    pub withdrawn: bool,
    pub reason: Option<String>,
    pub search_time: Option<String>,
    pub area_time1: Option<String>,
    pub area_time2: Option<String>,
    pub area_time3: Option<String>,
    pub area_time1_ms: i32,
    pub area_time2_ms: i32,
    pub area_time3_ms: i32,
    pub total_faults: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub placement: Option<i32>,
    pub total_score: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::entries)]
pub struct NewEntryDB {
    pub class_id: i32,
    pub armband: i32,
    pub call_name: String,
    pub breed: Option<String>,
    pub handler: String,
    pub sort_order: i32,
}

/// Downloaded result fields; sets exactly one result flag.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(treat_none_as_null = true)]
pub struct EntryResultChangeset {
    pub qualified: bool,
    pub not_qualified: bool,
    pub excused: bool,
    pub absent: bool,
    pub withdrawn: bool,
    pub reason: Option<String>,
    pub search_time: Option<String>,
    pub area_time1: Option<String>,
    pub area_time2: Option<String>,
    pub area_time3: Option<String>,
    pub total_faults: i32,
    pub correct_count: i32,
    pub incorrect_count: i32,
}

impl From<&EntryResultUpdate> for EntryResultChangeset {
    fn from(update: &EntryResultUpdate) -> Self {
        EntryResultChangeset {
            qualified: update.state == ResultState::Qualified,
            not_qualified: update.state == ResultState::Nq,
            excused: update.state == ResultState::Excused,
            absent: update.state == ResultState::Absent,
            withdrawn: update.state == ResultState::Withdrawn,
            reason: update.reason.clone(),
            search_time: update.search_time.clone(),
            area_time1: update.area_time1.clone(),
            area_time2: update.area_time2.clone(),
            area_time3: update.area_time3.clone(),
            total_faults: update.total_faults,
            correct_count: update.correct_count,
            incorrect_count: update.incorrect_count,
        }
    }
}

impl From<EntryDB> for Entry {
    fn from(row: EntryDB) -> Self {
        Entry {
            id: row.id,
            class_id: row.class_id,
            armband: row.armband,
            call_name: row.call_name,
            breed: row.breed,
            handler: row.handler,
            sort_order: row.sort_order,
            qualified: row.qualified,
            not_qualified: row.not_qualified,
            excused: row.excused,
            absent: row.absent,
            withdrawn: row.withdrawn,
            reason: row.reason,
            search_time: row.search_time,
            area_time1: row.area_time1,
            area_time2: row.area_time2,
            area_time3: row.area_time3,
            area_time1_ms: row.area_time1_ms,
            area_time2_ms: row.area_time2_ms,
            area_time3_ms: row.area_time3_ms,
            total_faults: row.total_faults,
            correct_count: row.correct_count,
            incorrect_count: row.incorrect_count,
            placement: row.placement,
            total_score: row.total_score,
        }
    }
}

impl From<Entry> for EntryDB {
    fn from(entry: Entry) -> Self {
        EntryDB {
            id: entry.id,
            class_id: entry.class_id,
            armband: entry.armband,
            call_name: entry.call_name,
            breed: entry.breed,
            handler: entry.handler,
            sort_order: entry.sort_order,
            qualified: entry.qualified,
            not_qualified: entry.not_qualified,
            excused: entry.excused,
            absent: entry.absent,
            withdrawn: entry.withdrawn,
            reason: entry.reason,
            search_time: entry.search_time,
            area_time1: entry.area_time1,
            area_time2: entry.area_time2,
            area_time3: entry.area_time3,
            area_time1_ms: entry.area_time1_ms,
            area_time2_ms: entry.area_time2_ms,
            area_time3_ms: entry.area_time3_ms,
            total_faults: entry.total_faults,
            correct_count: entry.correct_count,
            incorrect_count: entry.incorrect_count,
            placement: entry.placement,
            total_score: entry.total_score,
        }
    }
}

impl From<NewEntry> for NewEntryDB {
    fn from(new_entry: NewEntry) -> Self {
        NewEntryDB {
            class_id: new_entry.class_id,
            armband: new_entry.armband,
            call_name: new_entry.call_name,
            breed: new_entry.breed,
            handler: new_entry.handler,
            sort_order: new_entry.sort_order,
        }
    }
}
