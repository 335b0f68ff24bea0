use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use showdesk_core::classes::{Class, NewClass, TimeLimitUpdate};

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
#[diesel(table_name = crate::schema::classes)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClassDB {
    pub id: i32,
    pub trial_id: i32,
    pub element: String,
    pub level: String,
    pub section: Option<String>,
    pub judge: Option<String>,
    pub sort_order: i32,
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::classes)]
pub struct NewClassDB {
    pub trial_id: i32,
    pub element: String,
    pub level: String,
    pub section: Option<String>,
    pub judge: Option<String>,
    pub sort_order: i32,
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

/// Downloaded time limits; writes NULL for unset values.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::classes)]
#[diesel(treat_none_as_null = true)]
pub struct TimeLimitChangeset {
    pub time_limit: Option<String>,
    pub time_limit2: Option<String>,
    pub time_limit3: Option<String>,
    pub area_count: Option<i32>,
}

impl From<TimeLimitUpdate> for TimeLimitChangeset {
    fn from(update: TimeLimitUpdate) -> Self {
        TimeLimitChangeset {
            time_limit: update.time_limit,
            time_limit2: update.time_limit2,
            time_limit3: update.time_limit3,
            area_count: update.area_count,
        }
    }
}

impl From<ClassDB> for Class {
    fn from(row: ClassDB) -> Self {
        Class {
            id: row.id,
            trial_id: row.trial_id,
            element: row.element,
            level: row.level,
            section: row.section,
            judge: row.judge,
            sort_order: row.sort_order,
            time_limit: row.time_limit,
            time_limit2: row.time_limit2,
            time_limit3: row.time_limit3,
            area_count: row.area_count,
        }
    }
}

impl From<Class> for ClassDB {
    fn from(class: Class) -> Self {
        ClassDB {
            id: class.id,
            trial_id: class.trial_id,
            element: class.element,
            level: class.level,
            section: class.section,
            judge: class.judge,
            sort_order: class.sort_order,
            time_limit: class.time_limit,
            time_limit2: class.time_limit2,
            time_limit3: class.time_limit3,
            area_count: class.area_count,
        }
    }
}

impl From<NewClass> for NewClassDB {
    fn from(new_class: NewClass) -> Self {
        NewClassDB {
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
        }
    }
}
