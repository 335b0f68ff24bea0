use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use showdesk_core::trials::{NewTrial, Trial};

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
#[diesel(table_name = crate::schema::trials)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrialDB {
    pub id: i32,
    pub show_id: i32,
    pub name: String,
    pub trial_date: NaiveDate,
    pub trial_number: i32,
    pub trial_type: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::trials)]
pub struct NewTrialDB {
    pub show_id: i32,
    pub name: String,
    pub trial_date: NaiveDate,
    pub trial_number: i32,
    pub trial_type: String,
}

impl From<TrialDB> for Trial {
    fn from(row: TrialDB) -> Self {
        Trial {
            id: row.id,
            show_id: row.show_id,
            name: row.name,
            trial_date: row.trial_date,
            trial_number: row.trial_number,
            trial_type: row.trial_type,
        }
    }
}

impl From<Trial> for TrialDB {
    fn from(trial: Trial) -> Self {
        TrialDB {
            id: trial.id,
            show_id: trial.show_id,
            name: trial.name,
            trial_date: trial.trial_date,
            trial_number: trial.trial_number,
            trial_type: trial.trial_type,
        }
    }
}

impl From<NewTrial> for NewTrialDB {
    fn from(new_trial: NewTrial) -> Self {
        NewTrialDB {
            show_id: new_trial.show_id,
            name: new_trial.name,
            trial_date: new_trial.trial_date,
            trial_number: new_trial.trial_number,
            trial_type: new_trial.trial_type,
        }
    }
}
