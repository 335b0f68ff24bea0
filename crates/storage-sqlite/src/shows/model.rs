use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use showdesk_core::shows::{NewShow, Show};

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
#[diesel(table_name = crate::schema::shows)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShowDB {
    pub id: i32,
    pub license_key: String,
    pub name: String,
    pub club: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::shows)]
pub struct NewShowDB {
    pub license_key: String,
    pub name: String,
    pub club: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

impl From<ShowDB> for Show {
    fn from(row: ShowDB) -> Self {
        Show {
            id: row.id,
            license_key: row.license_key,
            name: row.name,
            club: row.club,
            start_date: row.start_date,
            end_date: row.end_date,
            location: row.location,
            contact: row.contact,
            notes: row.notes,
        }
    }
}

impl From<Show> for ShowDB {
    fn from(show: Show) -> Self {
        ShowDB {
            id: show.id,
            license_key: show.license_key,
            name: show.name,
            club: show.club,
            start_date: show.start_date,
            end_date: show.end_date,
            location: show.location,
            contact: show.contact,
            notes: show.notes,
        }
    }
}

impl From<NewShow> for NewShowDB {
    fn from(new_show: NewShow) -> Self {
        NewShowDB {
            license_key: new_show.license_key,
            name: new_show.name,
            club: new_show.club,
            start_date: new_show.start_date,
            end_date: new_show.end_date,
            location: new_show.location,
            contact: new_show.contact,
            notes: new_show.notes,
        }
    }
}
