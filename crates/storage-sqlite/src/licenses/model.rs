use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use showdesk_core::license::License;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(primary_key(show_id))]
#[diesel(table_name = crate::schema::licenses)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LicenseDB {
    pub show_id: i32,
    pub license_key: String,
    pub cached_status: String,
    pub checked_at: Option<String>,
}

impl From<LicenseDB> for License {
    fn from(row: LicenseDB) -> Self {
        License {
            show_id: row.show_id,
            license_key: row.license_key,
            cached_status: row.cached_status,
            checked_at: row.checked_at,
        }
    }
}

impl From<License> for LicenseDB {
    fn from(license: License) -> Self {
        LicenseDB {
            show_id: license.show_id,
            license_key: license.license_key,
            cached_status: license.cached_status,
            checked_at: license.checked_at,
        }
    }
}
