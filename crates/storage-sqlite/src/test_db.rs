//! Shared fixtures for repository tests: an in-memory database with
//! migrations applied. Pool size 1 keeps every connection on the same
//! in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;

use showdesk_core::classes::NewClass;
use showdesk_core::entries::NewEntry;
use showdesk_core::shows::NewShow;
use showdesk_core::trials::NewTrial;

use crate::db::{create_pool, get_connection, run_migrations, DbPool, WriteHandle};

pub fn test_pool() -> (Arc<DbPool>, WriteHandle) {
    let pool = create_pool(":memory:", 1).expect("test pool");
    {
        let mut conn = get_connection(&pool).expect("test connection");
        run_migrations(&mut conn).expect("migrations");
    }
    let writer = WriteHandle::new(Arc::clone(&pool));
    (pool, writer)
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid date")
}

pub fn new_show_fixture(license_key: &str) -> NewShow {
    NewShow {
        license_key: license_key.to_string(),
        name: "Autumn Classic".to_string(),
        club: "Cascade Scent Work Club".to_string(),
        start_date: test_date(),
        end_date: test_date(),
        location: Some("Fairgrounds Hall B".to_string()),
        contact: None,
        notes: None,
    }
}

pub fn new_trial_fixture(show_id: i32, trial_number: i32) -> NewTrial {
    NewTrial {
        show_id,
        name: format!("Trial {}", trial_number),
        trial_date: test_date(),
        trial_number,
        trial_type: "Regular".to_string(),
    }
}

pub fn new_class_fixture(trial_id: i32, element: &str) -> NewClass {
    NewClass {
        trial_id,
        element: element.to_string(),
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

pub fn new_entry_fixture(class_id: i32, armband: i32) -> NewEntry {
    NewEntry {
        class_id,
        armband,
        call_name: format!("Dog {}", armband),
        breed: Some("Border Collie".to_string()),
        handler: format!("Handler {}", armband),
        sort_order: armband,
    }
}
