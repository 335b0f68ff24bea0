use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use showdesk_core::entries::{
    Entry, EntryRepositoryTrait, EntryResultUpdate, NewEntry,
};
use showdesk_core::errors::{DatabaseError, Error};
use showdesk_core::Result;

use super::model::{EntryDB, EntryResultChangeset, NewEntryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{classes, entries};
use crate::schema::entries::dsl::*;

pub struct EntryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EntryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EntryRepository { pool, writer }
    }
}

#[async_trait]
impl EntryRepositoryTrait for EntryRepository {
    fn get_entry(&self, entry_id: i32) -> Result<Entry> {
        let mut conn = get_connection(&self.pool)?;
        let row = entries
            .find(entry_id)
            .first::<EntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Entry::from(row))
    }

    fn find_entry(&self, entry_id: i32) -> Result<Option<Entry>> {
        let mut conn = get_connection(&self.pool)?;
        let row = entries
            .find(entry_id)
            .first::<EntryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Entry::from))
    }

    fn list_entries_for_class(&self, for_class_id: i32) -> Result<Vec<Entry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = entries
            .filter(class_id.eq(for_class_id))
            .order((sort_order.asc(), armband.asc()))
            .load::<EntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Entry::from).collect())
    }

    fn list_entries_for_trial(&self, for_trial_id: i32) -> Result<Vec<Entry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = entries::table
            .inner_join(classes::table.on(classes::id.eq(entries::class_id)))
            .filter(classes::trial_id.eq(for_trial_id))
            .order((
                classes::sort_order.asc(),
                entries::sort_order.asc(),
                entries::armband.asc(),
            ))
            .select(EntryDB::as_select())
            .load::<EntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn insert_entry(&self, new_entry: NewEntry) -> Result<Entry> {
        self.writer
            .exec(move |conn| -> Result<Entry> {
                let row = diesel::insert_into(entries::table)
                    .values(NewEntryDB::from(new_entry))
                    .returning(EntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Entry::from(row))
            })
            .await
    }

    async fn update_entry(&self, entry: Entry) -> Result<Entry> {
        self.writer
            .exec(move |conn| -> Result<Entry> {
                let row_db = EntryDB::from(entry);
                let row = diesel::update(entries.find(row_db.id))
                    .set(&row_db)
                    .returning(EntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Entry::from(row))
            })
            .await
    }

    async fn delete_entry(&self, entry_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn| -> Result<usize> {
                let affected = diesel::delete(entries.find(entry_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    async fn apply_result(&self, entry_id: i32, update: EntryResultUpdate) -> Result<()> {
        self.writer
            .exec(move |conn| -> Result<()> {
                let affected = diesel::update(entries.find(entry_id))
                    .set(EntryResultChangeset::from(&update))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::QueryFailed(format!(
                        "entry {} not found",
                        entry_id
                    ))));
                }
                if update.clear_area_millis {
                    diesel::update(entries.find(entry_id))
                        .set((
                            area_time1_ms.eq(0),
                            area_time2_ms.eq(0),
                            area_time3_ms.eq(0),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
