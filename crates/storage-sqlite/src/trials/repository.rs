use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use showdesk_core::trials::{NewTrial, Trial, TrialRepositoryTrait};
use showdesk_core::Result;

use super::model::{NewTrialDB, TrialDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::trials;
use crate::schema::trials::dsl::*;

pub struct TrialRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TrialRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TrialRepository { pool, writer }
    }
}

#[async_trait]
impl TrialRepositoryTrait for TrialRepository {
    fn get_trial(&self, trial_id: i32) -> Result<Trial> {
        let mut conn = get_connection(&self.pool)?;
        let row = trials
            .find(trial_id)
            .first::<TrialDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Trial::from(row))
    }

    fn list_trials_for_show(&self, for_show_id: i32) -> Result<Vec<Trial>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trials
            .filter(show_id.eq(for_show_id))
            .order((trial_date.asc(), trial_number.asc()))
            .load::<TrialDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Trial::from).collect())
    }

    async fn insert_trial(&self, new_trial: NewTrial) -> Result<Trial> {
        self.writer
            .exec(move |conn| -> Result<Trial> {
                let row = diesel::insert_into(trials::table)
                    .values(NewTrialDB::from(new_trial))
                    .returning(TrialDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Trial::from(row))
            })
            .await
    }

    async fn update_trial(&self, trial: Trial) -> Result<Trial> {
        self.writer
            .exec(move |conn| -> Result<Trial> {
                let row_db = TrialDB::from(trial);
                let row = diesel::update(trials.find(row_db.id))
                    .set(&row_db)
                    .returning(TrialDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Trial::from(row))
            })
            .await
    }

    async fn delete_trial(&self, trial_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn| -> Result<usize> {
                let affected = diesel::delete(trials.find(trial_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
