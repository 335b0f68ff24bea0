use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use showdesk_core::shows::{NewShow, Show, ShowRepositoryTrait};
use showdesk_core::Result;

use super::model::{NewShowDB, ShowDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::shows;
use crate::schema::shows::dsl::*;

pub struct ShowRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ShowRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ShowRepository { pool, writer }
    }
}

#[async_trait]
impl ShowRepositoryTrait for ShowRepository {
    fn get_show(&self, show_id: i32) -> Result<Show> {
        let mut conn = get_connection(&self.pool)?;
        let row = shows
            .find(show_id)
            .first::<ShowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Show::from(row))
    }

    fn list_shows(&self) -> Result<Vec<Show>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = shows
            .order(start_date.asc())
            .load::<ShowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Show::from).collect())
    }

    async fn insert_show(&self, new_show: NewShow) -> Result<Show> {
        self.writer
            .exec(move |conn| -> Result<Show> {
                let row = diesel::insert_into(shows::table)
                    .values(NewShowDB::from(new_show))
                    .returning(ShowDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Show::from(row))
            })
            .await
    }

    async fn update_show(&self, show: Show) -> Result<Show> {
        self.writer
            .exec(move |conn| -> Result<Show> {
                let row_db = ShowDB::from(show);
                let row = diesel::update(shows.find(row_db.id))
                    .set(&row_db)
                    .returning(ShowDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Show::from(row))
            })
            .await
    }

    async fn delete_show(&self, show_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn| -> Result<usize> {
                let affected = diesel::delete(shows.find(show_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
