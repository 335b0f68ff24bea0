use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use showdesk_core::classes::{Class, ClassRepositoryTrait, NewClass, TimeLimitUpdate};
use showdesk_core::errors::{DatabaseError, Error};
use showdesk_core::Result;

use super::model::{ClassDB, NewClassDB, TimeLimitChangeset};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::classes;
use crate::schema::classes::dsl::*;

pub struct ClassRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ClassRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ClassRepository { pool, writer }
    }
}

#[async_trait]
impl ClassRepositoryTrait for ClassRepository {
    fn get_class(&self, class_id: i32) -> Result<Class> {
        let mut conn = get_connection(&self.pool)?;
        let row = classes
            .find(class_id)
            .first::<ClassDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Class::from(row))
    }

    fn list_classes_for_trial(&self, for_trial_id: i32) -> Result<Vec<Class>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = classes
            .filter(trial_id.eq(for_trial_id))
            .order(sort_order.asc())
            .load::<ClassDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Class::from).collect())
    }

    async fn insert_class(&self, new_class: NewClass) -> Result<Class> {
        self.writer
            .exec(move |conn| -> Result<Class> {
                let row = diesel::insert_into(classes::table)
                    .values(NewClassDB::from(new_class))
                    .returning(ClassDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Class::from(row))
            })
            .await
    }

    async fn update_class(&self, class: Class) -> Result<Class> {
        self.writer
            .exec(move |conn| -> Result<Class> {
                let row_db = ClassDB::from(class);
                let row = diesel::update(classes.find(row_db.id))
                    .set(&row_db)
                    .returning(ClassDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Class::from(row))
            })
            .await
    }

    async fn delete_class(&self, class_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn| -> Result<usize> {
                let affected = diesel::delete(classes.find(class_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    async fn set_time_limits(&self, class_id: i32, update: TimeLimitUpdate) -> Result<()> {
        self.writer
            .exec(move |conn| -> Result<()> {
                let affected = diesel::update(classes.find(class_id))
                    .set(TimeLimitChangeset::from(update))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::QueryFailed(format!(
                        "class {} not found",
                        class_id
                    ))));
                }
                Ok(())
            })
            .await
    }
}
