use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use showdesk_core::license::{License, LicenseRepositoryTrait};
use showdesk_core::Result;

use super::model::LicenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::licenses;
use crate::schema::licenses::dsl::*;

pub struct LicenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LicenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LicenseRepository { pool, writer }
    }
}

#[async_trait]
impl LicenseRepositoryTrait for LicenseRepository {
    fn license_for_show(&self, for_show_id: i32) -> Result<Option<License>> {
        let mut conn = get_connection(&self.pool)?;
        let row = licenses
            .find(for_show_id)
            .first::<LicenseDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(License::from))
    }

    async fn save_license(&self, license: License) -> Result<()> {
        self.writer
            .exec(move |conn| -> Result<()> {
                let row = LicenseDB::from(license);
                diesel::insert_into(licenses::table)
                    .values(&row)
                    .on_conflict(licenses::show_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
