//! Delete propagation: remove remote rows after a local record is deleted.
//!
//! Callers capture the business keys before deleting locally and hand
//! them in here. An unresolved parent means the record was never uploaded;
//! the propagation is then a silent no-op, never an error.

use std::sync::Arc;

use log::{debug, info};

use crate::errors::Result;
use crate::sync::remote::RemoteStore;

pub struct DeletePropagator {
    remote: Arc<dyn RemoteStore>,
}

impl DeletePropagator {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }

    /// Delete the remote show row. Returns whether a delete was issued.
    pub async fn propagate_show_delete(&self, license_key: &str) -> Result<bool> {
        if self.remote.resolve_show_id(license_key).await?.is_none() {
            debug!("Show was never uploaded; nothing to delete");
            return Ok(false);
        }
        self.remote.delete_show(license_key).await?;
        info!("Deleted remote show for license key");
        Ok(true)
    }

    /// Delete the remote trial scoped to its show. Returns whether a
    /// delete was issued.
    pub async fn propagate_trial_delete(
        &self,
        license_key: &str,
        local_trial_id: i32,
    ) -> Result<bool> {
        let Some(remote_show_id) = self.remote.resolve_show_id(license_key).await? else {
            debug!("Show was never uploaded; nothing to delete");
            return Ok(false);
        };
        self.remote
            .delete_trial(remote_show_id, local_trial_id)
            .await?;
        info!("Deleted remote trial for local id {}", local_trial_id);
        Ok(true)
    }

    /// Delete the remote class scoped to the show's trials. Returns
    /// whether a delete was issued.
    pub async fn propagate_class_delete(
        &self,
        license_key: &str,
        local_class_id: i32,
    ) -> Result<bool> {
        let Some(remote_show_id) = self.remote.resolve_show_id(license_key).await? else {
            debug!("Show was never uploaded; nothing to delete");
            return Ok(false);
        };
        let trial_ids = self.remote.trial_ids_for_show(remote_show_id).await?;
        if trial_ids.is_empty() {
            debug!("Show has no remote trials; nothing to delete");
            return Ok(false);
        }
        self.remote.delete_class(&trial_ids, local_class_id).await?;
        info!("Deleted remote class for local id {}", local_class_id);
        Ok(true)
    }

    /// Delete the remote entry scoped to its class. Returns whether a
    /// delete was issued.
    pub async fn propagate_entry_delete(
        &self,
        license_key: &str,
        local_class_id: i32,
        local_entry_id: i32,
    ) -> Result<bool> {
        let Some(remote_class_id) = self
            .remote
            .resolve_class_id(license_key, local_class_id)
            .await?
        else {
            debug!("Class was never uploaded; nothing to delete");
            return Ok(false);
        };
        self.remote
            .delete_entry(remote_class_id, local_entry_id)
            .await?;
        info!("Deleted remote entry for local id {}", local_entry_id);
        Ok(true)
    }
}
