//! `RemoteStore` implementation over the PostgREST client.
//!
//! Remote rows carry back-references to the originating local ids
//! (`access_*_id` columns); the local store never persists remote ids, so
//! every lookup here is a fresh point query chained through the show's
//! license key. `None` means "never uploaded" and callers no-op.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use showdesk_core::sync::records::{
    ClassRecord, EntryRecord, EntryRosterRecord, ShowRecord, TrialRecord,
};
use showdesk_core::sync::remote::{
    RemoteClassLimits, RemoteEntryResult, RemoteStore, ScoredEntrySummary,
};
use showdesk_core::Result;

use crate::client::PostgrestClient;
use crate::config::RemoteConfig;

const SHOWS: &str = "shows";
const TRIALS: &str = "trials";
const CLASSES: &str = "classes";
const ENTRIES: &str = "entries";

const SHOW_CONFLICT: &[&str] = &["license_key"];
const TRIAL_CONFLICT: &[&str] = &["show_id", "trial_number", "trial_date"];
const CLASS_CONFLICT: &[&str] = &["trial_id", "element", "level", "section"];
const ENTRY_CONFLICT: &[&str] = &["class_id", "armband"];

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ClassIdRow {
    id: i64,
    access_class_id: i32,
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

fn in_list<T: std::fmt::Display>(values: &[T]) -> String {
    let joined = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

pub struct SupabaseStore {
    client: PostgrestClient,
}

impl SupabaseStore {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: PostgrestClient::new(config),
        }
    }

    pub fn with_client(client: PostgrestClient) -> Self {
        Self { client }
    }

    /// Remote trial ids belonging to the show with this license key.
    async fn resolve_trial_ids(&self, license_key: &str) -> Result<Vec<i64>> {
        let Some(show_id) = self.resolve_show_id(license_key).await? else {
            return Ok(Vec::new());
        };
        self.trial_ids_for_show(show_id).await
    }
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    async fn resolve_show_id(&self, license_key: &str) -> Result<Option<i64>> {
        if license_key.trim().is_empty() {
            return Ok(None);
        }
        let rows: Vec<IdRow> = self
            .client
            .select(
                SHOWS,
                &[
                    ("select", "id".to_string()),
                    ("license_key", eq(license_key)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.first().map(|row| row.id))
    }

    async fn resolve_trial_id(
        &self,
        license_key: &str,
        local_trial_id: i32,
    ) -> Result<Option<i64>> {
        let Some(show_id) = self.resolve_show_id(license_key).await? else {
            return Ok(None);
        };
        let rows: Vec<IdRow> = self
            .client
            .select(
                TRIALS,
                &[
                    ("select", "id".to_string()),
                    ("show_id", eq(show_id)),
                    ("access_trial_id", eq(local_trial_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.first().map(|row| row.id))
    }

    async fn resolve_class_id(
        &self,
        license_key: &str,
        local_class_id: i32,
    ) -> Result<Option<i64>> {
        let resolved = self.resolve_class_ids(license_key, &[local_class_id]).await?;
        Ok(resolved.first().map(|(_, remote)| *remote))
    }

    async fn resolve_class_ids(
        &self,
        license_key: &str,
        local_class_ids: &[i32],
    ) -> Result<Vec<(i32, i64)>> {
        if local_class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let trial_ids = self.resolve_trial_ids(license_key).await?;
        if trial_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<ClassIdRow> = self
            .client
            .select(
                CLASSES,
                &[
                    ("select", "id,access_class_id".to_string()),
                    ("trial_id", in_list(&trial_ids)),
                    ("access_class_id", in_list(local_class_ids)),
                ],
            )
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.access_class_id, row.id))
            .collect())
    }

    async fn trial_ids_for_show(&self, remote_show_id: i64) -> Result<Vec<i64>> {
        let rows: Vec<IdRow> = self
            .client
            .select(
                TRIALS,
                &[
                    ("select", "id".to_string()),
                    ("show_id", eq(remote_show_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn upsert_show(&self, record: &ShowRecord) -> Result<()> {
        self.client
            .upsert(SHOWS, SHOW_CONFLICT, std::slice::from_ref(record))
            .await?;
        Ok(())
    }

    async fn upsert_trials(&self, records: &[TrialRecord]) -> Result<()> {
        self.client.upsert(TRIALS, TRIAL_CONFLICT, records).await?;
        Ok(())
    }

    async fn upsert_classes(&self, records: &[ClassRecord]) -> Result<()> {
        self.client.upsert(CLASSES, CLASS_CONFLICT, records).await?;
        Ok(())
    }

    async fn upsert_entries(&self, records: &[EntryRecord]) -> Result<()> {
        self.client.upsert(ENTRIES, ENTRY_CONFLICT, records).await?;
        Ok(())
    }

    async fn upsert_entry_roster(&self, records: &[EntryRosterRecord]) -> Result<()> {
        self.client.upsert(ENTRIES, ENTRY_CONFLICT, records).await?;
        Ok(())
    }

    async fn scored_entries(&self, remote_class_ids: &[i64]) -> Result<Vec<ScoredEntrySummary>> {
        if remote_class_ids.is_empty() {
            return Ok(Vec::new());
        }
        let class_filter = match remote_class_ids {
            [single] => eq(single),
            many => in_list(many),
        };
        let rows: Vec<ScoredEntrySummary> = self
            .client
            .select(
                ENTRIES,
                &[
                    ("select", "armband,call_name,handler".to_string()),
                    ("class_id", class_filter),
                    ("is_scored", "eq.true".to_string()),
                    ("order", "armband.asc".to_string()),
                ],
            )
            .await?;
        Ok(rows)
    }

    async fn unlock_class(&self, remote_class_id: i64) -> Result<i64> {
        let count = self
            .client
            .rpc_i64("unlock_class_scores", json!({ "p_class_id": remote_class_id }))
            .await?;
        Ok(count)
    }

    async fn unlock_trial(&self, remote_trial_id: i64) -> Result<i64> {
        let count = self
            .client
            .rpc_i64("unlock_trial_scores", json!({ "p_trial_id": remote_trial_id }))
            .await?;
        Ok(count)
    }

    async fn class_limits(&self, remote_class_id: i64) -> Result<Option<RemoteClassLimits>> {
        let rows: Vec<RemoteClassLimits> = self
            .client
            .select(
                CLASSES,
                &[
                    (
                        "select",
                        "time_limit,time_limit2,time_limit3,area_count".to_string(),
                    ),
                    ("id", eq(remote_class_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn class_results(&self, remote_class_id: i64) -> Result<Vec<RemoteEntryResult>> {
        let rows: Vec<RemoteEntryResult> = self
            .client
            .select(
                ENTRIES,
                &[
                    (
                        "select",
                        "access_entry_id,armband,call_name,handler,status,reason,is_scored,\
                         search_time,area_time1,area_time2,area_time3,total_faults,\
                         correct_count,incorrect_count"
                            .to_string(),
                    ),
                    ("class_id", eq(remote_class_id)),
                    ("order", "armband.asc".to_string()),
                ],
            )
            .await?;
        Ok(rows)
    }

    async fn delete_show(&self, license_key: &str) -> Result<()> {
        self.client
            .delete(SHOWS, &[("license_key", eq(license_key))])
            .await?;
        Ok(())
    }

    async fn delete_trial(&self, remote_show_id: i64, local_trial_id: i32) -> Result<()> {
        self.client
            .delete(
                TRIALS,
                &[
                    ("show_id", eq(remote_show_id)),
                    ("access_trial_id", eq(local_trial_id)),
                ],
            )
            .await?;
        Ok(())
    }

    async fn delete_class(&self, remote_trial_ids: &[i64], local_class_id: i32) -> Result<()> {
        if remote_trial_ids.is_empty() {
            return Ok(());
        }
        self.client
            .delete(
                CLASSES,
                &[
                    ("trial_id", in_list(remote_trial_ids)),
                    ("access_class_id", eq(local_class_id)),
                ],
            )
            .await?;
        Ok(())
    }

    async fn delete_entry(&self, remote_class_id: i64, local_entry_id: i32) -> Result<()> {
        self.client
            .delete(
                ENTRIES,
                &[
                    ("class_id", eq(remote_class_id)),
                    ("access_entry_id", eq(local_entry_id)),
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testhttp::{start_mock_server, MockResponse};

    fn store_for(base_url: &str) -> SupabaseStore {
        SupabaseStore::new(&RemoteConfig::new(base_url, "test-key"))
    }

    #[tokio::test]
    async fn resolve_show_id_maps_first_row_and_empty_to_none() {
        let (base_url, captured, server) = start_mock_server(vec![
            MockResponse::new(200, r#"[{"id":42}]"#),
            MockResponse::new(200, "[]"),
        ])
        .await;
        let store = store_for(&base_url);

        assert_eq!(
            store.resolve_show_id("SWN-2026-0042").await.expect("resolve"),
            Some(42)
        );
        assert_eq!(store.resolve_show_id("SWN-2026-0042").await.expect("resolve"), None);

        let requests = captured.lock().await.clone();
        assert!(requests[0]
            .request_line
            .contains("license_key=eq.SWN-2026-0042"));
        server.abort();
    }

    #[tokio::test]
    async fn empty_license_key_short_circuits_without_a_request() {
        let (base_url, captured, server) = start_mock_server(vec![]).await;
        let store = store_for(&base_url);

        assert_eq!(store.resolve_show_id("  ").await.expect("resolve"), None);
        assert!(captured.lock().await.is_empty());
        server.abort();
    }

    #[tokio::test]
    async fn class_resolution_chains_show_then_trials_then_classes() {
        let (base_url, captured, server) = start_mock_server(vec![
            MockResponse::new(200, r#"[{"id":10}]"#),
            MockResponse::new(200, r#"[{"id":30},{"id":31}]"#),
            MockResponse::new(200, r#"[{"id":70,"access_class_id":7},{"id":80,"access_class_id":8}]"#),
        ])
        .await;
        let store = store_for(&base_url);

        let resolved = store
            .resolve_class_ids("SWN-2026-0042", &[7, 8])
            .await
            .expect("resolve");
        assert_eq!(resolved, vec![(7, 70), (8, 80)]);

        let requests = captured.lock().await.clone();
        assert_eq!(requests.len(), 3);
        assert!(requests[1].request_line.contains("show_id=eq.10"));
        assert!(requests[2].request_line.contains("trial_id=in.%2830%2C31%29"));
        assert!(requests[2]
            .request_line
            .contains("access_class_id=in.%287%2C8%29"));
        server.abort();
    }

    #[tokio::test]
    async fn scored_entries_uses_eq_for_one_class_and_in_for_many() {
        let (base_url, captured, server) = start_mock_server(vec![
            MockResponse::new(200, "[]"),
            MockResponse::new(200, "[]"),
        ])
        .await;
        let store = store_for(&base_url);

        store.scored_entries(&[70]).await.expect("single class");
        store.scored_entries(&[70, 80]).await.expect("trial shape");

        let requests = captured.lock().await.clone();
        assert!(requests[0].request_line.contains("class_id=eq.70"));
        assert!(requests[0].request_line.contains("is_scored=eq.true"));
        assert!(requests[1].request_line.contains("class_id=in.%2870%2C80%29"));
        server.abort();
    }

    #[tokio::test]
    async fn unlock_trial_calls_the_trial_procedure() {
        let (base_url, captured, server) =
            start_mock_server(vec![MockResponse::new(200, "[5]")]).await;
        let store = store_for(&base_url);

        let unlocked = store.unlock_trial(30).await.expect("unlock");
        assert_eq!(unlocked, 5);

        let requests = captured.lock().await.clone();
        assert!(requests[0]
            .request_line
            .starts_with("POST /rest/v1/rpc/unlock_trial_scores"));
        assert_eq!(requests[0].body, r#"{"p_trial_id":30}"#);
        server.abort();
    }

    #[tokio::test]
    async fn delete_class_scopes_to_trial_set_and_skips_empty() {
        let (base_url, captured, server) =
            start_mock_server(vec![MockResponse::new(204, "")]).await;
        let store = store_for(&base_url);

        store.delete_class(&[], 7).await.expect("empty is a no-op");
        assert!(captured.lock().await.is_empty());

        store.delete_class(&[30, 31], 7).await.expect("delete");
        let requests = captured.lock().await.clone();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].request_line.starts_with("DELETE /rest/v1/classes?"));
        assert!(requests[0].request_line.contains("access_class_id=eq.7"));
        server.abort();
    }
}
