//! Saved-analysis persistence contract
//!
//! Every operation runs as the currently authenticated user and enforces
//! ownership: a record is only ever readable, updatable, or deletable by
//! the user who created it.

use crate::auth::IdentityProvider;
use crate::error::{Result, StoreError};
use crate::record::{AnalysisPatch, AnalysisRecord, NewAnalysis};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// CRUD over a user's saved analyses
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a new record owned by the current user
    async fn create(&self, draft: NewAnalysis) -> Result<AnalysisRecord>;

    /// All records owned by the current user, newest first
    async fn list(&self) -> Result<Vec<AnalysisRecord>>;

    /// Fetch one record by id
    async fn get(&self, id: &str) -> Result<AnalysisRecord>;

    /// Apply a partial update to one record
    async fn update(&self, id: &str, patch: AnalysisPatch) -> Result<AnalysisRecord>;

    /// Remove one record
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory store for tests and local runs
pub struct MemoryAnalysisStore {
    identity: Arc<dyn IdentityProvider>,
    records: RwLock<HashMap<String, AnalysisRecord>>,
}

impl MemoryAnalysisStore {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            records: RwLock::new(HashMap::new()),
        }
    }

    fn require_user(&self) -> Result<String> {
        self.identity
            .current_user()
            .ok_or(StoreError::Unauthenticated)
    }

    /// Fetch a record and verify the caller owns it
    fn owned<'a>(
        records: &'a HashMap<String, AnalysisRecord>,
        id: &str,
        user_id: &str,
    ) -> Result<&'a AnalysisRecord> {
        let record = records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.user_id != user_id {
            return Err(StoreError::Unauthorized);
        }
        Ok(record)
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn create(&self, draft: NewAnalysis) -> Result<AnalysisRecord> {
        let user_id = self.require_user()?;

        let record = AnalysisRecord {
            id: Uuid::new_v4().to_string(),
            user_id,
            title: draft.title,
            description: draft.description,
            parameters: draft.parameters,
            results: draft.results,
            created_at: Utc::now(),
            status: draft.status,
            error_message: draft.error_message,
        };

        debug!(id = %record.id, "saving analysis record");
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<AnalysisRecord>> {
        let user_id = self.require_user()?;

        let records = self.records.read().await;
        let mut owned: Vec<AnalysisRecord> = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn get(&self, id: &str) -> Result<AnalysisRecord> {
        let user_id = self.require_user()?;

        let records = self.records.read().await;
        Self::owned(&records, id, &user_id).cloned()
    }

    async fn update(&self, id: &str, patch: AnalysisPatch) -> Result<AnalysisRecord> {
        let user_id = self.require_user()?;

        let mut records = self.records.write().await;
        Self::owned(&records, id, &user_id)?;

        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(results) = patch.results {
            record.results = Some(results);
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(error_message) = patch.error_message {
            record.error_message = Some(error_message);
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let user_id = self.require_user()?;

        let mut records = self.records.write().await;
        Self::owned(&records, id, &user_id)?;

        debug!(id, "deleting analysis record");
        records.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticIdentity;
    use crate::record::AnalysisStatus;
    use serde_json::json;

    fn draft(title: &str) -> NewAnalysis {
        NewAnalysis {
            title: title.to_string(),
            description: String::new(),
            parameters: json!({"tickers": ["AAPL"]}),
            results: None,
            status: AnalysisStatus::Completed,
            error_message: None,
        }
    }

    fn store_for(user: &str) -> MemoryAnalysisStore {
        MemoryAnalysisStore::new(Arc::new(StaticIdentity::signed_in(user)))
    }

    #[tokio::test]
    async fn test_create_assigns_id_owner_and_timestamp() {
        let store = store_for("user-1");
        let record = store.create(draft("first run")).await.expect("creates");

        assert!(!record.id.is_empty());
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.status, AnalysisStatus::Completed);

        let fetched = store.get(&record.id).await.expect("readable");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_unauthenticated_access_rejected() {
        let store = MemoryAnalysisStore::new(Arc::new(StaticIdentity::signed_out()));

        assert_eq!(
            store.create(draft("x")).await.unwrap_err(),
            StoreError::Unauthenticated
        );
        assert_eq!(store.list().await.unwrap_err(), StoreError::Unauthenticated);
        assert_eq!(
            store.get("any").await.unwrap_err(),
            StoreError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_ownership_enforced_on_every_operation() {
        let identity = Arc::new(StaticIdentity::signed_in("user-1"));
        let store = MemoryAnalysisStore::new(identity.clone());
        let record = store.create(draft("owned by user-1")).await.expect("creates");

        // another user takes over the session
        identity.set(crate::auth::AuthState::SignedIn {
            user_id: "user-2".to_string(),
        });

        assert_eq!(
            store.get(&record.id).await.unwrap_err(),
            StoreError::Unauthorized
        );
        assert_eq!(
            store
                .update(&record.id, AnalysisPatch::default())
                .await
                .unwrap_err(),
            StoreError::Unauthorized
        );
        assert_eq!(
            store.delete(&record.id).await.unwrap_err(),
            StoreError::Unauthorized
        );
        // and the other user's listing does not leak it
        assert!(store.list().await.expect("lists").is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = store_for("user-1");
        let first = store.create(draft("first")).await.expect("creates");
        let second = store.create(draft("second")).await.expect("creates");

        let listed = store.list().await.expect("lists");
        assert_eq!(listed.len(), 2);
        // created_at can tie at coarse clock resolution; newest-first must
        // at least never put the older record ahead of the newer one
        assert!(listed[0].created_at >= listed[1].created_at);
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
    }

    #[tokio::test]
    async fn test_update_applies_patch_fields() {
        let store = store_for("user-1");
        let record = store.create(draft("run")).await.expect("creates");

        let patch = AnalysisPatch {
            results: Some(json!({"decisions": {}})),
            status: Some(AnalysisStatus::Failed),
            error_message: Some("model overloaded".to_string()),
            ..AnalysisPatch::default()
        };
        let updated = store.update(&record.id, patch).await.expect("updates");

        assert_eq!(updated.title, "run");
        assert_eq!(updated.status, AnalysisStatus::Failed);
        assert_eq!(updated.error_message.as_deref(), Some("model overloaded"));
        assert!(updated.results.is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = store_for("user-1");
        let record = store.create(draft("run")).await.expect("creates");

        store.delete(&record.id).await.expect("deletes");
        assert_eq!(
            store.get(&record.id).await.unwrap_err(),
            StoreError::NotFound(record.id.clone())
        );
    }

    #[test]
    fn test_missing_record_is_not_found() {
        tokio_test::block_on(async {
            let store = store_for("user-1");
            assert_eq!(
                store.get("nope").await.unwrap_err(),
                StoreError::NotFound("nope".to_string())
            );
        });
    }
}
