//! Per-account application context.
//!
//! Holds the selected worker filter and the recently used workers. Handlers
//! receive it explicitly; it is read from the `preferences` table with
//! [`AppContext::load`] and written back with [`AppContext::save`].

use std::collections::VecDeque;

use database::preference as preference_store;
use database::Database;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::aggregate::WorkerFilter;
use crate::error::Result;

/// Preference key for the selected worker filter.
pub const SELECTED_WORKER_KEY: &str = "selected_worker";

/// Preference key for recently used worker IDs.
pub const RECENT_WORKERS_KEY: &str = "recent_workers";

/// Maximum number of recently used workers remembered.
pub const MAX_RECENT_WORKERS: usize = 5;

/// UI state for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    pub account_id: String,
    pub selected_worker: WorkerFilter,
    /// Most recent first, no duplicates.
    pub recent_workers: VecDeque<String>,
}

impl AppContext {
    /// A fresh context with no selection and no history.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            selected_worker: WorkerFilter::All,
            recent_workers: VecDeque::new(),
        }
    }

    /// Move a worker to the front of the recent list.
    pub fn remember_worker(&mut self, worker_id: &str) {
        self.recent_workers.retain(|id| id != worker_id);
        self.recent_workers.push_front(worker_id.to_string());
        self.recent_workers.truncate(MAX_RECENT_WORKERS);
    }

    /// Drop a worker from the selection and recent list (e.g., after deletion).
    pub fn forget_worker(&mut self, worker_id: &str) {
        self.recent_workers.retain(|id| id != worker_id);
        if self.selected_worker.worker_id() == Some(worker_id) {
            self.selected_worker = WorkerFilter::All;
        }
    }

    /// Load the stored context for an account.
    ///
    /// A corrupt recent-workers entry is logged and treated as empty.
    pub async fn load(db: &Database, account_id: &str) -> Result<Self> {
        let mut ctx = Self::new(account_id);

        if let Some(pref) =
            preference_store::get_preference(db.pool(), account_id, SELECTED_WORKER_KEY).await?
        {
            ctx.selected_worker = WorkerFilter::parse(&pref.value);
        }

        if let Some(pref) =
            preference_store::get_preference(db.pool(), account_id, RECENT_WORKERS_KEY).await?
        {
            match serde_json::from_str::<Vec<String>>(&pref.value) {
                Ok(ids) => {
                    ctx.recent_workers = ids.into_iter().take(MAX_RECENT_WORKERS).collect();
                }
                Err(err) => {
                    warn!("Ignoring unreadable recent workers for {}: {}", account_id, err);
                }
            }
        }

        Ok(ctx)
    }

    /// Persist the context.
    pub async fn save(&self, db: &Database) -> Result<()> {
        preference_store::upsert_preference(
            db.pool(),
            &self.account_id,
            SELECTED_WORKER_KEY,
            &self.selected_worker.to_string(),
        )
        .await?;

        let recent: Vec<&String> = self.recent_workers.iter().collect();
        let encoded = serde_json::to_string(&recent).unwrap_or_else(|_| "[]".to_string());
        preference_store::upsert_preference(db.pool(), &self.account_id, RECENT_WORKERS_KEY, &encoded)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::account;

    #[test]
    fn test_remember_worker_order_and_cap() {
        let mut ctx = AppContext::new("acct");
        for id in ["a", "b", "c", "d", "e", "f"] {
            ctx.remember_worker(id);
        }
        assert_eq!(ctx.recent_workers, ["f", "e", "d", "c", "b"]);

        ctx.remember_worker("c");
        assert_eq!(ctx.recent_workers, ["c", "f", "e", "d", "b"]);
    }

    #[test]
    fn test_forget_worker_resets_selection() {
        let mut ctx = AppContext::new("acct");
        ctx.selected_worker = WorkerFilter::Worker("a".into());
        ctx.remember_worker("a");
        ctx.remember_worker("b");

        ctx.forget_worker("a");
        assert_eq!(ctx.selected_worker, WorkerFilter::All);
        assert_eq!(ctx.recent_workers, ["b"]);
    }

    #[tokio::test]
    async fn test_load_save_roundtrip() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let acct = account::create_account(db.pool(), "Test", "token").await.unwrap();

        let fresh = AppContext::load(&db, &acct.id).await.unwrap();
        assert_eq!(fresh, AppContext::new(acct.id.clone()));

        let mut ctx = AppContext::new(acct.id.clone());
        ctx.selected_worker = WorkerFilter::Worker("w-2".into());
        ctx.remember_worker("w-1");
        ctx.remember_worker("w-2");
        ctx.save(&db).await.unwrap();

        let loaded = AppContext::load(&db, &acct.id).await.unwrap();
        assert_eq!(loaded, ctx);
    }

    #[tokio::test]
    async fn test_corrupt_recent_workers_ignored() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let acct = account::create_account(db.pool(), "Test", "token").await.unwrap();

        preference_store::upsert_preference(db.pool(), &acct.id, RECENT_WORKERS_KEY, "not json")
            .await
            .unwrap();

        let ctx = AppContext::load(&db, &acct.id).await.unwrap();
        assert!(ctx.recent_workers.is_empty());
    }
}
