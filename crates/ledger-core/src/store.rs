//! The store seam used by the worker de-duplicator.

use async_trait::async_trait;
use database::{Database, Worker};

use crate::error::Result;

/// Worker operations the de-duplicator needs from the backing store.
///
/// Implemented for [`Database`]; tests use [`crate::memory::MemoryWorkerStore`].
#[async_trait]
pub trait WorkerStore: Send + Sync {
    /// Workers of the account whose name matches case-insensitively.
    async fn find_workers_by_name(&self, account_id: &str, name: &str) -> Result<Vec<Worker>>;

    /// Number of assignments referencing the worker.
    async fn count_assignments(&self, worker_id: &str) -> Result<i64>;

    /// Move all assignments from one worker to another. Returns rows moved.
    async fn reassign_assignments(&self, from_worker_id: &str, to_worker_id: &str) -> Result<u64>;

    /// Delete a worker record.
    async fn delete_worker(&self, account_id: &str, worker_id: &str) -> Result<()>;

    /// Make the worker the account's only primary and return it.
    async fn set_primary(&self, account_id: &str, worker_id: &str) -> Result<Worker>;

    /// Fetch one worker of the account.
    async fn get_worker(&self, account_id: &str, worker_id: &str) -> Result<Worker>;
}

#[async_trait]
impl WorkerStore for Database {
    async fn find_workers_by_name(&self, account_id: &str, name: &str) -> Result<Vec<Worker>> {
        Ok(database::worker::find_workers_by_name(self.pool(), account_id, name).await?)
    }

    async fn count_assignments(&self, worker_id: &str) -> Result<i64> {
        Ok(database::worker::count_assignments(self.pool(), worker_id).await?)
    }

    async fn reassign_assignments(&self, from_worker_id: &str, to_worker_id: &str) -> Result<u64> {
        Ok(database::assignment::reassign_worker(self.pool(), from_worker_id, to_worker_id).await?)
    }

    async fn delete_worker(&self, account_id: &str, worker_id: &str) -> Result<()> {
        Ok(database::worker::delete_worker(self.pool(), account_id, worker_id).await?)
    }

    async fn set_primary(&self, account_id: &str, worker_id: &str) -> Result<Worker> {
        Ok(database::worker::set_primary(self.pool(), account_id, worker_id).await?)
    }

    async fn get_worker(&self, account_id: &str, worker_id: &str) -> Result<Worker> {
        Ok(database::worker::get_worker(self.pool(), account_id, worker_id).await?)
    }
}
