//! In-memory worker store for tests and dry runs.

use std::collections::HashSet;

use async_trait::async_trait;
use database::{DatabaseError, Worker};
use tokio::sync::RwLock;

use crate::error::{LedgerError, Result};
use crate::store::WorkerStore;

#[derive(Default)]
struct Inner {
    workers: Vec<Worker>,
    /// `(assignment_id, worker_id)`
    assignments: Vec<(String, Option<String>)>,
    failing: HashSet<String>,
    next_assignment: u64,
}

/// A [`WorkerStore`] held entirely in memory.
#[derive(Default)]
pub struct MemoryWorkerStore {
    inner: RwLock<Inner>,
}

impl MemoryWorkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_worker(&self, worker: Worker) {
        self.inner.write().await.workers.push(worker);
    }

    /// Add an assignment pointing at `worker_id` and return its ID.
    pub async fn add_assignment(&self, worker_id: &str) -> String {
        let mut inner = self.inner.write().await;
        inner.next_assignment += 1;
        let id = format!("assignment-{}", inner.next_assignment);
        inner
            .assignments
            .push((id.clone(), Some(worker_id.to_string())));
        id
    }

    /// Make every mutation touching `worker_id` fail.
    pub async fn fail_on(&self, worker_id: &str) {
        self.inner.write().await.failing.insert(worker_id.to_string());
    }

    pub async fn workers(&self) -> Vec<Worker> {
        self.inner.read().await.workers.clone()
    }

    /// Worker ID referenced by an assignment.
    pub async fn assignment_worker(&self, assignment_id: &str) -> Option<String> {
        self.inner
            .read()
            .await
            .assignments
            .iter()
            .find(|(id, _)| id == assignment_id)
            .and_then(|(_, worker)| worker.clone())
    }
}

fn injected_failure(worker_id: &str) -> LedgerError {
    LedgerError::Store(DatabaseError::Sqlx(sqlx::Error::Protocol(format!(
        "injected failure for {}",
        worker_id
    ))))
}

fn not_found(worker_id: &str) -> LedgerError {
    DatabaseError::NotFound {
        entity: "Worker",
        id: worker_id.to_string(),
    }
    .into()
}

#[async_trait]
impl WorkerStore for MemoryWorkerStore {
    async fn find_workers_by_name(&self, account_id: &str, name: &str) -> Result<Vec<Worker>> {
        let needle = name.trim().to_lowercase();
        let mut found: Vec<Worker> = self
            .inner
            .read()
            .await
            .workers
            .iter()
            .filter(|w| w.account_id == account_id && w.name.trim().to_lowercase() == needle)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    async fn count_assignments(&self, worker_id: &str) -> Result<i64> {
        let count = self
            .inner
            .read()
            .await
            .assignments
            .iter()
            .filter(|(_, w)| w.as_deref() == Some(worker_id))
            .count();
        Ok(count as i64)
    }

    async fn reassign_assignments(&self, from_worker_id: &str, to_worker_id: &str) -> Result<u64> {
        let mut inner = self.inner.write().await;
        if inner.failing.contains(from_worker_id) {
            return Err(injected_failure(from_worker_id));
        }

        let mut moved = 0;
        for (_, worker) in inner.assignments.iter_mut() {
            if worker.as_deref() == Some(from_worker_id) {
                *worker = Some(to_worker_id.to_string());
                moved += 1;
            }
        }
        Ok(moved)
    }

    async fn delete_worker(&self, account_id: &str, worker_id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.failing.contains(worker_id) {
            return Err(injected_failure(worker_id));
        }

        let before = inner.workers.len();
        inner
            .workers
            .retain(|w| !(w.id == worker_id && w.account_id == account_id));
        if inner.workers.len() == before {
            return Err(not_found(worker_id));
        }

        for (_, worker) in inner.assignments.iter_mut() {
            if worker.as_deref() == Some(worker_id) {
                *worker = None;
            }
        }
        Ok(())
    }

    async fn set_primary(&self, account_id: &str, worker_id: &str) -> Result<Worker> {
        let mut inner = self.inner.write().await;
        if inner.failing.contains(worker_id) {
            return Err(injected_failure(worker_id));
        }

        if !inner
            .workers
            .iter()
            .any(|w| w.id == worker_id && w.account_id == account_id)
        {
            return Err(not_found(worker_id));
        }

        let mut updated = None;
        for worker in inner.workers.iter_mut().filter(|w| w.account_id == account_id) {
            worker.is_primary = worker.id == worker_id;
            if worker.is_primary {
                updated = Some(worker.clone());
            }
        }
        updated.ok_or_else(|| not_found(worker_id))
    }

    async fn get_worker(&self, account_id: &str, worker_id: &str) -> Result<Worker> {
        self.inner
            .read()
            .await
            .workers
            .iter()
            .find(|w| w.id == worker_id && w.account_id == account_id)
            .cloned()
            .ok_or_else(|| not_found(worker_id))
    }
}
