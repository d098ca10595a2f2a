//! Worker de-duplication.
//!
//! Collapses workers sharing a name (case-insensitive) into one survivor,
//! moving every assignment of the others onto it. The survivor ends up as
//! the account's only primary worker. The batch is not atomic: a failure on
//! one step is logged and recorded in the outcome, and the run continues.

use std::cmp::Ordering;

use database::Worker;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::store::WorkerStore;

/// A worker considered for merging, with its assignment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub worker: Worker,
    pub assignment_count: i64,
}

/// Result of a de-duplication run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupOutcome {
    /// False only when no worker matched the name.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Duplicates deleted.
    pub merged: usize,
    /// Assignments re-pointed to the survivor.
    pub assignments_moved: u64,
    /// Duplicates that could not be merged.
    pub failures: Vec<String>,
    pub survivor: Option<Worker>,
}

/// Survivor priority: primary first, then most assignments, then oldest.
fn survivor_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.worker
        .is_primary
        .cmp(&a.worker.is_primary)
        .then_with(|| b.assignment_count.cmp(&a.assignment_count))
        .then_with(|| a.worker.created_at.cmp(&b.worker.created_at))
}

/// Index of the candidate that should survive a merge.
pub fn select_survivor(candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| survivor_order(a, b))
        .map(|(i, _)| i)
}

/// Merge all workers of `account_id` named `name` into one.
///
/// Running this twice is safe: the second run finds a single worker and
/// reports that there is nothing to merge.
pub async fn dedupe_workers<S>(store: &S, account_id: &str, name: &str) -> Result<DedupOutcome>
where
    S: WorkerStore + ?Sized,
{
    let workers = store.find_workers_by_name(account_id, name).await?;

    match workers.len() {
        0 => {
            info!(name = %name, "No worker found to de-duplicate");
            return Ok(DedupOutcome {
                success: false,
                message: format!("No worker named \"{}\" found", name.trim()),
                merged: 0,
                assignments_moved: 0,
                failures: Vec::new(),
                survivor: None,
            });
        }
        1 => {
            let keeper = workers.into_iter().next();
            info!(name = %name, "No duplicates found");
            return Ok(DedupOutcome {
                success: true,
                message: format!("No duplicates for \"{}\"; this worker is the keeper", name.trim()),
                merged: 0,
                assignments_moved: 0,
                failures: Vec::new(),
                survivor: keeper,
            });
        }
        _ => {}
    }

    let mut candidates = Vec::with_capacity(workers.len());
    for worker in workers {
        let assignment_count = store.count_assignments(&worker.id).await?;
        candidates.push(Candidate {
            worker,
            assignment_count,
        });
    }

    // Non-empty, checked above.
    let survivor_idx = select_survivor(&candidates).unwrap_or(0);
    let survivor = candidates.swap_remove(survivor_idx);

    info!(
        survivor = %survivor.worker.id,
        primary = survivor.worker.is_primary,
        assignments = survivor.assignment_count,
        duplicates = candidates.len(),
        "Merging duplicate workers"
    );

    let mut merged = 0;
    let mut assignments_moved = 0;
    let mut failures = Vec::new();

    for loser in &candidates {
        let id = &loser.worker.id;

        if loser.assignment_count > 0 {
            match store.reassign_assignments(id, &survivor.worker.id).await {
                Ok(moved) => assignments_moved += moved,
                Err(err) => {
                    warn!(worker = %id, "Failed to reassign assignments: {}", err);
                    failures.push(format!("{}: {}", id, err));
                    continue;
                }
            }
        }

        match store.delete_worker(account_id, id).await {
            Ok(()) => merged += 1,
            Err(err) => {
                warn!(worker = %id, "Failed to delete duplicate worker: {}", err);
                failures.push(format!("{}: {}", id, err));
            }
        }
    }

    let survivor_id = survivor.worker.id.clone();
    let survivor = match store.set_primary(account_id, &survivor_id).await {
        Ok(updated) => updated,
        Err(err) => {
            warn!(worker = %survivor_id, "Failed to mark survivor primary: {}", err);
            failures.push(format!("{}: {}", survivor_id, err));
            match store.get_worker(account_id, &survivor_id).await {
                Ok(current) => current,
                Err(_) => survivor.worker,
            }
        }
    };

    let mut message = format!(
        "Merged {} duplicate(s) of \"{}\" into {}; moved {} assignment(s)",
        merged, survivor.name, survivor.id, assignments_moved
    );
    if !failures.is_empty() {
        message.push_str(&format!("; {} failed", failures.len()));
    }

    info!("{}", message);

    Ok(DedupOutcome {
        success: true,
        message,
        merged,
        assignments_moved,
        failures,
        survivor: Some(survivor),
    })
}
