//! Worker routes, including duplicate merging.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{worker, Worker};
use ledger_core::{dedupe_workers, AppContext, DedupOutcome};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthAccount;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// A worker with its assignment count.
#[derive(Serialize)]
pub struct WorkerInfo {
    #[serde(flatten)]
    pub worker: Worker,
    pub assignment_count: i64,
}

/// Request body for creating a worker.
#[derive(Deserialize)]
pub struct CreateWorkerRequest {
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Request body for merging duplicates.
#[derive(Deserialize)]
pub struct DedupeRequest {
    pub name: String,
}

/// List the account's workers with assignment counts.
pub async fn list_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Result<Json<Vec<WorkerInfo>>> {
    let pool = state.db.pool();
    let workers = worker::list_workers(pool, &account.id).await?;

    let mut infos = Vec::with_capacity(workers.len());
    for w in workers {
        let assignment_count = worker::count_assignments(pool, &w.id).await?;
        infos.push(WorkerInfo {
            worker: w,
            assignment_count,
        });
    }

    Ok(Json(infos))
}

/// Create a worker.
pub async fn create_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(req): Json<CreateWorkerRequest>,
) -> Result<(StatusCode, Json<Worker>)> {
    let created = worker::create_worker(
        state.db.pool(),
        &account.id,
        &req.name,
        req.color.as_deref(),
        req.is_primary,
    )
    .await?;
    info!(worker = %created.id, "Created worker");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a worker. Past assignments are kept with the worker's name.
pub async fn delete_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    worker::delete_worker(state.db.pool(), &account.id, &id).await?;

    let mut ctx = AppContext::load(&state.db, &account.id).await?;
    ctx.forget_worker(&id);
    ctx.save(&state.db).await?;

    info!(worker = %id, "Deleted worker");
    Ok(StatusCode::NO_CONTENT)
}

/// Merge all workers sharing a name into one.
pub async fn dedupe_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(req): Json<DedupeRequest>,
) -> Result<Json<DedupOutcome>> {
    if req.name.trim().is_empty() {
        return Err(WebError::BadRequest("name is required".to_string()));
    }

    let outcome = dedupe_workers(&state.db, &account.id, &req.name).await?;

    if let Some(survivor) = &outcome.survivor {
        let mut ctx = AppContext::load(&state.db, &account.id).await?;
        let stale: Vec<String> = ctx
            .recent_workers
            .iter()
            .filter(|id| *id != &survivor.id)
            .cloned()
            .collect();
        for id in stale {
            if worker::get_worker(state.db.pool(), &account.id, &id).await.is_err() {
                ctx.forget_worker(&id);
            }
        }
        ctx.save(&state.db).await?;
    }

    Ok(Json(outcome))
}
