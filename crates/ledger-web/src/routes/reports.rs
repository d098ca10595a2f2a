//! Report and work entry routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use database::{assignment, report, work_day, Report, WorkDay, WorkDayAssignment};
use ledger_core::{log_work_entry, AppContext, LoggedEntry, NewWorkEntry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthAccount;
use crate::error::Result;
use crate::state::AppState;

/// A work day with its assignments.
#[derive(Serialize)]
pub struct WorkDayView {
    #[serde(flatten)]
    pub day: WorkDay,
    pub assignments: Vec<WorkDayAssignment>,
}

/// A report with its work days.
#[derive(Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    pub work_days: Vec<WorkDayView>,
}

/// Report listing filter.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub client_id: Option<String>,
}

/// List reports with nested work days and assignments.
pub async fn list_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<ReportView>>> {
    let pool = state.db.pool();

    let reports = match &query.client_id {
        Some(client_id) => report::list_reports_for_client(pool, &account.id, client_id).await?,
        None => report::list_reports(pool, &account.id).await?,
    };

    let mut views = Vec::with_capacity(reports.len());
    for r in reports {
        let days = work_day::list_work_days_for_report(pool, &r.id).await?;
        let mut day_views = Vec::with_capacity(days.len());
        for day in days {
            let assignments = assignment::list_assignments_for_work_day(pool, &day.id).await?;
            day_views.push(WorkDayView { day, assignments });
        }
        views.push(ReportView {
            report: r,
            work_days: day_views,
        });
    }

    Ok(Json(views))
}

/// Log a work entry.
pub async fn create_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(entry): Json<NewWorkEntry>,
) -> Result<(StatusCode, Json<LoggedEntry>)> {
    let logged = log_work_entry(&state.db, &account.id, &entry).await?;

    if !entry.shares.is_empty() {
        let mut ctx = AppContext::load(&state.db, &account.id).await?;
        for share in entry.shares.iter().rev() {
            ctx.remember_worker(&share.worker_id);
        }
        ctx.save(&state.db).await?;
    }

    Ok((StatusCode::CREATED, Json(logged)))
}

/// Delete a report with its work days.
pub async fn delete_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    report::delete_report(state.db.pool(), &account.id, &id).await?;
    info!(report = %id, "Deleted report");
    Ok(StatusCode::NO_CONTENT)
}
