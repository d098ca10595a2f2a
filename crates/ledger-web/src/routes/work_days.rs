//! Work day mutation routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use database::{work_day, PaymentStatus, WorkDay};
use ledger_core::service::remove_work_day;
use ledger_core::{change_work_day_date, set_work_day_status};
use serde::Deserialize;

use crate::auth::AuthAccount;
use crate::error::Result;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatusRequest {
    pub payment_status: PaymentStatus,
    pub paid_amount: Option<f64>,
}

#[derive(Deserialize)]
pub struct NoteRequest {
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct DateRequest {
    pub date: NaiveDate,
}

/// Change payment status; the report rollup is recomputed.
pub async fn status_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<WorkDay>> {
    let day = set_work_day_status(&state.db, &account.id, &id, req.payment_status, req.paid_amount).await?;
    Ok(Json(day))
}

pub async fn note_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
    Json(req): Json<NoteRequest>,
) -> Result<Json<WorkDay>> {
    let day = work_day::update_note(state.db.pool(), &account.id, &id, req.note.as_deref()).await?;
    Ok(Json(day))
}

/// Move a work day to another date, re-filing it under that date's report.
pub async fn date_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
    Json(req): Json<DateRequest>,
) -> Result<Json<WorkDay>> {
    let day = change_work_day_date(&state.db, &account.id, &id, req.date).await?;
    Ok(Json(day))
}

pub async fn delete_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    remove_work_day(&state.db, &account.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
