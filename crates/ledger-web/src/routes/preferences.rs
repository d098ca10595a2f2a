//! UI preference routes.

use axum::extract::State;
use axum::Json;
use ledger_core::{AppContext, WorkerFilter};
use serde::{Deserialize, Serialize};

use crate::auth::AuthAccount;
use crate::error::Result;
use crate::state::AppState;

/// Stored UI preferences.
#[derive(Serialize)]
pub struct PreferencesView {
    pub selected_worker: String,
    pub recent_workers: Vec<String>,
}

impl From<AppContext> for PreferencesView {
    fn from(ctx: AppContext) -> Self {
        Self {
            selected_worker: ctx.selected_worker.to_string(),
            recent_workers: ctx.recent_workers.into_iter().collect(),
        }
    }
}

/// Update request; omitted fields are left unchanged.
#[derive(Deserialize)]
pub struct PreferencesUpdate {
    pub selected_worker: Option<String>,
    pub recent_workers: Option<Vec<String>>,
}

pub async fn get_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Result<Json<PreferencesView>> {
    let ctx = AppContext::load(&state.db, &account.id).await?;
    Ok(Json(ctx.into()))
}

pub async fn put_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<PreferencesView>> {
    let mut ctx = AppContext::load(&state.db, &account.id).await?;

    if let Some(selected) = update.selected_worker {
        ctx.selected_worker = WorkerFilter::parse(&selected);
    }
    if let Some(recent) = update.recent_workers {
        ctx.recent_workers.clear();
        for id in recent.iter().rev() {
            ctx.remember_worker(id);
        }
    }

    ctx.save(&state.db).await?;
    Ok(Json(ctx.into()))
}
