//! Dashboard routes.

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use ledger_core::hours::format_hours;
use ledger_core::{dashboard_stats, AppContext, DashboardStats, PaymentSummary, WorkerFilter};
use serde::Deserialize;

use crate::auth::AuthAccount;
use crate::error::Result;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub account_name: String,
    pub token: String,
    pub selected: String,
    pub totals: SummaryRow,
    pub client_count: usize,
    pub report_count: usize,
    pub clients: Vec<SummaryRow>,
    pub workers: Vec<WorkerRow>,
}

/// A formatted row of totals.
pub struct SummaryRow {
    pub label: String,
    pub hours: String,
    pub earned: String,
    pub paid: String,
    pub remaining: String,
    pub status: String,
}

impl SummaryRow {
    fn new(label: &str, summary: &PaymentSummary) -> Self {
        Self {
            label: label.to_string(),
            hours: format_hours(summary.total_hours),
            earned: format!("{:.2}", summary.total_earned),
            paid: format!("{:.2}", summary.total_paid),
            remaining: format!("{:.2}", summary.total_remaining),
            status: summary.status.to_string(),
        }
    }
}

/// A worker entry for the filter list and the per-worker table.
pub struct WorkerRow {
    pub id: String,
    pub color: String,
    pub row: SummaryRow,
}

/// Stats query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    /// Worker ID or `all`. Omitted means the stored selection.
    pub worker: Option<String>,
}

/// Resolve the worker filter from the query, falling back to the stored selection.
///
/// With `remember` set, an explicit choice is saved as the new selection.
async fn resolve_filter(
    state: &AppState,
    account_id: &str,
    query: &StatsQuery,
    remember: bool,
) -> Result<WorkerFilter> {
    let mut ctx = AppContext::load(&state.db, account_id).await?;

    let Some(worker) = &query.worker else {
        return Ok(ctx.selected_worker);
    };

    let filter = WorkerFilter::parse(worker);
    if remember {
        ctx.selected_worker = filter.clone();
        if let Some(id) = filter.worker_id() {
            ctx.remember_worker(id);
        }
        ctx.save(&state.db).await?;
    }

    Ok(filter)
}

/// Render the dashboard page.
///
/// The page's worker picker submits here, so a `worker` parameter updates
/// the stored selection.
pub async fn dashboard_page(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<StatsQuery>,
) -> Result<DashboardTemplate> {
    let filter = resolve_filter(&state, &account.id, &query, true).await?;
    let stats = dashboard_stats(&state.db, &account.id, &filter).await?;

    Ok(DashboardTemplate {
        account_name: account.name,
        token: account.api_token,
        selected: filter.to_string(),
        totals: SummaryRow::new("Total", &stats.summary),
        client_count: stats.client_count,
        report_count: stats.report_count,
        clients: stats
            .clients
            .iter()
            .map(|c| SummaryRow::new(&c.name, &c.summary))
            .collect(),
        workers: stats
            .workers
            .iter()
            .map(|w| WorkerRow {
                id: w.worker_id.clone(),
                color: w.color.clone(),
                row: SummaryRow::new(&w.name, &w.summary),
            })
            .collect(),
    })
}

/// Get dashboard statistics as JSON. Does not change the stored selection.
pub async fn stats_api(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DashboardStats>> {
    let filter = resolve_filter(&state, &account.id, &query, false).await?;
    let stats = dashboard_stats(&state.db, &account.id, &filter).await?;
    Ok(Json(stats))
}
