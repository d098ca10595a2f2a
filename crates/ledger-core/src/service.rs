//! Work entry logging, rollup maintenance, and dashboard statistics.

use std::collections::HashMap;

use chrono::NaiveDate;
use database::work_day::NewWorkDay;
use database::{
    assignment, client, report, work_day, worker, Database, PaymentStatus, Report, WorkDay,
    WorkDayAssignment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{day_records, sanitize, summarize, PaymentSummary, WorkerFilter};
use crate::error::{LedgerError, Result};
use crate::hours::{amount_from_hours, hours_from_amount, round_to_minutes};
use crate::split::{even_split, validate_split};

/// One worker's part of a new work entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerShare {
    pub worker_id: String,
    /// Amount for this worker; when every share omits it the total is split evenly.
    #[serde(default)]
    pub amount: Option<f64>,
}

/// A work entry as submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkEntry {
    pub client_id: String,
    pub date: NaiveDate,
    /// Hours worked. Takes precedence over back-solving from `amount`.
    #[serde(default)]
    pub hours: Option<f64>,
    /// Amount earned. Derived from hours and the client rate when omitted.
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_planned: bool,
    #[serde(default)]
    pub shares: Vec<WorkerShare>,
}

/// Everything created by [`log_work_entry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEntry {
    pub report: Report,
    pub work_day: WorkDay,
    pub assignments: Vec<WorkDayAssignment>,
}

/// Check that a payment status and paid amount are consistent with `amount`.
///
/// Returns the paid amount to store: only `partial` keeps one.
pub fn check_payment(status: PaymentStatus, paid_amount: Option<f64>, amount: f64) -> Result<Option<f64>> {
    match status {
        PaymentStatus::Paid | PaymentStatus::Unpaid => Ok(None),
        PaymentStatus::Partial => {
            let paid = paid_amount.ok_or_else(|| {
                LedgerError::Validation("partial payment requires a paid amount".to_string())
            })?;
            if !paid.is_finite() || paid <= 0.0 {
                return Err(LedgerError::Validation(
                    "partial paid amount must be greater than zero".to_string(),
                ));
            }
            if paid >= amount {
                return Err(LedgerError::Validation(format!(
                    "partial paid amount {:.2} must be less than the total {:.2}",
                    paid, amount
                )));
            }
            Ok(Some(paid))
        }
    }
}

/// Resolve `(hours, amount)` for an entry at the client's rate.
fn resolve_hours_and_amount(entry: &NewWorkEntry, rate: f64) -> Result<(f64, f64)> {
    match (entry.hours, entry.amount) {
        (Some(hours), Some(amount)) => Ok((round_to_minutes(hours), sanitize(amount))),
        (Some(hours), None) => {
            let hours = round_to_minutes(hours);
            Ok((hours, amount_from_hours(hours, rate)))
        }
        (None, Some(amount)) => Ok((hours_from_amount(amount, rate), sanitize(amount))),
        (None, None) if entry.is_planned => Ok((0.0, 0.0)),
        (None, None) => Err(LedgerError::Validation(
            "either hours or amount is required".to_string(),
        )),
    }
}

/// Resolve per-worker amounts, splitting evenly when none are given.
fn resolve_share_amounts(shares: &[WorkerShare], total: f64) -> Result<Vec<f64>> {
    if shares.iter().all(|s| s.amount.is_none()) {
        return Ok(even_split(total, shares.len()));
    }

    let amounts: Vec<f64> = shares
        .iter()
        .map(|s| {
            s.amount.ok_or_else(|| {
                LedgerError::Validation(format!("missing amount for worker {}", s.worker_id))
            })
        })
        .collect::<Result<_>>()?;

    validate_split(total, &amounts)?;
    Ok(amounts)
}

/// Log a work entry: report (reused per client and date), work day, and assignments.
pub async fn log_work_entry(db: &Database, account_id: &str, entry: &NewWorkEntry) -> Result<LoggedEntry> {
    let pool = db.pool();
    let client = client::get_client(pool, account_id, &entry.client_id).await?;

    let (hours, amount) = resolve_hours_and_amount(entry, client.hourly_rate)?;
    let paid_amount = check_payment(entry.payment_status, entry.paid_amount, amount)?;
    let share_amounts = resolve_share_amounts(&entry.shares, amount)?;

    for share in &entry.shares {
        worker::get_worker(pool, account_id, &share.worker_id).await?;
    }

    let report = match report::find_report(pool, account_id, &client.id, entry.date).await? {
        Some(existing) => existing,
        None => report::create_report(pool, account_id, &client.id, entry.date).await?,
    };

    let day = work_day::create_work_day(
        pool,
        &report.id,
        &NewWorkDay {
            date: entry.date,
            hours,
            amount,
            payment_status: entry.payment_status,
            paid_amount,
            note: entry.note.clone().filter(|n| !n.trim().is_empty()),
            is_planned: entry.is_planned,
        },
    )
    .await?;

    let mut assignments = Vec::with_capacity(entry.shares.len());
    let worker_count = entry.shares.len() as f64;
    for (share, share_amount) in entry.shares.iter().zip(share_amounts) {
        let share_hours = if amount > 0.0 {
            round_to_minutes(hours * share_amount / amount)
        } else {
            round_to_minutes(hours / worker_count)
        };
        let row =
            assignment::create_assignment(pool, &day.id, &share.worker_id, share_hours, share_amount)
                .await?;
        assignments.push(row);
    }

    let report = refresh_report_totals(db, account_id, &report.id).await?;

    info!(
        report = %report.id,
        work_day = %day.id,
        amount,
        hours,
        workers = assignments.len(),
        "Logged work entry"
    );

    Ok(LoggedEntry {
        report,
        work_day: day,
        assignments,
    })
}

/// Recompute a report's rollup fields from its work days and persist them.
pub async fn refresh_report_totals(db: &Database, account_id: &str, report_id: &str) -> Result<Report> {
    let pool = db.pool();
    let days = work_day::list_work_days_for_report(pool, report_id).await?;
    let summary = summarize(&day_records(&days, &[]), &WorkerFilter::All);

    report::update_report_totals(pool, report_id, &summary.to_report_totals()).await?;
    debug!(report = %report_id, status = %summary.status, "Refreshed report totals");

    Ok(report::get_report(pool, account_id, report_id).await?)
}

/// Change a work day's payment status and refresh its report.
pub async fn set_work_day_status(
    db: &Database,
    account_id: &str,
    work_day_id: &str,
    status: PaymentStatus,
    paid_amount: Option<f64>,
) -> Result<WorkDay> {
    let pool = db.pool();
    let day = work_day::get_work_day(pool, account_id, work_day_id).await?;
    let paid_amount = check_payment(status, paid_amount, day.amount)?;

    let day = work_day::update_payment_status(pool, account_id, work_day_id, status, paid_amount).await?;
    refresh_report_totals(db, account_id, &day.report_id).await?;

    info!(work_day = %work_day_id, status = %status, "Updated payment status");
    Ok(day)
}

/// Move a work day to another date.
///
/// The day is re-filed under the report for its client on the new date,
/// created if needed, and both reports are refreshed.
pub async fn change_work_day_date(
    db: &Database,
    account_id: &str,
    work_day_id: &str,
    date: NaiveDate,
) -> Result<WorkDay> {
    let pool = db.pool();
    let day = work_day::get_work_day(pool, account_id, work_day_id).await?;
    let source = report::get_report(pool, account_id, &day.report_id).await?;

    let target = match report::find_report(pool, account_id, &source.client_id, date).await? {
        Some(existing) => existing,
        None => report::create_report(pool, account_id, &source.client_id, date).await?,
    };

    let day = work_day::move_work_day(pool, account_id, work_day_id, &target.id, date).await?;

    refresh_report_totals(db, account_id, &source.id).await?;
    if target.id != source.id {
        refresh_report_totals(db, account_id, &target.id).await?;
    }

    info!(work_day = %work_day_id, from = %source.id, to = %target.id, "Moved work day");
    Ok(day)
}

/// Delete a work day and refresh its report.
pub async fn remove_work_day(db: &Database, account_id: &str, work_day_id: &str) -> Result<()> {
    let pool = db.pool();
    let day = work_day::get_work_day(pool, account_id, work_day_id).await?;
    work_day::delete_work_day(pool, account_id, work_day_id).await?;
    refresh_report_totals(db, account_id, &day.report_id).await?;
    Ok(())
}

/// Totals for one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientStats {
    pub client_id: String,
    pub name: String,
    pub hourly_rate: f64,
    pub summary: PaymentSummary,
}

/// Totals for one worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerStats {
    pub worker_id: String,
    pub name: String,
    pub color: String,
    pub summary: PaymentSummary,
}

/// Dashboard aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub filter: WorkerFilter,
    pub summary: PaymentSummary,
    pub client_count: usize,
    pub worker_count: usize,
    pub report_count: usize,
    pub clients: Vec<ClientStats>,
    pub workers: Vec<WorkerStats>,
}

/// Compute dashboard statistics for an account.
///
/// Totals are recomputed from work days; stored report rollups are not read.
pub async fn dashboard_stats(db: &Database, account_id: &str, filter: &WorkerFilter) -> Result<DashboardStats> {
    let pool = db.pool();

    let clients = client::list_clients(pool, account_id).await?;
    let workers = worker::list_workers(pool, account_id).await?;
    let reports = report::list_reports(pool, account_id).await?;
    let days = work_day::list_work_days_for_account(pool, account_id).await?;
    let assignments = assignment::list_assignments_for_account(pool, account_id).await?;

    let records = day_records(&days, &assignments);
    let summary = summarize(&records, filter);

    let client_of_report: HashMap<&str, &str> = reports
        .iter()
        .map(|r| (r.id.as_str(), r.client_id.as_str()))
        .collect();

    let mut by_client: HashMap<&str, Vec<_>> = HashMap::new();
    for (day, record) in days.iter().zip(records.iter()) {
        if let Some(client_id) = client_of_report.get(day.report_id.as_str()) {
            by_client.entry(*client_id).or_default().push(record.clone());
        }
    }

    let client_stats = clients
        .iter()
        .map(|c| ClientStats {
            client_id: c.id.clone(),
            name: c.name.clone(),
            hourly_rate: c.hourly_rate,
            summary: summarize(
                by_client.get(c.id.as_str()).map(Vec::as_slice).unwrap_or(&[]),
                filter,
            ),
        })
        .collect();

    let worker_stats = workers
        .iter()
        .map(|w| WorkerStats {
            worker_id: w.id.clone(),
            name: w.name.clone(),
            color: w.color.clone(),
            summary: summarize(&records, &WorkerFilter::Worker(w.id.clone())),
        })
        .collect();

    Ok(DashboardStats {
        filter: filter.clone(),
        summary,
        client_count: clients.len(),
        worker_count: workers.len(),
        report_count: reports.len(),
        clients: client_stats,
        workers: worker_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::account;

    struct Fixture {
        db: Database,
        account_id: String,
        client_id: String,
    }

    async fn setup(rate: f64) -> Fixture {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let acct = account::create_account(db.pool(), "Test", "token").await.unwrap();
        let c = client::create_client(db.pool(), &acct.id, "Novak", rate).await.unwrap();
        Fixture {
            db,
            account_id: acct.id,
            client_id: c.id,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
    }

    fn entry(client_id: &str) -> NewWorkEntry {
        NewWorkEntry {
            client_id: client_id.to_string(),
            date: date(),
            hours: None,
            amount: None,
            payment_status: PaymentStatus::Unpaid,
            paid_amount: None,
            note: None,
            is_planned: false,
            shares: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_amount_back_solves_hours() {
        let f = setup(20.0).await;

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                amount: Some(50.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        assert_eq!(logged.work_day.hours, 2.5);
        assert_eq!(logged.work_day.amount, 50.0);
        assert_eq!(logged.report.total_hours, 2.5);
        assert_eq!(logged.report.remaining_amount, 50.0);
        assert_eq!(logged.report.payment_status, PaymentStatus::Unpaid);
    }

    #[tokio::test]
    async fn test_hours_derive_amount_and_report_is_reused() {
        let f = setup(20.0).await;

        let first = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                hours: Some(3.0),
                payment_status: PaymentStatus::Paid,
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();
        assert_eq!(first.work_day.amount, 60.0);

        let second = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                hours: Some(2.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        assert_eq!(first.report.id, second.report.id);
        assert_eq!(second.report.total_earned, 100.0);
        assert_eq!(second.report.paid_amount, 60.0);
        assert_eq!(second.report.payment_status, PaymentStatus::Partial);
    }

    #[tokio::test]
    async fn test_split_must_sum_to_total() {
        let f = setup(20.0).await;
        let a = worker::create_worker(f.db.pool(), &f.account_id, "A", None, true).await.unwrap();
        let b = worker::create_worker(f.db.pool(), &f.account_id, "B", None, false).await.unwrap();

        let bad = NewWorkEntry {
            amount: Some(100.0),
            shares: vec![
                WorkerShare { worker_id: a.id.clone(), amount: Some(60.0) },
                WorkerShare { worker_id: b.id.clone(), amount: Some(30.0) },
            ],
            ..entry(&f.client_id)
        };
        let result = log_work_entry(&f.db, &f.account_id, &bad).await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));

        // Nothing was written
        assert!(report::list_reports(f.db.pool(), &f.account_id).await.unwrap().is_empty());

        let good = NewWorkEntry {
            amount: Some(100.0),
            shares: vec![
                WorkerShare { worker_id: a.id.clone(), amount: Some(60.0) },
                WorkerShare { worker_id: b.id.clone(), amount: Some(40.0) },
            ],
            ..entry(&f.client_id)
        };
        let logged = log_work_entry(&f.db, &f.account_id, &good).await.unwrap();
        assert_eq!(logged.assignments.len(), 2);
        assert_eq!(logged.assignments[0].hours, 3.0);
        assert_eq!(logged.assignments[1].hours, 2.0);
    }

    #[tokio::test]
    async fn test_even_split_when_amounts_omitted() {
        let f = setup(30.0).await;
        let a = worker::create_worker(f.db.pool(), &f.account_id, "A", None, true).await.unwrap();
        let b = worker::create_worker(f.db.pool(), &f.account_id, "B", None, false).await.unwrap();

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                hours: Some(4.0),
                shares: vec![
                    WorkerShare { worker_id: a.id, amount: None },
                    WorkerShare { worker_id: b.id, amount: None },
                ],
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        let amounts: Vec<f64> = logged.assignments.iter().map(|a| a.amount).collect();
        assert_eq!(amounts, vec![60.0, 60.0]);
    }

    #[tokio::test]
    async fn test_partial_status_validation_and_prorated_stats() {
        let f = setup(20.0).await;
        let a = worker::create_worker(f.db.pool(), &f.account_id, "A", None, true).await.unwrap();
        let b = worker::create_worker(f.db.pool(), &f.account_id, "B", None, false).await.unwrap();

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                amount: Some(100.0),
                shares: vec![
                    WorkerShare { worker_id: a.id.clone(), amount: Some(60.0) },
                    WorkerShare { worker_id: b.id.clone(), amount: Some(40.0) },
                ],
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        // Partial without an amount is rejected
        let result = set_work_day_status(
            &f.db,
            &f.account_id,
            &logged.work_day.id,
            PaymentStatus::Partial,
            None,
        )
        .await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));

        set_work_day_status(
            &f.db,
            &f.account_id,
            &logged.work_day.id,
            PaymentStatus::Partial,
            Some(50.0),
        )
        .await
        .unwrap();

        let report = report::get_report(f.db.pool(), &f.account_id, &logged.report.id)
            .await
            .unwrap();
        assert_eq!(report.payment_status, PaymentStatus::Partial);
        assert_eq!(report.remaining_amount, 50.0);

        let stats_a = dashboard_stats(&f.db, &f.account_id, &WorkerFilter::Worker(a.id.clone()))
            .await
            .unwrap();
        assert!((stats_a.summary.total_remaining - 30.0).abs() < 1e-9);

        let stats = dashboard_stats(&f.db, &f.account_id, &WorkerFilter::All).await.unwrap();
        assert_eq!(stats.client_count, 1);
        assert_eq!(stats.worker_count, 2);
        assert_eq!(stats.report_count, 1);
        assert!((stats.summary.total_remaining - 50.0).abs() < 1e-9);

        let b_stats = stats.workers.iter().find(|w| w.worker_id == b.id).unwrap();
        assert!((b_stats.summary.total_remaining - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_planned_entry_without_hours() {
        let f = setup(20.0).await;

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                is_planned: true,
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();
        assert!(logged.work_day.is_planned);
        assert_eq!(logged.report.total_earned, 0.0);
        assert_eq!(logged.report.payment_status, PaymentStatus::Unpaid);

        let result = log_work_entry(&f.db, &f.account_id, &entry(&f.client_id)).await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_remove_work_day_refreshes_report() {
        let f = setup(20.0).await;

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                hours: Some(1.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        remove_work_day(&f.db, &f.account_id, &logged.work_day.id).await.unwrap();
        let report = report::get_report(f.db.pool(), &f.account_id, &logged.report.id)
            .await
            .unwrap();
        assert_eq!(report.total_earned, 0.0);
    }

    #[tokio::test]
    async fn test_date_change_refiles_work_day() {
        let f = setup(20.0).await;
        let next_day = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();

        let moved = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                amount: Some(40.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        let day = change_work_day_date(&f.db, &f.account_id, &moved.work_day.id, next_day)
            .await
            .unwrap();
        assert_eq!(day.date, next_day);
        assert_ne!(day.report_id, moved.report.id);

        let later = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                date: next_day,
                amount: Some(60.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        // Both days for the new date land in one report
        assert_eq!(later.report.id, day.report_id);
        assert_eq!(later.report.total_earned, 100.0);
        let days = work_day::list_work_days_for_report(f.db.pool(), &later.report.id)
            .await
            .unwrap();
        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|d| d.date == next_day));

        // The old report no longer carries the moved day
        let old = report::get_report(f.db.pool(), &f.account_id, &moved.report.id)
            .await
            .unwrap();
        assert_eq!(old.total_earned, 0.0);
        assert!(work_day::list_work_days_for_report(f.db.pool(), &old.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_date_change_to_same_date_keeps_report() {
        let f = setup(20.0).await;

        let logged = log_work_entry(
            &f.db,
            &f.account_id,
            &NewWorkEntry {
                amount: Some(40.0),
                ..entry(&f.client_id)
            },
        )
        .await
        .unwrap();

        let day = change_work_day_date(&f.db, &f.account_id, &logged.work_day.id, date())
            .await
            .unwrap();
        assert_eq!(day.report_id, logged.report.id);
        assert_eq!(report::list_reports(f.db.pool(), &f.account_id).await.unwrap().len(), 1);
    }
}
