//! Report CRUD operations.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, DatabaseError, Result};
use crate::models::{PaymentStatus, Report};

/// Denormalized rollup values written back onto a report row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportTotals {
    pub total_hours: f64,
    pub total_earned: f64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
}

/// Create an empty report for a client and date.
pub async fn create_report(
    pool: &SqlitePool,
    account_id: &str,
    client_id: &str,
    date: NaiveDate,
) -> Result<Report> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO reports (id, account_id, client_id, date)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(account_id)
    .bind(client_id)
    .bind(date)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "Report", &id))?;

    get_report(pool, account_id, &id).await
}

/// Get a report by ID.
pub async fn get_report(pool: &SqlitePool, account_id: &str, id: &str) -> Result<Report> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT id, account_id, client_id, date, total_hours, total_earned,
               paid_amount, remaining_amount, payment_status, created_at
        FROM reports
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Report",
        id: id.to_string(),
    })
}

/// Find the report for a client on a given date, if one exists.
pub async fn find_report(
    pool: &SqlitePool,
    account_id: &str,
    client_id: &str,
    date: NaiveDate,
) -> Result<Option<Report>> {
    let report = sqlx::query_as::<_, Report>(
        r#"
        SELECT id, account_id, client_id, date, total_hours, total_earned,
               paid_amount, remaining_amount, payment_status, created_at
        FROM reports
        WHERE account_id = ? AND client_id = ? AND date = ?
        ORDER BY created_at
        LIMIT 1
        "#,
    )
    .bind(account_id)
    .bind(client_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(report)
}

/// List all reports for an account, newest first.
pub async fn list_reports(pool: &SqlitePool, account_id: &str) -> Result<Vec<Report>> {
    let reports = sqlx::query_as::<_, Report>(
        r#"
        SELECT id, account_id, client_id, date, total_hours, total_earned,
               paid_amount, remaining_amount, payment_status, created_at
        FROM reports
        WHERE account_id = ?
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(reports)
}

/// List reports for one client, newest first.
pub async fn list_reports_for_client(
    pool: &SqlitePool,
    account_id: &str,
    client_id: &str,
) -> Result<Vec<Report>> {
    let reports = sqlx::query_as::<_, Report>(
        r#"
        SELECT id, account_id, client_id, date, total_hours, total_earned,
               paid_amount, remaining_amount, payment_status, created_at
        FROM reports
        WHERE account_id = ? AND client_id = ?
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(account_id)
    .bind(client_id)
    .fetch_all(pool)
    .await?;

    Ok(reports)
}

/// Overwrite a report's rollup fields.
pub async fn update_report_totals(pool: &SqlitePool, id: &str, totals: &ReportTotals) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE reports
        SET total_hours = ?, total_earned = ?, paid_amount = ?,
            remaining_amount = ?, payment_status = ?
        WHERE id = ?
        "#,
    )
    .bind(totals.total_hours)
    .bind(totals.total_earned)
    .bind(totals.paid_amount)
    .bind(totals.remaining_amount)
    .bind(totals.payment_status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Report",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Delete a report and, by cascade, its work days and assignments.
pub async fn delete_report(pool: &SqlitePool, account_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM reports
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Report",
            id: id.to_string(),
        });
    }

    Ok(())
}
