//! Work day CRUD operations.
//!
//! Work days are reached through their report, so account scoping goes
//! through `reports.account_id`.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, DatabaseError, Result};
use crate::models::{PaymentStatus, WorkDay};
use crate::validation::{validate_amount, validate_note};

/// Fields for a new work day.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkDay {
    pub date: NaiveDate,
    pub hours: f64,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub paid_amount: Option<f64>,
    pub note: Option<String>,
    pub is_planned: bool,
}

/// Create a work day under a report.
pub async fn create_work_day(pool: &SqlitePool, report_id: &str, day: &NewWorkDay) -> Result<WorkDay> {
    validate_amount("hours", day.hours)?;
    validate_amount("amount", day.amount)?;
    if let Some(paid) = day.paid_amount {
        validate_amount("paid amount", paid)?;
    }
    if let Some(note) = &day.note {
        validate_note(note)?;
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO work_days (id, report_id, date, hours, amount, payment_status,
                               paid_amount, note, is_planned)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(report_id)
    .bind(day.date)
    .bind(day.hours)
    .bind(day.amount)
    .bind(day.payment_status)
    .bind(day.paid_amount)
    .bind(day.note.as_deref())
    .bind(day.is_planned)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "WorkDay", &id))?;

    fetch_work_day(pool, &id).await
}

async fn fetch_work_day(pool: &SqlitePool, id: &str) -> Result<WorkDay> {
    sqlx::query_as::<_, WorkDay>(
        r#"
        SELECT id, report_id, date, hours, amount, payment_status, paid_amount,
               note, is_planned, created_at
        FROM work_days
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "WorkDay",
        id: id.to_string(),
    })
}

/// Get a work day by ID.
pub async fn get_work_day(pool: &SqlitePool, account_id: &str, id: &str) -> Result<WorkDay> {
    sqlx::query_as::<_, WorkDay>(
        r#"
        SELECT wd.id, wd.report_id, wd.date, wd.hours, wd.amount, wd.payment_status,
               wd.paid_amount, wd.note, wd.is_planned, wd.created_at
        FROM work_days wd
        JOIN reports r ON r.id = wd.report_id
        WHERE wd.id = ? AND r.account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "WorkDay",
        id: id.to_string(),
    })
}

/// List work days of one report in date order.
pub async fn list_work_days_for_report(pool: &SqlitePool, report_id: &str) -> Result<Vec<WorkDay>> {
    let days = sqlx::query_as::<_, WorkDay>(
        r#"
        SELECT id, report_id, date, hours, amount, payment_status, paid_amount,
               note, is_planned, created_at
        FROM work_days
        WHERE report_id = ?
        ORDER BY date, created_at
        "#,
    )
    .bind(report_id)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

/// List every work day belonging to an account.
pub async fn list_work_days_for_account(pool: &SqlitePool, account_id: &str) -> Result<Vec<WorkDay>> {
    let days = sqlx::query_as::<_, WorkDay>(
        r#"
        SELECT wd.id, wd.report_id, wd.date, wd.hours, wd.amount, wd.payment_status,
               wd.paid_amount, wd.note, wd.is_planned, wd.created_at
        FROM work_days wd
        JOIN reports r ON r.id = wd.report_id
        WHERE r.account_id = ?
        ORDER BY wd.date, wd.created_at
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

fn check_updated(rows_affected: u64, id: &str) -> Result<()> {
    if rows_affected == 0 {
        return Err(DatabaseError::NotFound {
            entity: "WorkDay",
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Set a work day's payment status and paid amount.
pub async fn update_payment_status(
    pool: &SqlitePool,
    account_id: &str,
    id: &str,
    status: PaymentStatus,
    paid_amount: Option<f64>,
) -> Result<WorkDay> {
    if let Some(paid) = paid_amount {
        validate_amount("paid amount", paid)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE work_days
        SET payment_status = ?, paid_amount = ?
        WHERE id = ? AND report_id IN (SELECT id FROM reports WHERE account_id = ?)
        "#,
    )
    .bind(status)
    .bind(paid_amount)
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    check_updated(result.rows_affected(), id)?;
    fetch_work_day(pool, id).await
}

/// Replace a work day's note. An empty note clears it.
pub async fn update_note(
    pool: &SqlitePool,
    account_id: &str,
    id: &str,
    note: Option<&str>,
) -> Result<WorkDay> {
    let note = note.map(str::trim).filter(|n| !n.is_empty());
    if let Some(note) = note {
        validate_note(note)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE work_days
        SET note = ?
        WHERE id = ? AND report_id IN (SELECT id FROM reports WHERE account_id = ?)
        "#,
    )
    .bind(note)
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    check_updated(result.rows_affected(), id)?;
    fetch_work_day(pool, id).await
}

/// Move a work day to another date and report.
///
/// Both the work day and the target report must belong to the account.
pub async fn move_work_day(
    pool: &SqlitePool,
    account_id: &str,
    id: &str,
    report_id: &str,
    date: NaiveDate,
) -> Result<WorkDay> {
    let result = sqlx::query(
        r#"
        UPDATE work_days
        SET date = ?, report_id = ?
        WHERE id = ?
          AND report_id IN (SELECT id FROM reports WHERE account_id = ?)
          AND EXISTS (SELECT 1 FROM reports WHERE id = ? AND account_id = ?)
        "#,
    )
    .bind(date)
    .bind(report_id)
    .bind(id)
    .bind(account_id)
    .bind(report_id)
    .bind(account_id)
    .execute(pool)
    .await?;

    check_updated(result.rows_affected(), id)?;
    fetch_work_day(pool, id).await
}

/// Delete a work day and its assignments.
pub async fn delete_work_day(pool: &SqlitePool, account_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM work_days
        WHERE id = ? AND report_id IN (SELECT id FROM reports WHERE account_id = ?)
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    check_updated(result.rows_affected(), id)
}
