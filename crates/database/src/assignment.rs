//! Work day assignment storage.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, Result};
use crate::models::WorkDayAssignment;
use crate::validation::validate_amount;

/// Attribute part of a work day to a worker.
pub async fn create_assignment(
    pool: &SqlitePool,
    work_day_id: &str,
    worker_id: &str,
    hours: f64,
    amount: f64,
) -> Result<WorkDayAssignment> {
    validate_amount("assignment hours", hours)?;
    validate_amount("assignment amount", amount)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO work_day_assignments (id, work_day_id, worker_id, hours, amount)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(work_day_id)
    .bind(worker_id)
    .bind(hours)
    .bind(amount)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "WorkDayAssignment", &id))?;

    let record = sqlx::query_as::<_, WorkDayAssignment>(
        r#"
        SELECT id, work_day_id, worker_id, deleted_worker_name, hours, amount, created_at
        FROM work_day_assignments
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// List assignments of one work day.
pub async fn list_assignments_for_work_day(
    pool: &SqlitePool,
    work_day_id: &str,
) -> Result<Vec<WorkDayAssignment>> {
    let rows = sqlx::query_as::<_, WorkDayAssignment>(
        r#"
        SELECT id, work_day_id, worker_id, deleted_worker_name, hours, amount, created_at
        FROM work_day_assignments
        WHERE work_day_id = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(work_day_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List every assignment belonging to an account.
pub async fn list_assignments_for_account(
    pool: &SqlitePool,
    account_id: &str,
) -> Result<Vec<WorkDayAssignment>> {
    let rows = sqlx::query_as::<_, WorkDayAssignment>(
        r#"
        SELECT a.id, a.work_day_id, a.worker_id, a.deleted_worker_name, a.hours,
               a.amount, a.created_at
        FROM work_day_assignments a
        JOIN work_days wd ON wd.id = a.work_day_id
        JOIN reports r ON r.id = wd.report_id
        WHERE r.account_id = ?
        ORDER BY a.created_at, a.id
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Re-point every assignment of `from_worker_id` to `to_worker_id`.
///
/// Returns the number of assignments moved.
pub async fn reassign_worker(
    pool: &SqlitePool,
    from_worker_id: &str,
    to_worker_id: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE work_day_assignments
        SET worker_id = ?
        WHERE worker_id = ?
        "#,
    )
    .bind(to_worker_id)
    .bind(from_worker_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use crate::work_day::{create_work_day, NewWorkDay};
    use crate::{account, client, report, worker, Database};
    use chrono::NaiveDate;

    struct Fixture {
        db: Database,
        account_id: String,
        work_day_id: String,
    }

    async fn setup() -> Fixture {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let account = account::create_account(db.pool(), "Test", "token").await.unwrap();
        let client = client::create_client(db.pool(), &account.id, "Client", 20.0)
            .await
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let report = report::create_report(db.pool(), &account.id, &client.id, date)
            .await
            .unwrap();
        let day = create_work_day(
            db.pool(),
            &report.id,
            &NewWorkDay {
                date,
                hours: 5.0,
                amount: 100.0,
                payment_status: PaymentStatus::Unpaid,
                paid_amount: None,
                note: None,
                is_planned: false,
            },
        )
        .await
        .unwrap();

        Fixture {
            db,
            account_id: account.id,
            work_day_id: day.id,
        }
    }

    #[tokio::test]
    async fn test_reassign_worker() {
        let f = setup().await;
        let pool = f.db.pool();

        let a = worker::create_worker(pool, &f.account_id, "A", None, false).await.unwrap();
        let b = worker::create_worker(pool, &f.account_id, "B", None, false).await.unwrap();

        create_assignment(pool, &f.work_day_id, &a.id, 3.0, 60.0).await.unwrap();
        create_assignment(pool, &f.work_day_id, &a.id, 2.0, 40.0).await.unwrap();

        let moved = reassign_worker(pool, &a.id, &b.id).await.unwrap();
        assert_eq!(moved, 2);
        assert_eq!(worker::count_assignments(pool, &a.id).await.unwrap(), 0);
        assert_eq!(worker::count_assignments(pool, &b.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deleting_worker_orphans_assignments() {
        let f = setup().await;
        let pool = f.db.pool();

        let a = worker::create_worker(pool, &f.account_id, "Mirela", None, false)
            .await
            .unwrap();
        create_assignment(pool, &f.work_day_id, &a.id, 5.0, 100.0).await.unwrap();

        worker::delete_worker(pool, &f.account_id, &a.id).await.unwrap();

        let rows = list_assignments_for_work_day(pool, &f.work_day_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].worker_id.is_none());
        assert_eq!(rows[0].deleted_worker_name.as_deref(), Some("Mirela"));

        let all = list_assignments_for_account(pool, &f.account_id).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
