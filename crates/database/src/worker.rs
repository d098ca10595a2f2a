//! Worker CRUD operations.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, DatabaseError, Result};
use crate::models::Worker;
use crate::validation::{validate_color, validate_name};

/// Default color tag for new workers.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Create a new worker.
pub async fn create_worker(
    pool: &SqlitePool,
    account_id: &str,
    name: &str,
    color: Option<&str>,
    is_primary: bool,
) -> Result<Worker> {
    validate_name("worker name", name)?;
    let color = color.unwrap_or(DEFAULT_COLOR);
    validate_color(color)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO workers (id, account_id, name, color, is_primary)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(account_id)
    .bind(name.trim())
    .bind(color.trim())
    .bind(is_primary)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "Worker", &id))?;

    get_worker(pool, account_id, &id).await
}

/// Get a worker by ID.
pub async fn get_worker(pool: &SqlitePool, account_id: &str, id: &str) -> Result<Worker> {
    sqlx::query_as::<_, Worker>(
        r#"
        SELECT id, account_id, name, color, is_primary, created_at
        FROM workers
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Worker",
        id: id.to_string(),
    })
}

/// List all workers for an account, primary first.
pub async fn list_workers(pool: &SqlitePool, account_id: &str) -> Result<Vec<Worker>> {
    let workers = sqlx::query_as::<_, Worker>(
        r#"
        SELECT id, account_id, name, color, is_primary, created_at
        FROM workers
        WHERE account_id = ?
        ORDER BY is_primary DESC, name COLLATE NOCASE, created_at
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(workers)
}

/// Find workers whose name matches case-insensitively, oldest first.
///
/// Matching happens in Rust so that non-ASCII names fold the same way
/// regardless of how SQLite was built.
pub async fn find_workers_by_name(
    pool: &SqlitePool,
    account_id: &str,
    name: &str,
) -> Result<Vec<Worker>> {
    let needle = name.trim().to_lowercase();

    let workers = sqlx::query_as::<_, Worker>(
        r#"
        SELECT id, account_id, name, color, is_primary, created_at
        FROM workers
        WHERE account_id = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(workers
        .into_iter()
        .filter(|w| w.name.trim().to_lowercase() == needle)
        .collect())
}

/// Update a worker's name and color.
pub async fn update_worker(
    pool: &SqlitePool,
    account_id: &str,
    id: &str,
    name: &str,
    color: &str,
) -> Result<Worker> {
    validate_name("worker name", name)?;
    validate_color(color)?;

    let result = sqlx::query(
        r#"
        UPDATE workers
        SET name = ?, color = ?
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(name.trim())
    .bind(color.trim())
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Worker",
            id: id.to_string(),
        });
    }

    get_worker(pool, account_id, id).await
}

/// Make a worker the account's only primary worker.
///
/// The flag is set on `id` and cleared on every other worker of the account
/// in a single statement.
pub async fn set_primary(pool: &SqlitePool, account_id: &str, id: &str) -> Result<Worker> {
    get_worker(pool, account_id, id).await?;

    sqlx::query(
        r#"
        UPDATE workers
        SET is_primary = (id = ?)
        WHERE account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    get_worker(pool, account_id, id).await
}

/// Delete a worker.
///
/// Historical assignments are not removed: they keep the worker's name in
/// `deleted_worker_name` and their `worker_id` is nulled by the foreign key.
pub async fn delete_worker(pool: &SqlitePool, account_id: &str, id: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE work_day_assignments
        SET deleted_worker_name = (
            SELECT name FROM workers WHERE id = ? AND account_id = ?
        )
        WHERE worker_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query(
        r#"
        DELETE FROM workers
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(DatabaseError::NotFound {
            entity: "Worker",
            id: id.to_string(),
        });
    }

    tx.commit().await?;
    Ok(())
}

/// Count assignments referencing a worker.
pub async fn count_assignments(pool: &SqlitePool, worker_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM work_day_assignments WHERE worker_id = ?
        "#,
    )
    .bind(worker_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
