//! Client CRUD operations.
//!
//! All lookups are scoped to the owning account.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, DatabaseError, Result};
use crate::models::Client;
use crate::validation::{validate_name, validate_rate};

/// Create a new client.
pub async fn create_client(
    pool: &SqlitePool,
    account_id: &str,
    name: &str,
    hourly_rate: f64,
) -> Result<Client> {
    validate_name("client name", name)?;
    validate_rate(hourly_rate)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO clients (id, account_id, name, hourly_rate)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(account_id)
    .bind(name.trim())
    .bind(hourly_rate)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "Client", &id))?;

    get_client(pool, account_id, &id).await
}

/// Get a client by ID.
pub async fn get_client(pool: &SqlitePool, account_id: &str, id: &str) -> Result<Client> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT id, account_id, name, hourly_rate, created_at
        FROM clients
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Client",
        id: id.to_string(),
    })
}

/// List all clients for an account.
pub async fn list_clients(pool: &SqlitePool, account_id: &str) -> Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        r#"
        SELECT id, account_id, name, hourly_rate, created_at
        FROM clients
        WHERE account_id = ?
        ORDER BY name COLLATE NOCASE
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

/// Update a client's name and rate.
pub async fn update_client(
    pool: &SqlitePool,
    account_id: &str,
    id: &str,
    name: &str,
    hourly_rate: f64,
) -> Result<Client> {
    validate_name("client name", name)?;
    validate_rate(hourly_rate)?;

    let result = sqlx::query(
        r#"
        UPDATE clients
        SET name = ?, hourly_rate = ?
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(name.trim())
    .bind(hourly_rate)
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: id.to_string(),
        });
    }

    get_client(pool, account_id, id).await
}

/// Delete a client. Its reports (and their work days) are removed by cascade.
pub async fn delete_client(pool: &SqlitePool, account_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM clients
        WHERE id = ? AND account_id = ?
        "#,
    )
    .bind(id)
    .bind(account_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Client",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count clients for an account.
pub async fn count_clients(pool: &SqlitePool, account_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM clients WHERE account_id = ?
        "#,
    )
    .bind(account_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
