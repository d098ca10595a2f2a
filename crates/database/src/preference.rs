//! Per-account UI preference storage.

use sqlx::SqlitePool;

use crate::models::Preference;
use crate::Result;

/// Create or update a preference entry.
pub async fn upsert_preference(
    pool: &SqlitePool,
    account_id: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO preferences (account_id, key, value)
        VALUES (?, ?, ?)
        ON CONFLICT(account_id, key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(account_id)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a preference entry.
pub async fn get_preference(
    pool: &SqlitePool,
    account_id: &str,
    key: &str,
) -> Result<Option<Preference>> {
    let record = sqlx::query_as::<_, Preference>(
        r#"
        SELECT account_id, key, value, updated_at
        FROM preferences
        WHERE account_id = ? AND key = ?
        "#,
    )
    .bind(account_id)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Clear a preference entry.
pub async fn clear_preference(pool: &SqlitePool, account_id: &str, key: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM preferences
        WHERE account_id = ? AND key = ?
        "#,
    )
    .bind(account_id)
    .bind(key)
    .execute(pool)
    .await?;

    Ok(())
}
