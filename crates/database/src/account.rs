//! Account storage and token lookup.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_insert_error, DatabaseError, Result};
use crate::models::Account;
use crate::validation::validate_name;

/// Create a new account with the given API token.
pub async fn create_account(pool: &SqlitePool, name: &str, api_token: &str) -> Result<Account> {
    validate_name("account name", name)?;

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO accounts (id, name, api_token)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(name.trim())
    .bind(api_token)
    .execute(pool)
    .await
    .map_err(|e| map_insert_error(e, "Account", name))?;

    get_account(pool, &id).await
}

/// Get an account by ID.
pub async fn get_account(pool: &SqlitePool, id: &str) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        r#"
        SELECT id, name, api_token, created_at
        FROM accounts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Account",
        id: id.to_string(),
    })
}

/// Resolve an API token to its account, if any.
pub async fn get_account_by_token(pool: &SqlitePool, api_token: &str) -> Result<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, name, api_token, created_at
        FROM accounts
        WHERE api_token = ?
        "#,
    )
    .bind(api_token)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_token_lookup() {
        let db = test_db().await;

        let account = create_account(db.pool(), "Sparkle Cleaning", "tok-1").await.unwrap();

        let found = get_account_by_token(db.pool(), "tok-1").await.unwrap().unwrap();
        assert_eq!(found.id, account.id);

        assert!(get_account_by_token(db.pool(), "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let db = test_db().await;

        create_account(db.pool(), "A", "same").await.unwrap();
        let result = create_account(db.pool(), "B", "same").await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }
}
