//! SQLite persistence layer for Tidyledger.
//!
//! This crate provides async database operations for accounts, clients,
//! workers, reports, work days, and worker assignments using SQLx with SQLite.
//! Every entity has a single canonical field name; column mapping lives in
//! [`models`].
//!
//! # Example
//!
//! ```no_run
//! use database::{account, client, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:tidyledger.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create an account and a client billed at 20/hour
//!     let account = account::create_account(db.pool(), "Sparkle", "secret-token").await?;
//!     client::create_client(db.pool(), &account.id, "Mrs. Novak", 20.0).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod assignment;
pub mod client;
pub mod error;
pub mod models;
pub mod preference;
pub mod report;
pub mod validation;
pub mod work_day;
pub mod worker;

pub use error::{DatabaseError, Result};
pub use models::{
    Account, Client, PaymentStatus, Preference, Report, WorkDay, WorkDayAssignment, Worker,
};
pub use report::ReportTotals;
pub use validation::ValidationError;
pub use work_day::NewWorkDay;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/tidyledger.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
