//! Shared plumbing for the maintenance binaries.
//!
//! The binaries only parse arguments and print; loading and formatting
//! live here.

use clap::Args;
use database::{account, worker, Account, Database, Worker};
use ledger_core::{dedupe_workers, DedupOutcome};
use serde::Serialize;
use thiserror::Error;

/// Connection options shared by every tool.
#[derive(Debug, Clone, Args)]
pub struct ConnectArgs {
    /// SQLite database URL
    #[arg(long, env = "SQLITE_PATH", default_value = "sqlite:tidyledger.db?mode=rwc")]
    pub database: String,

    /// API token of the account to operate on
    #[arg(long, env = "LEDGER_TOKEN")]
    pub token: String,
}

/// Errors raised by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no account matches the given token")]
    UnknownToken,

    #[error(transparent)]
    Database(#[from] database::DatabaseError),

    #[error(transparent)]
    Ledger(#[from] ledger_core::LedgerError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open the database, apply migrations, and resolve the token's account.
pub async fn open(args: &ConnectArgs) -> Result<(Database, Account), ToolError> {
    let db = Database::connect(&args.database).await?;
    db.migrate().await?;
    let account = resolve_account(&db, &args.token).await?;
    Ok((db, account))
}

/// Look up the account owning `token`.
pub async fn resolve_account(db: &Database, token: &str) -> Result<Account, ToolError> {
    account::get_account_by_token(db.pool(), token.trim())
        .await?
        .ok_or(ToolError::UnknownToken)
}

/// A worker with its assignment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerLine {
    #[serde(flatten)]
    pub worker: Worker,
    pub assignment_count: i64,
}

/// Load the account's workers with assignment counts.
pub async fn worker_lines(db: &Database, account_id: &str) -> Result<Vec<WorkerLine>, ToolError> {
    let workers = worker::list_workers(db.pool(), account_id).await?;

    let mut lines = Vec::with_capacity(workers.len());
    for w in workers {
        let assignment_count = worker::count_assignments(db.pool(), &w.id).await?;
        lines.push(WorkerLine {
            worker: w,
            assignment_count,
        });
    }
    Ok(lines)
}

/// Plain-text table of workers, followed by a count line.
pub fn render_table(lines: &[WorkerLine], account_name: &str) -> String {
    let mut out = format!(
        "{:<38} {:<24} {:>7} {:>11}\n",
        "ID", "NAME", "PRIMARY", "ASSIGNMENTS"
    );
    for line in lines {
        out.push_str(&format!(
            "{:<38} {:<24} {:>7} {:>11}\n",
            line.worker.id,
            line.worker.name,
            if line.worker.is_primary { "yes" } else { "" },
            line.assignment_count
        ));
    }
    out.push_str(&format!("{} worker(s) for {}", lines.len(), account_name));
    out
}

/// Workers as a pretty-printed JSON array.
pub fn render_json(lines: &[WorkerLine]) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(lines)?)
}

/// Text printed for a de-duplication run: the summary, then one line per failure.
pub fn render_outcome(outcome: &DedupOutcome) -> String {
    let mut out = outcome.message.clone();
    for failure in &outcome.failures {
        out.push_str(&format!("\n  failed: {}", failure));
    }
    out
}

/// Run the de-duplicator for `name`. The bool is false when nothing matched.
pub async fn run_dedupe(db: &Database, account_id: &str, name: &str) -> Result<(String, bool), ToolError> {
    let outcome = dedupe_workers(db, account_id, name).await?;
    Ok((render_outcome(&outcome), outcome.success))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> (Database, Account) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let acct = account::create_account(db.pool(), "Sparkle", "tok").await.unwrap();
        (db, acct)
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let args = ConnectArgs {
            database: "sqlite::memory:".to_string(),
            token: "missing".to_string(),
        };
        let result = open(&args).await;
        assert!(matches!(result, Err(ToolError::UnknownToken)));
    }

    #[tokio::test]
    async fn test_resolve_account_trims_token() {
        let (db, acct) = setup().await;
        let found = resolve_account(&db, "  tok\n").await.unwrap();
        assert_eq!(found.id, acct.id);
    }

    #[tokio::test]
    async fn test_worker_table() {
        let (db, acct) = setup().await;
        let me = worker::create_worker(db.pool(), &acct.id, "Me", None, true).await.unwrap();
        worker::create_worker(db.pool(), &acct.id, "Ana", None, false).await.unwrap();

        let lines = worker_lines(&db, &acct.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.assignment_count == 0));

        let table = render_table(&lines, &acct.name);
        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("ID"));
        let me_row = rows.iter().find(|r| r.starts_with(&me.id)).unwrap();
        assert!(me_row.contains("Me"));
        assert!(me_row.contains("yes"));
        assert_eq!(rows[3], "2 worker(s) for Sparkle");
    }

    #[tokio::test]
    async fn test_worker_json() {
        let (db, acct) = setup().await;
        worker::create_worker(db.pool(), &acct.id, "Ana", Some("#ff0000"), false)
            .await
            .unwrap();

        let lines = worker_lines(&db, &acct.id).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&lines).unwrap()).unwrap();
        assert_eq!(value[0]["name"], "Ana");
        assert_eq!(value[0]["color"], "#ff0000");
        assert_eq!(value[0]["assignment_count"], 0);
    }

    #[tokio::test]
    async fn test_dedupe_without_match_fails() {
        let (db, acct) = setup().await;
        let (text, ok) = run_dedupe(&db, &acct.id, "Ghost").await.unwrap();
        assert!(!ok);
        assert!(text.contains("Ghost"));
    }

    #[tokio::test]
    async fn test_dedupe_merges() {
        let (db, acct) = setup().await;
        worker::create_worker(db.pool(), &acct.id, "Ana", None, false).await.unwrap();
        worker::create_worker(db.pool(), &acct.id, "ANA", None, false).await.unwrap();

        let (text, ok) = run_dedupe(&db, &acct.id, "ana").await.unwrap();
        assert!(ok);
        assert!(text.starts_with("Merged 1 duplicate(s)"));
        assert!(!text.contains("failed"));
        assert_eq!(worker_lines(&db, &acct.id).await.unwrap().len(), 1);
    }
}
