//! List an account's workers with assignment counts.

use clap::Parser;
use ledger_tools::{open, render_json, render_table, worker_lines, ConnectArgs};

#[derive(Debug, Parser)]
#[command(name = "list-workers")]
#[command(about = "List workers with their assignment counts")]
struct Cli {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let (db, account) = open(&cli.connect).await?;
    let lines = worker_lines(&db, &account.id).await?;

    if cli.json {
        println!("{}", render_json(&lines)?);
    } else {
        println!("{}", render_table(&lines, &account.name));
    }

    db.close().await;
    Ok(())
}
