//! Merge workers that share a name into a single record.

use std::process::ExitCode;

use clap::Parser;
use ledger_tools::{open, run_dedupe, ConnectArgs};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "dedupe-workers")]
#[command(about = "Merge duplicate workers, keeping the primary or busiest one")]
struct Cli {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Worker name to de-duplicate (case-insensitive)
    #[arg(long)]
    name: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let (db, account) = match open(&cli.connect).await {
        Ok(opened) => opened,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(account = %account.id, name = %cli.name, "De-duplicating workers");

    let code = match run_dedupe(&db, &account.id, &cli.name).await {
        Ok((text, true)) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Ok((text, false)) => {
            println!("{}", text);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("De-duplication failed: {}", e);
            ExitCode::FAILURE
        }
    };

    db.close().await;
    code
}
