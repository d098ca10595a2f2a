//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Token for an account created on first start, if set.
    pub bootstrap_token: Option<String>,
    /// Display name for the bootstrapped account.
    pub bootstrap_account_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `LEDGER_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:tidyledger.db?mode=rwc` |
    /// | `LEDGER_BOOTSTRAP_TOKEN` | API token of an account to create on start | (none) |
    /// | `LEDGER_ACCOUNT_NAME` | Name of the bootstrapped account | `My Cleaning Service` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("LEDGER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:tidyledger.db?mode=rwc".to_string());

        let bootstrap_token = match env::var("LEDGER_BOOTSTRAP_TOKEN") {
            Ok(token) if token.trim().is_empty() => return Err(ConfigError::EmptyToken),
            Ok(token) => Some(token.trim().to_string()),
            Err(_) => None,
        };

        let bootstrap_account_name = env::var("LEDGER_ACCOUNT_NAME")
            .unwrap_or_else(|_| "My Cleaning Service".to_string());

        Ok(Self {
            addr,
            database_url,
            bootstrap_token,
            bootstrap_account_name,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid LEDGER_ADDR format")]
    InvalidAddr,

    #[error("LEDGER_BOOTSTRAP_TOKEN is set but empty")]
    EmptyToken,
}
