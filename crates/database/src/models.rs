//! Database models.
//!
//! Each entity has one canonical field name per column. Rows are mapped with
//! `FromRow` here and nowhere else.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account owning clients, workers, and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Bearer token used by the web API and operator tools.
    #[serde(skip_serializing)]
    pub api_token: String,
    pub created_at: String,
}

/// A customer of the cleaning service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: String,
    pub account_id: String,
    /// Display name
    pub name: String,
    /// Currency per hour. Never negative.
    pub hourly_rate: f64,
    pub created_at: String,
}

/// A person who performs work for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Worker {
    pub id: String,
    pub account_id: String,
    /// Display name. Not unique; duplicates are merged by the de-duplicator.
    pub name: String,
    /// UI color tag (e.g., "#3b82f6")
    pub color: String,
    /// The account owner's own worker record.
    pub is_primary: bool,
    /// Creation timestamp with millisecond precision.
    pub created_at: String,
}

/// Payment state of a work day or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "partial" => Ok(PaymentStatus::Partial),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

/// A client+date grouping of logged work with denormalized rollups.
///
/// The rollup fields are a cache of the aggregation over the report's work
/// days and are recomputed whenever a work day changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: String,
    pub account_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub total_hours: f64,
    pub total_earned: f64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub payment_status: PaymentStatus,
    pub created_at: String,
}

/// One day's logged work within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkDay {
    pub id: String,
    pub report_id: String,
    pub date: NaiveDate,
    /// Decimal hours worked.
    pub hours: f64,
    /// Amount earned for the day.
    pub amount: f64,
    pub payment_status: PaymentStatus,
    /// Running paid amount, meaningful only for `partial`.
    pub paid_amount: Option<f64>,
    pub note: Option<String>,
    /// Placeholder for future work with no hours yet.
    pub is_planned: bool,
    pub created_at: String,
}

/// The share of a work day attributed to one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkDayAssignment {
    pub id: String,
    pub work_day_id: String,
    /// `None` once the referenced worker has been deleted.
    pub worker_id: Option<String>,
    /// Name of the worker at deletion time, for orphaned rows.
    pub deleted_worker_name: Option<String>,
    pub hours: f64,
    pub amount: f64,
    pub created_at: String,
}

/// A stored per-account UI preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub account_id: String,
    pub key: String,
    pub value: String,
    /// Last update timestamp.
    pub updated_at: String,
}
