//! Payment aggregation over work days.
//!
//! Pure functions: given work days (each with its worker assignments),
//! compute hours, earned, paid, and remaining totals plus a derived payment
//! status, optionally restricted to one worker's share.

use std::fmt;

use database::{PaymentStatus, WorkDay, WorkDayAssignment};
use serde::{Deserialize, Serialize};

/// Tolerance for comparing money values, half a cent.
pub const MONEY_EPSILON: f64 = 0.005;

/// Which workers an aggregation covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum WorkerFilter {
    /// Every work day, full day totals.
    #[default]
    All,
    /// Only days with an assignment for this worker, using that worker's share.
    Worker(String),
}

impl WorkerFilter {
    /// Parse a query/preference value; `"all"` and the empty string mean all workers.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => WorkerFilter::All,
            id => WorkerFilter::Worker(id.to_string()),
        }
    }

    pub fn worker_id(&self) -> Option<&str> {
        match self {
            WorkerFilter::All => None,
            WorkerFilter::Worker(id) => Some(id),
        }
    }
}

impl fmt::Display for WorkerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerFilter::All => f.write_str("all"),
            WorkerFilter::Worker(id) => f.write_str(id),
        }
    }
}

/// One worker's share of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub worker_id: Option<String>,
    pub hours: f64,
    pub amount: f64,
}

/// A work day as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub hours: f64,
    pub amount: f64,
    pub status: PaymentStatus,
    /// Recorded paid amount, used for `partial` days.
    pub paid_amount: Option<f64>,
    pub assignments: Vec<ShareRecord>,
}

impl DayRecord {
    /// Build a record from a stored work day and its assignments.
    ///
    /// Assignments belonging to other days are ignored.
    pub fn from_rows(day: &WorkDay, assignments: &[WorkDayAssignment]) -> Self {
        Self {
            hours: day.hours,
            amount: day.amount,
            status: day.payment_status,
            paid_amount: day.paid_amount,
            assignments: assignments
                .iter()
                .filter(|a| a.work_day_id == day.id)
                .map(|a| ShareRecord {
                    worker_id: a.worker_id.clone(),
                    hours: a.hours,
                    amount: a.amount,
                })
                .collect(),
        }
    }

    /// Amount paid for the whole day.
    pub fn paid(&self) -> f64 {
        match self.status {
            PaymentStatus::Paid => sanitize(self.amount),
            PaymentStatus::Partial => sanitize(self.paid_amount.unwrap_or(0.0)),
            PaymentStatus::Unpaid => 0.0,
        }
    }

    /// The given worker's `(hours, amount)` on this day, or `None` when they
    /// have no assignment.
    pub fn share_of(&self, worker_id: &str) -> Option<(f64, f64)> {
        let mut found = false;
        let mut hours = 0.0;
        let mut amount = 0.0;

        for share in &self.assignments {
            if share.worker_id.as_deref() == Some(worker_id) {
                found = true;
                hours += sanitize(share.hours);
                amount += sanitize(share.amount);
            }
        }

        found.then_some((hours, amount))
    }

    /// Paid portion attributable to a worker earning `worker_amount` of this day.
    ///
    /// Partial payments are prorated by the worker's fraction of the day total.
    pub fn worker_paid(&self, worker_amount: f64) -> f64 {
        match self.status {
            PaymentStatus::Paid => worker_amount,
            PaymentStatus::Unpaid => 0.0,
            PaymentStatus::Partial => {
                let day_total = sanitize(self.amount);
                let share = if day_total > 0.0 {
                    worker_amount / day_total
                } else {
                    0.0
                };
                sanitize(share * sanitize(self.paid_amount.unwrap_or(0.0)))
            }
        }
    }
}

/// Aggregated totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total_hours: f64,
    pub total_earned: f64,
    pub total_paid: f64,
    /// `total_earned - total_paid`. Negative only when the input is inconsistent.
    pub total_remaining: f64,
    pub status: PaymentStatus,
}

impl PaymentSummary {
    /// Rollup values for storing on a report row.
    pub fn to_report_totals(&self) -> database::ReportTotals {
        database::ReportTotals {
            total_hours: self.total_hours,
            total_earned: self.total_earned,
            paid_amount: self.total_paid,
            remaining_amount: self.total_remaining,
            payment_status: self.status,
        }
    }
}

/// Clamp a numeric field: negative, NaN, and infinite values count as zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Derive a payment status from summed paid and earned amounts.
///
/// `paid` once everything earned is covered (and something was earned),
/// `partial` when some but not all is covered, `unpaid` otherwise.
pub fn derive_status(paid: f64, earned: f64) -> PaymentStatus {
    if earned > 0.0 && paid >= earned - MONEY_EPSILON {
        PaymentStatus::Paid
    } else if paid > 0.0 && paid < earned {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}

/// Summarize work days, optionally scoped to one worker.
pub fn summarize(days: &[DayRecord], filter: &WorkerFilter) -> PaymentSummary {
    let mut total_hours = 0.0;
    let mut total_earned = 0.0;
    let mut total_paid = 0.0;

    for day in days {
        match filter {
            WorkerFilter::All => {
                total_hours += sanitize(day.hours);
                total_earned += sanitize(day.amount);
                total_paid += day.paid();
            }
            WorkerFilter::Worker(worker_id) => {
                let Some((hours, amount)) = day.share_of(worker_id) else {
                    continue;
                };
                total_hours += hours;
                total_earned += amount;
                total_paid += day.worker_paid(amount);
            }
        }
    }

    PaymentSummary {
        total_hours,
        total_earned,
        total_paid,
        total_remaining: total_earned - total_paid,
        status: derive_status(total_paid, total_earned),
    }
}

/// Build day records from stored rows, matching assignments to their day.
pub fn day_records(days: &[WorkDay], assignments: &[WorkDayAssignment]) -> Vec<DayRecord> {
    days.iter()
        .map(|day| DayRecord::from_rows(day, assignments))
        .collect()
}
