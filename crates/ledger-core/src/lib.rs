//! Core bookkeeping logic for Tidyledger.
//!
//! - [`aggregate`]: hours/earned/paid totals and derived payment status,
//!   optionally scoped to one worker's share.
//! - [`dedup`]: merges workers that share a name and re-points their
//!   assignments to a single survivor.
//! - [`service`]: work entry logging, report rollups, and dashboard stats on
//!   top of the [`database`] crate.
//! - [`context`]: per-account UI state (selected worker, recent workers).
//!
//! # Example
//!
//! ```
//! use database::PaymentStatus;
//! use ledger_core::{summarize, DayRecord, WorkerFilter};
//!
//! let days = vec![DayRecord {
//!     hours: 5.0,
//!     amount: 100.0,
//!     status: PaymentStatus::Partial,
//!     paid_amount: Some(50.0),
//!     assignments: vec![],
//! }];
//!
//! let summary = summarize(&days, &WorkerFilter::All);
//! assert_eq!(summary.total_remaining, 50.0);
//! assert_eq!(summary.status, PaymentStatus::Partial);
//! ```

pub mod aggregate;
pub mod context;
pub mod dedup;
pub mod error;
pub mod hours;
pub mod memory;
pub mod service;
pub mod split;
pub mod store;

pub use aggregate::{
    day_records, derive_status, summarize, DayRecord, PaymentSummary, ShareRecord, WorkerFilter,
};
pub use context::AppContext;
pub use dedup::{dedupe_workers, select_survivor, Candidate, DedupOutcome};
pub use error::{LedgerError, Result};
pub use memory::MemoryWorkerStore;
pub use service::{
    change_work_day_date, dashboard_stats, log_work_entry, refresh_report_totals,
    set_work_day_status, DashboardStats, LoggedEntry, NewWorkEntry, WorkerShare,
};
pub use store::WorkerStore;

// Re-export for consumers
pub use async_trait::async_trait;
