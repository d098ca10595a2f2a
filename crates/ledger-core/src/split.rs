//! Splitting a work day's amount between workers.

use crate::aggregate::sanitize;
use crate::error::{LedgerError, Result};

/// Largest accepted difference between the split sum and the day total.
pub const SPLIT_TOLERANCE: f64 = 0.01;

/// Check that worker shares add up to the day total.
pub fn validate_split(total: f64, shares: &[f64]) -> Result<()> {
    if shares.is_empty() {
        return Ok(());
    }

    if let Some(bad) = shares.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(LedgerError::Validation(format!(
            "worker share {} must be zero or more",
            bad
        )));
    }

    let sum: f64 = shares.iter().sum();
    if (sum - sanitize(total)).abs() > SPLIT_TOLERANCE {
        return Err(LedgerError::Validation(format!(
            "payment split {:.2} does not match total {:.2}",
            sum,
            sanitize(total)
        )));
    }

    Ok(())
}

/// Divide an amount evenly between `workers` people, in cents.
///
/// Leftover cents go to the first shares so the parts always sum to the total.
pub fn even_split(total: f64, workers: usize) -> Vec<f64> {
    if workers == 0 {
        return Vec::new();
    }

    let cents = (sanitize(total) * 100.0).round() as u64;
    let n = workers as u64;
    let base = cents / n;
    let extra = cents % n;

    (0..n)
        .map(|i| {
            let part = if i < extra { base + 1 } else { base };
            part as f64 / 100.0
        })
        .collect()
}
