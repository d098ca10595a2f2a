//! Hours and amount conversions for work entries.
//!
//! Hours picked directly snap to 10-minute steps. Hours back-solved from a
//! directly entered amount snap to the nearest minute.

use crate::aggregate::sanitize;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Round decimal hours to the nearest whole minute.
pub fn round_to_minutes(hours: f64) -> f64 {
    (sanitize(hours) * MINUTES_PER_HOUR).round() / MINUTES_PER_HOUR
}

/// Round decimal hours to the nearest 10-minute step.
pub fn round_to_ten_minutes(hours: f64) -> f64 {
    (sanitize(hours) * 6.0).round() / 6.0
}

/// Back-solve hours from an amount at the given hourly rate.
///
/// A zero (or invalid) rate yields zero hours.
pub fn hours_from_amount(amount: f64, rate: f64) -> f64 {
    let rate = sanitize(rate);
    if rate == 0.0 {
        return 0.0;
    }
    round_to_minutes(sanitize(amount) / rate)
}

/// Amount earned for `hours` at `rate`, rounded to cents.
pub fn amount_from_hours(hours: f64, rate: f64) -> f64 {
    (sanitize(hours) * sanitize(rate) * 100.0).round() / 100.0
}

/// Render hours as `"2h 30m"`, `"2h"` or `"45m"`.
pub fn format_hours(hours: f64) -> String {
    let total = (sanitize(hours) * MINUTES_PER_HOUR).round() as u64;
    let (h, m) = (total / 60, total % 60);

    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
