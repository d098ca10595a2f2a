//! Property tests for payment aggregation.

use database::PaymentStatus;
use ledger_core::{summarize, DayRecord, ShareRecord, WorkerFilter};
use proptest::prelude::*;

fn any_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1_000.0..10_000.0f64,
        Just(0.0),
        Just(-0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn any_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Paid),
        Just(PaymentStatus::Partial),
        Just(PaymentStatus::Unpaid),
    ]
}

fn any_share() -> impl Strategy<Value = ShareRecord> {
    (
        prop::option::of(prop_oneof![Just("a".to_string()), Just("b".to_string())]),
        any_number(),
        any_number(),
    )
        .prop_map(|(worker_id, hours, amount)| ShareRecord {
            worker_id,
            hours,
            amount,
        })
}

fn any_day() -> impl Strategy<Value = DayRecord> {
    (
        any_number(),
        any_number(),
        any_status(),
        prop::option::of(any_number()),
        prop::collection::vec(any_share(), 0..4),
    )
        .prop_map(|(hours, amount, status, paid_amount, assignments)| DayRecord {
            hours,
            amount,
            status,
            paid_amount,
            assignments,
        })
}

fn any_filter() -> impl Strategy<Value = WorkerFilter> {
    prop_oneof![
        Just(WorkerFilter::All),
        Just(WorkerFilter::Worker("a".to_string())),
        Just(WorkerFilter::Worker("b".to_string())),
    ]
}

proptest! {
    /// Output is always finite and non-negative except for `total_remaining`.
    #[test]
    fn prop_summary_is_finite(days in prop::collection::vec(any_day(), 0..20), filter in any_filter()) {
        let s = summarize(&days, &filter);

        prop_assert!(s.total_hours.is_finite() && s.total_hours >= 0.0);
        prop_assert!(s.total_earned.is_finite() && s.total_earned >= 0.0);
        prop_assert!(s.total_paid.is_finite() && s.total_paid >= 0.0);
        prop_assert!(s.total_remaining.is_finite());
        prop_assert!((s.total_earned - s.total_paid - s.total_remaining).abs() < 1e-6);
    }

    /// Remaining can only go negative when partial payments exceed the day amount.
    #[test]
    fn prop_consistent_input_never_overpaid(
        amounts in prop::collection::vec(0.0..1_000.0f64, 0..20),
        fractions in prop::collection::vec(0.0..1.0f64, 20),
    ) {
        let days: Vec<DayRecord> = amounts
            .iter()
            .zip(fractions.iter())
            .map(|(amount, fraction)| DayRecord {
                hours: amount / 20.0,
                amount: *amount,
                status: PaymentStatus::Partial,
                paid_amount: Some(amount * fraction),
                assignments: vec![],
            })
            .collect();

        let s = summarize(&days, &WorkerFilter::All);
        prop_assert!(s.total_remaining >= -1e-6);
    }

    /// With a full split, worker shares of unpaid amounts add up to the day's unpaid amount.
    #[test]
    fn prop_worker_shares_sum_to_total(
        total in 1.0..1_000.0f64,
        a_fraction in 0.0..1.0f64,
        paid_fraction in 0.0..1.0f64,
    ) {
        let a_amount = total * a_fraction;
        let day = DayRecord {
            hours: total / 20.0,
            amount: total,
            status: PaymentStatus::Partial,
            paid_amount: Some(total * paid_fraction),
            assignments: vec![
                ShareRecord { worker_id: Some("a".into()), hours: 1.0, amount: a_amount },
                ShareRecord { worker_id: Some("b".into()), hours: 1.0, amount: total - a_amount },
            ],
        };
        let days = [day];

        let all = summarize(&days, &WorkerFilter::All);
        let a = summarize(&days, &WorkerFilter::Worker("a".into()));
        let b = summarize(&days, &WorkerFilter::Worker("b".into()));

        prop_assert!((a.total_remaining + b.total_remaining - all.total_remaining).abs() < 1e-6);
    }
}

#[test]
fn worked_example_sixty_forty_split() {
    let days = [DayRecord {
        hours: 5.0,
        amount: 100.0,
        status: PaymentStatus::Partial,
        paid_amount: Some(50.0),
        assignments: vec![
            ShareRecord { worker_id: Some("a".into()), hours: 3.0, amount: 60.0 },
            ShareRecord { worker_id: Some("b".into()), hours: 2.0, amount: 40.0 },
        ],
    }];

    let a = summarize(&days, &WorkerFilter::Worker("a".into()));
    let b = summarize(&days, &WorkerFilter::Worker("b".into()));

    assert!((a.total_remaining - 30.0).abs() < 1e-9);
    assert!((b.total_remaining - 20.0).abs() < 1e-9);
    assert!((a.total_remaining + b.total_remaining - 50.0).abs() < 1e-9);
}
