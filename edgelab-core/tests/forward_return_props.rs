//! Property tests for forward-return alignment.
//!
//! 1. Tail length — exactly the last h entries are undefined.
//! 2. Future-only — the value at bar t never changes when bars <= t change.
//! 3. Window identity — each defined value equals the hand-summed window.

use proptest::prelude::*;

use chrono::NaiveDate;
use edgelab_core::domain::Bar;
use edgelab_core::returns::{bar_returns, forward_returns};

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: (close - 1.0).max(0.01),
            close,
        })
        .collect()
}

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..500.0_f64, 12..80)
}

proptest! {
    /// Exactly the last h entries are NaN; everything earlier is defined.
    #[test]
    fn tail_is_exactly_horizon(closes in arb_closes(), horizon in 1usize..10) {
        let bars = bars_from_closes(&closes);
        let returns = bar_returns(&bars);
        let fwd = forward_returns(&returns, horizon);
        let n = closes.len();

        prop_assert_eq!(fwd.len(), n);
        for (t, v) in fwd.iter().enumerate() {
            if t + horizon < n {
                prop_assert!(!v.is_nan(), "index {} should be defined", t);
            } else {
                prop_assert!(v.is_nan(), "index {} should be NaN", t);
            }
        }
    }

    /// Changing history at or before bar t never changes the forward value
    /// stored at t: the window starts strictly after t.
    #[test]
    fn forward_value_ignores_the_past(closes in arb_closes(), horizon in 1usize..6) {
        let n = closes.len();
        prop_assume!(n > horizon + 2);
        let t = n - horizon - 2; // a defined index whose window is the tail

        let bars = bars_from_closes(&closes);
        let fwd = forward_returns(&bar_returns(&bars), horizon);

        // Perturb every close before t; keep t and the window untouched.
        let mut perturbed = closes.clone();
        for c in perturbed.iter_mut().take(t) {
            *c *= 1.37;
        }
        let fwd_perturbed = forward_returns(&bar_returns(&bars_from_closes(&perturbed)), horizon);

        let original = fwd[t];
        let shifted = fwd_perturbed[t];
        prop_assert!(
            (original - shifted).abs() < 1e-9,
            "forward value at {} moved from {} to {}",
            t,
            original,
            shifted
        );
    }

    /// Each defined value is the plain sum of the h following per-bar returns.
    #[test]
    fn window_identity(closes in arb_closes(), horizon in 1usize..8) {
        let bars = bars_from_closes(&closes);
        let returns = bar_returns(&bars);
        let fwd = forward_returns(&returns, horizon);

        for t in 0..closes.len().saturating_sub(horizon + 1) {
            let expected: f64 = returns[t + 1..=t + horizon].iter().sum();
            prop_assert!((fwd[t] - expected).abs() < 1e-9);
        }
    }
}
