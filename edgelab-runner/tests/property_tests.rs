//! Property tests for the statistics and decision invariants.
//!
//! 1. Conditional statistics stay inside their documented bounds.
//! 2. The decision threshold is consistent with the expectation sign.
//! 3. The full pipeline is deterministic and structurally sound on
//!    arbitrary synthetic series.

use proptest::prelude::*;

use edgelab_core::events::EventKind;
use edgelab_runner::{
    analyze, combine, conditional_stats, AnalysisConfig, ConditionalStats, Signal, Verdict,
};
use edgelab_runner::synthetic::random_walk;

fn arb_samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-50.0..50.0_f64, 0..40)
}

proptest! {
    /// Probability lives in [0, 100]; order statistics are ordered and
    /// bracket the mean; the no-data state appears exactly on empty input.
    #[test]
    fn conditional_stats_bounds(samples in arb_samples()) {
        let stats = ConditionalStats::from_samples(&samples);

        prop_assert!(stats.positive_probability >= 0.0);
        prop_assert!(stats.positive_probability <= 100.0);
        prop_assert_eq!(stats.sample_count, samples.len());

        if samples.is_empty() {
            prop_assert!(stats.mean.is_none());
            prop_assert!(stats.median.is_none());
            prop_assert_eq!(stats.positive_probability, 0.0);
        } else {
            let (min, max) = (stats.min.unwrap(), stats.max.unwrap());
            let (mean, median) = (stats.mean.unwrap(), stats.median.unwrap());
            prop_assert!(min <= max);
            prop_assert!(min <= median && median <= max);
            prop_assert!(min - 1e-12 <= mean && mean <= max + 1e-12);
        }
    }

    /// Masking with an all-false event always yields the no-data state,
    /// and the sample can never outgrow the number of fired bars.
    #[test]
    fn conditioning_respects_the_mask(
        values in prop::collection::vec(-20.0..20.0_f64, 1..60),
        mask_seed in any::<u64>(),
    ) {
        let fired: Vec<bool> = values
            .iter()
            .enumerate()
            .map(|(i, _)| (mask_seed >> (i % 64)) & 1 == 1)
            .collect();

        let stats = conditional_stats(&fired, &values);
        let fired_count = fired.iter().filter(|&&f| f).count();
        prop_assert!(stats.sample_count <= fired_count);

        let none = vec![false; values.len()];
        prop_assert_eq!(conditional_stats(&none, &values), ConditionalStats::empty());
    }

    /// Buy exactly when the probability-weighted sum is non-negative.
    #[test]
    fn verdict_matches_expectation_sign(
        sample_a in arb_samples(),
        sample_b in arb_samples(),
        active_a in any::<bool>(),
        active_b in any::<bool>(),
    ) {
        let signals = vec![
            Signal {
                kind: EventKind::MacdGoldenCross,
                active: active_a,
                stats: ConditionalStats::from_samples(&sample_a),
            },
            Signal {
                kind: EventKind::TrendBreak { window: 10 },
                active: active_b,
                stats: ConditionalStats::from_samples(&sample_b),
            },
        ];
        let decision = combine(&signals);

        prop_assert!(decision.expectation.is_finite());
        match decision.verdict {
            Verdict::Buy => prop_assert!(decision.expectation >= 0.0),
            Verdict::NoBuy => prop_assert!(decision.expectation < 0.0),
        }
    }

    /// The pipeline is pure: the same series and config always produce the
    /// same report, and its shape is independent of the data.
    #[test]
    fn pipeline_is_deterministic(seed in any::<u64>(), bars in 30usize..150) {
        let config = AnalysisConfig::default();
        let series = random_walk("SYN", bars, seed);

        let first = analyze(&series, &config).unwrap();
        let second = analyze(&series, &config).unwrap();
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(first.signals.len(), 7);
        prop_assert_eq!(first.bar_count, bars);
        for signal in &first.signals {
            prop_assert!(signal.stats.sample_count <= bars);
            prop_assert!(signal.stats.positive_probability >= 0.0);
            prop_assert!(signal.stats.positive_probability <= 100.0);
        }
    }
}
