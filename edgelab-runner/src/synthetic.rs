//! Synthetic market data — deterministic random-walk series for demos and
//! tests that need realistic variation without a data file.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use edgelab_core::domain::{Bar, PriceSeries};

/// Generate a seeded random-walk price series.
///
/// Deterministic for a given seed: the same (symbol, bars, seed) triple
/// always produces the same series. Prices drift slightly upward and are
/// floored well above zero so every bar passes series validation.
pub fn random_walk(symbol: &str, bars: usize, seed: u64) -> PriceSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 2).expect("valid calendar date");

    let mut price = 100.0_f64;
    let mut out = Vec::with_capacity(bars);

    for i in 0..bars {
        let open = price;
        let change: f64 = rng.gen_range(-1.5..1.5) + 0.03;
        price = (price + change).max(5.0);
        let close = price;

        let high = open.max(close) + rng.gen_range(0.0..0.8);
        let low = (open.min(close) - rng.gen_range(0.0..0.8)).max(1.0);

        out.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
        });
    }

    PriceSeries::new(symbol, out).expect("generated bars are ordered and sane")
}
