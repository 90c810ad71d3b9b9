//! Deterministic synthetic OHLCV generator.
//!
//! A symbol's bars are a pure function of the symbol, the horizon and the end
//! date. The draw order below is fixed: the initial price, then `days - 1`
//! random-walk steps, then every volume, then every high factor, every low
//! factor and every close factor. Changing that order changes every series.
//!
//! `close` is drawn independently of `high`/`low`, so in rare draws a close
//! lies outside `[low, high]`. Downstream code must not assume otherwise.

use chrono::{Days, Local, NaiveDate};
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::domain::error::MarketLabError;
use crate::domain::ohlcv::{PriceBar, PriceSeries};
use crate::domain::seed::{Stream, rng_for};

pub const MIN_INITIAL_PRICE: f64 = 50.0;
pub const MAX_INITIAL_PRICE: f64 = 200.0;
pub const PRICE_FLOOR: f64 = 1.0;
pub const STEP_SCALE: f64 = 2.0;
pub const MAX_INTRADAY_RANGE: f64 = 0.02;
pub const CLOSE_NOISE: f64 = 0.01;
pub const MIN_VOLUME: i64 = 100_000;
pub const MAX_VOLUME: i64 = 1_000_000;

/// Generate `days` bars for `symbol` ending today.
pub fn generate_series(symbol: &str, days: usize) -> Result<PriceSeries, MarketLabError> {
    generate_series_ending(symbol, days, Local::now().date_naive())
}

/// Generate `days` bars for `symbol`, the last one dated `end`.
pub fn generate_series_ending(
    symbol: &str,
    days: usize,
    end: NaiveDate,
) -> Result<PriceSeries, MarketLabError> {
    if days < 1 {
        return Err(MarketLabError::InvalidHorizon { days });
    }

    let dates = (0..days)
        .map(|i| end.checked_sub_days(Days::new((days - 1 - i) as u64)))
        .collect::<Option<Vec<NaiveDate>>>()
        .ok_or(MarketLabError::DateOutOfRange {
            date: end,
            days: days - 1,
        })?;

    let mut rng = rng_for(symbol, Stream::Prices);

    let candidates = random_walk(&mut rng, days);
    let volumes: Vec<i64> = (0..days)
        .map(|_| rng.gen_range(MIN_VOLUME..=MAX_VOLUME))
        .collect();
    let highs: Vec<f64> = candidates
        .iter()
        .map(|p| p * (1.0 + rng.gen_range(0.0..MAX_INTRADAY_RANGE)))
        .collect();
    let lows: Vec<f64> = candidates
        .iter()
        .map(|p| p * (1.0 - rng.gen_range(0.0..MAX_INTRADAY_RANGE)))
        .collect();
    let closes: Vec<f64> = candidates
        .iter()
        .map(|p| {
            let z: f64 = rng.sample(StandardNormal);
            p * (1.0 + z * CLOSE_NOISE)
        })
        .collect();

    let bars = (0..days)
        .map(|i| PriceBar {
            date: dates[i],
            open: candidates[i],
            high: highs[i],
            low: lows[i],
            close: closes[i],
            volume: volumes[i],
        })
        .collect();

    tracing::debug!(symbol, days, %end, "generated synthetic series");

    Ok(PriceSeries {
        symbol: symbol.to_string(),
        bars,
    })
}

/// Gaussian random walk floored at [`PRICE_FLOOR`].
fn random_walk(rng: &mut StdRng, days: usize) -> Vec<f64> {
    let mut prices = Vec::with_capacity(days);
    prices.push(rng.gen_range(MIN_INITIAL_PRICE..MAX_INITIAL_PRICE));
    for _ in 1..days {
        let z: f64 = rng.sample(StandardNormal);
        let prev = prices[prices.len() - 1];
        prices.push((prev + z * STEP_SCALE).max(PRICE_FLOOR));
    }
    prices
}
