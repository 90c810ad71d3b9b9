//! Support and resistance levels.
//!
//! Candidates sit 5%, 10% and 15% either side of the current close, jittered
//! by up to 2 price units. A support is kept only if it is below the current
//! close and above 95% of the lowest close; a resistance only if it is above
//! the current close and below 105% of the highest close. Strength is drawn
//! only for kept levels.

use rand::Rng;
use rand::rngs::StdRng;

use crate::domain::error::MarketLabError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::seed::{Stream, rng_for};

pub const LEVEL_STEP: f64 = 0.05;
pub const LEVEL_COUNT: usize = 3;
pub const JITTER: f64 = 2.0;
pub const SUPPORT_FLOOR: f64 = 0.95;
pub const RESISTANCE_CEILING: f64 = 1.05;
pub const MIN_STRENGTH: f64 = 0.6;
pub const MAX_STRENGTH: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub price: f64,
    pub strength: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportResistance {
    pub supports: Vec<Level>,
    pub resistances: Vec<Level>,
}

pub fn identify_levels(
    symbol: &str,
    series: &PriceSeries,
) -> Result<SupportResistance, MarketLabError> {
    let closes = series.closes();
    let Some(&current) = closes.last() else {
        return Err(MarketLabError::empty_series("identify_levels"));
    };
    let min_close = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_close = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut rng = rng_for(symbol, Stream::Levels);

    let mut supports = Vec::new();
    for i in 1..=LEVEL_COUNT {
        let price = current * (1.0 - LEVEL_STEP * i as f64) + jitter(&mut rng);
        if price > min_close * SUPPORT_FLOOR && price < current {
            supports.push(Level {
                price,
                strength: strength(&mut rng),
            });
        }
    }

    let mut resistances = Vec::new();
    for i in 1..=LEVEL_COUNT {
        let price = current * (1.0 + LEVEL_STEP * i as f64) + jitter(&mut rng);
        if price < max_close * RESISTANCE_CEILING && price > current {
            resistances.push(Level {
                price,
                strength: strength(&mut rng),
            });
        }
    }

    Ok(SupportResistance {
        supports,
        resistances,
    })
}

fn jitter(rng: &mut StdRng) -> f64 {
    rng.gen_range(-JITTER..JITTER)
}

fn strength(rng: &mut StdRng) -> f64 {
    rng.gen_range(MIN_STRENGTH..MAX_STRENGTH)
}
