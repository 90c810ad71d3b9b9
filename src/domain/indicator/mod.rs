//! Technical indicator implementations.
//!
//! This module provides:
//! - `IndicatorType`: indicator identity + parameters (serves as map key)
//! - `IndicatorSeries`: every indicator of a price series as nullable columns,
//!   index-aligned with the bars
//! - `compute_indicators`: the fixed pipeline (SMA5/10/20, EMA12/26, MACD,
//!   Signal, Histogram, RSI14)

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::MarketLabError;
use crate::domain::ohlcv::PriceSeries;

pub use ema::calculate_ema;
pub use macd::{MacdLines, calculate_macd, calculate_macd_default};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

pub const SMA_PERIODS: [usize; 3] = [5, 10, 20];
pub const EMA_PERIODS: [usize; 2] = [macd::DEFAULT_FAST, macd::DEFAULT_SLOW];
pub const RSI_PERIOD: usize = 14;

/// Declaration order is the column order used by reports and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Macd,
    Signal,
    Histogram,
    Rsi(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA{}", period),
            IndicatorType::Ema(period) => write!(f, "EMA{}", period),
            IndicatorType::Macd => write!(f, "MACD"),
            IndicatorType::Signal => write!(f, "Signal"),
            IndicatorType::Histogram => write!(f, "Histogram"),
            IndicatorType::Rsi(period) => write!(f, "RSI{}", period),
        }
    }
}

/// Indicator columns for one price series. `None` marks an unfilled window.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub dates: Vec<NaiveDate>,
    pub columns: BTreeMap<IndicatorType, Vec<Option<f64>>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, indicator: IndicatorType) -> Option<&[Option<f64>]> {
        self.columns.get(&indicator).map(Vec::as_slice)
    }

    /// Value of `indicator` at bar `index`, `None` if missing or still warming up.
    pub fn value(&self, indicator: IndicatorType, index: usize) -> Option<f64> {
        self.get(indicator)?.get(index).copied().flatten()
    }

    pub fn latest(&self, indicator: IndicatorType) -> Option<f64> {
        self.value(indicator, self.len().checked_sub(1)?)
    }

    pub fn indicator_types(&self) -> impl Iterator<Item = IndicatorType> + '_ {
        self.columns.keys().copied()
    }
}

pub fn compute_indicators(series: &PriceSeries) -> Result<IndicatorSeries, MarketLabError> {
    if series.is_empty() {
        return Err(MarketLabError::empty_series("compute_indicators"));
    }

    let closes = series.closes();
    let mut columns = BTreeMap::new();

    for period in SMA_PERIODS {
        columns.insert(IndicatorType::Sma(period), calculate_sma(&closes, period));
    }
    for period in EMA_PERIODS {
        columns.insert(IndicatorType::Ema(period), defined(calculate_ema(&closes, period)));
    }

    let lines = calculate_macd_default(&closes);
    columns.insert(IndicatorType::Macd, defined(lines.macd));
    columns.insert(IndicatorType::Signal, defined(lines.signal));
    columns.insert(IndicatorType::Histogram, defined(lines.histogram));

    columns.insert(IndicatorType::Rsi(RSI_PERIOD), calculate_rsi(&closes, RSI_PERIOD));

    tracing::debug!(symbol = %series.symbol, bars = closes.len(), "computed indicators");

    Ok(IndicatorSeries {
        dates: series.dates(),
        columns,
    })
}

fn defined(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}
