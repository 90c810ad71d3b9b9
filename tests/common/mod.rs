#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use marketlab::domain::error::MarketLabError;
use marketlab::domain::generator::generate_series_ending;
pub use marketlab::domain::ohlcv::{PriceBar, PriceSeries};
use marketlab::ports::data_port::DataPort;
use std::collections::HashMap;
use std::io::Write;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn end_date() -> NaiveDate {
    date(2024, 6, 30)
}

/// Flat OHLC bars at the given closes, one per day from 2024-01-01.
pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    PriceSeries {
        symbol: symbol.to_string(),
        bars: closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 100_000,
            })
            .collect(),
    }
}

/// Data port serving canned series, falling back to the generator.
pub struct MockDataPort {
    pub series: HashMap<String, PriceSeries>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.symbol.clone(), series);
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str, days: usize) -> Result<PriceSeries, MarketLabError> {
        match self.series.get(symbol) {
            Some(series) => Ok(series.clone()),
            None => generate_series_ending(symbol, days, end_date()),
        }
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
