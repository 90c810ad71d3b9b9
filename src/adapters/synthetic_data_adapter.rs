//! Data adapter backed by the deterministic generator.

use chrono::NaiveDate;

use crate::domain::error::MarketLabError;
use crate::domain::generator::generate_series_ending;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::data_port::DataPort;

pub struct SyntheticDataAdapter {
    end_date: NaiveDate,
}

impl SyntheticDataAdapter {
    /// Series end on `end_date`.
    pub fn new(end_date: NaiveDate) -> Self {
        Self { end_date }
    }
}

impl DataPort for SyntheticDataAdapter {
    fn fetch_series(&self, symbol: &str, days: usize) -> Result<PriceSeries, MarketLabError> {
        generate_series_ending(symbol, days, self.end_date)
    }
}
