//! Price data access port trait.

use crate::domain::error::MarketLabError;
use crate::domain::ohlcv::PriceSeries;

pub trait DataPort {
    /// `days` daily bars for `symbol`, oldest first.
    fn fetch_series(&self, symbol: &str, days: usize) -> Result<PriceSeries, MarketLabError>;
}
