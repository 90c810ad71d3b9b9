//! OHLCV bar and price series representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Chronological bars for one symbol, one per calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Percent change from the first close to the last close.
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.bars.first()?.close;
        let last = self.bars.last()?.close;
        Some((last / first - 1.0) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> PriceSeries {
        let bar = |day: u32, close: f64| PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 50_000,
        };
        PriceSeries {
            symbol: "BHP".into(),
            bars: vec![bar(1, 100.0), bar(2, 105.0), bar(3, 110.0)],
        }
    }

    #[test]
    fn closes_in_order() {
        assert_eq!(sample_series().closes(), vec![100.0, 105.0, 110.0]);
    }

    #[test]
    fn last_close() {
        assert_eq!(sample_series().last_close(), Some(110.0));
    }

    #[test]
    fn change_pct() {
        let pct = sample_series().change_pct().unwrap();
        assert!((pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_has_no_change() {
        let series = PriceSeries {
            symbol: "X".into(),
            bars: vec![],
        };
        assert!(series.is_empty());
        assert_eq!(series.change_pct(), None);
        assert_eq!(series.last_close(), None);
    }
}
