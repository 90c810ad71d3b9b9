//! Single-symbol analysis pipeline.
//!
//! fetch series → indicators + classification → recommendation.

use crate::domain::classifier::{Classification, classify};
use crate::domain::error::MarketLabError;
use crate::domain::indicator::{IndicatorSeries, compute_indicators};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::recommendation::{Recommendation, recommend};
use crate::ports::data_port::DataPort;

pub const DEFAULT_DAYS: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub symbol: String,
    pub series: PriceSeries,
    pub indicators: IndicatorSeries,
    pub classification: Classification,
    pub recommendation: Recommendation,
}

impl AnalysisReport {
    pub fn last_close(&self) -> Option<f64> {
        self.series.last_close()
    }

    pub fn trend_description(&self) -> String {
        self.classification.trend.description()
    }
}

pub fn analyze(
    data: &dyn DataPort,
    symbol: &str,
    days: usize,
) -> Result<AnalysisReport, MarketLabError> {
    let series = data.fetch_series(symbol, days)?;
    let indicators = compute_indicators(&series)?;
    let classification = classify(symbol, &series)?;
    let recommendation = recommend(&classification.trend, &classification.patterns);

    tracing::info!(
        symbol,
        days,
        action = %recommendation.action,
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        series,
        indicators,
        classification,
        recommendation,
    })
}
