//! Structural classification of a symbol's price series.
//!
//! Each sub-operation draws from its own seeded stream, so the result for a
//! symbol does not depend on which other sub-operations were run first.

use crate::domain::error::MarketLabError;
use crate::domain::levels::{SupportResistance, identify_levels};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::pattern::{Pattern, detect_patterns};
use crate::domain::trend::{TrendAssessment, assess_trend};

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub patterns: Vec<Pattern>,
    pub levels: SupportResistance,
    pub trend: TrendAssessment,
}

pub fn classify(symbol: &str, series: &PriceSeries) -> Result<Classification, MarketLabError> {
    if series.is_empty() {
        return Err(MarketLabError::empty_series("classify"));
    }

    let patterns = detect_patterns(symbol);
    let levels = identify_levels(symbol, series)?;
    let trend = assess_trend(symbol);

    tracing::debug!(
        symbol,
        patterns = patterns.len(),
        supports = levels.supports.len(),
        resistances = levels.resistances.len(),
        direction = %trend.direction,
        "classified series"
    );

    Ok(Classification {
        patterns,
        levels,
        trend,
    })
}
