//! Rule-based trading recommendation.
//!
//! Decision table, first match wins:
//! - up, strength > 0.7, bullish reversal present   → strong buy
//! - up, strength > 0.7                             → buy
//! - down, strength > 0.7, bearish reversal present → strong sell
//! - down, strength > 0.7                           → sell
//! - anything else                                  → hold

use std::fmt;

use crate::domain::pattern::{Pattern, PatternCategory};
use crate::domain::trend::{TrendAssessment, TrendDirection};

pub const STRONG_TREND: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::StrongBuy => "strong-buy",
            Action::Buy => "buy",
            Action::Hold => "hold",
            Action::Sell => "sell",
            Action::StrongSell => "strong-sell",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub action: Action,
    pub rationale: String,
}

pub fn recommend(trend: &TrendAssessment, patterns: &[Pattern]) -> Recommendation {
    let has = |category: PatternCategory| patterns.iter().any(|p| p.category == category);
    let strong = trend.strength > STRONG_TREND;

    let (action, rationale) = match trend.direction {
        TrendDirection::Up if strong && has(PatternCategory::BullishReversal) => (
            Action::StrongBuy,
            "strong uptrend with a confirming bullish-reversal pattern",
        ),
        TrendDirection::Up if strong => (Action::Buy, "clear uptrend"),
        TrendDirection::Down if strong && has(PatternCategory::BearishReversal) => (
            Action::StrongSell,
            "strong downtrend with a confirming bearish-reversal pattern",
        ),
        TrendDirection::Down if strong => {
            (Action::Sell, "clear downtrend, risk avoidance advised")
        }
        _ => (Action::Hold, "trend unclear, await a clearer signal"),
    };

    Recommendation {
        action,
        rationale: rationale.to_string(),
    }
}
