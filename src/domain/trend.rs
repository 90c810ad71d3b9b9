//! Trend assessment.

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use crate::domain::seed::{Stream, rng_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Up => "Uptrend",
            TrendDirection::Down => "Downtrend",
            TrendDirection::Sideways => "Sideways range",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Sideways => "sideways",
        };
        f.write_str(name)
    }
}

pub const DIRECTION_WEIGHTS: [(TrendDirection, f64); 3] = [
    (TrendDirection::Up, 0.4),
    (TrendDirection::Down, 0.3),
    (TrendDirection::Sideways, 0.3),
];
pub const MIN_STRENGTH: f64 = 0.6;
pub const MAX_STRENGTH: f64 = 0.95;
pub const MIN_DURATION: u32 = 10;
pub const MAX_DURATION: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAssessment {
    pub direction: TrendDirection,
    pub strength: f64,
    pub duration_days: u32,
}

impl TrendAssessment {
    /// e.g. "Uptrend has persisted for 23 days, strength 0.81".
    pub fn description(&self) -> String {
        format!(
            "{} has persisted for {} days, strength {:.2}",
            self.direction.label(),
            self.duration_days,
            self.strength
        )
    }
}

pub fn assess_trend(symbol: &str) -> TrendAssessment {
    let mut rng = rng_for(symbol, Stream::Trend);

    let direction = DIRECTION_WEIGHTS
        .choose_weighted(&mut rng, |(_, weight)| *weight)
        .map(|(direction, _)| *direction)
        .unwrap_or(TrendDirection::Sideways);
    let strength = rng.gen_range(MIN_STRENGTH..MAX_STRENGTH);
    let duration_days = rng.gen_range(MIN_DURATION..MAX_DURATION);

    TrendAssessment {
        direction,
        strength,
        duration_days,
    }
}
