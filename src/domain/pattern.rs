//! Chart pattern catalog and detection.
//!
//! Detection attaches catalog entries by seeded sampling. It does not inspect
//! the shape of the price series; a pattern here is descriptive metadata for a
//! symbol, reproducible per symbol.

use rand::Rng;
use rand::seq::index;
use std::fmt;

use crate::domain::seed::{Stream, rng_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    BullishReversal,
    BearishReversal,
    Continuation,
    /// Reversal with no implied direction.
    Reversal,
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternCategory::BullishReversal => "bullish-reversal",
            PatternCategory::BearishReversal => "bearish-reversal",
            PatternCategory::Continuation => "continuation",
            PatternCategory::Reversal => "reversal",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pattern {
    pub name: &'static str,
    pub category: PatternCategory,
    pub confidence: f64,
    pub description: &'static str,
}

pub const CATALOG: [Pattern; 7] = [
    Pattern {
        name: "Head and Shoulders Top",
        category: PatternCategory::BearishReversal,
        confidence: 0.85,
        description: "Three peaks with the middle one highest and the outer two roughly level; \
                      the uptrend is likely ending.",
    },
    Pattern {
        name: "Inverse Head and Shoulders",
        category: PatternCategory::BullishReversal,
        confidence: 0.78,
        description: "Three troughs with the middle one lowest and the outer two roughly level; \
                      the downtrend is likely ending.",
    },
    Pattern {
        name: "Double Top",
        category: PatternCategory::BearishReversal,
        confidence: 0.82,
        description: "Price touches a similar high twice and pulls back; \
                      the uptrend is likely ending.",
    },
    Pattern {
        name: "Double Bottom",
        category: PatternCategory::BullishReversal,
        confidence: 0.75,
        description: "Price touches a similar low twice and rebounds; \
                      the downtrend is likely ending.",
    },
    Pattern {
        name: "Triangle",
        category: PatternCategory::Continuation,
        confidence: 0.68,
        description: "Swings narrow into a triangle, usually a pause within the current trend.",
    },
    Pattern {
        name: "Flag",
        category: PatternCategory::Continuation,
        confidence: 0.72,
        description: "A small rectangular consolidation inside a strong trend; \
                      the trend usually resumes.",
    },
    Pattern {
        name: "Wedge",
        category: PatternCategory::Reversal,
        confidence: 0.65,
        description: "A narrowing channel sloped against the trend, often ahead of a reversal.",
    },
];

pub const MAX_PATTERNS: usize = 3;

/// Pick 1 to [`MAX_PATTERNS`] distinct catalog entries for `symbol`.
pub fn detect_patterns(symbol: &str) -> Vec<Pattern> {
    let mut rng = rng_for(symbol, Stream::Patterns);
    let count = rng.gen_range(1..=MAX_PATTERNS);

    index::sample(&mut rng, CATALOG.len(), count)
        .into_iter()
        .map(|i| CATALOG[i])
        .collect()
}
