//! Daily market review.
//!
//! The review is built from index and sector moves: the market trend comes
//! from the mean index change, best/worst sectors from the sector moves, and
//! sentiment plus the remaining wording are drawn from the caller's rng.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use crate::domain::narrative::{Candidates, TemplateContext, resolve};

#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub name: String,
    pub change_pct: f64,
}

impl Move {
    pub fn new(name: impl Into<String>, change_pct: f64) -> Self {
        Self {
            name: name.into(),
            change_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Optimistic,
    Cautious,
    Neutral,
    Pessimistic,
    Panicked,
}

pub const SENTIMENT_WEIGHTS: [(Sentiment, f64); 5] = [
    (Sentiment::Optimistic, 0.2),
    (Sentiment::Cautious, 0.3),
    (Sentiment::Neutral, 0.3),
    (Sentiment::Pessimistic, 0.15),
    (Sentiment::Panicked, 0.05),
];

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Optimistic => "optimistic",
            Sentiment::Cautious => "cautious",
            Sentiment::Neutral => "neutral",
            Sentiment::Pessimistic => "pessimistic",
            Sentiment::Panicked => "panicked",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SENTIMENT_WEIGHTS
            .iter()
            .map(|(s, _)| *s)
            .find(|s| s.label() == label)
    }

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Candidates::weighted(SENTIMENT_WEIGHTS.map(|(s, w)| (s.label(), w)))
            .draw(rng)
            .and_then(Sentiment::from_label)
            .unwrap_or(Sentiment::Neutral)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketTrend {
    SharpRise,
    MildRise,
    Flat,
    MildFall,
    SharpFall,
}

impl MarketTrend {
    /// Bucket a mean percentage change.
    pub fn from_mean_change(mean: f64) -> Self {
        if mean > 1.0 {
            MarketTrend::SharpRise
        } else if mean > 0.3 {
            MarketTrend::MildRise
        } else if mean > -0.3 {
            MarketTrend::Flat
        } else if mean > -1.0 {
            MarketTrend::MildFall
        } else {
            MarketTrend::SharpFall
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketTrend::SharpRise => "sharp rise",
            MarketTrend::MildRise => "mild rise",
            MarketTrend::Flat => "flat",
            MarketTrend::MildFall => "mild fall",
            MarketTrend::SharpFall => "sharp fall",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketReview {
    pub date: NaiveDate,
    pub index_moves: Vec<Move>,
    /// Sorted by change, best first.
    pub sector_moves: Vec<Move>,
    pub sentiment: Sentiment,
    pub trend: MarketTrend,
    pub summary: String,
}

pub const REVIEW_TEMPLATES: [&str; 3] = [
    "Market direction today: {trend}. {best_sector} performed best and {worst_sector} fell the \
     most. Sentiment was {sentiment}, with {reason} the main influence.",
    "{main_index} today: {trend}, with volume {volume_change}. Driven by {reason}, sentiment was \
     {sentiment}. Next, watch {focus}.",
    "Under the influence of {reason}, today's market: {trend}. By sector, {best_sector} led gains \
     and {worst_sector} led losses. Overall sentiment: {sentiment}.",
];

pub const REASONS: [&str; 6] = [
    "overseas market moves",
    "supportive policy news",
    "better-than-expected economic data",
    "tighter liquidity",
    "profit-taking pressure",
    "cautious positioning",
];

pub const VOLUME_CHANGES: [&str; 5] = [
    "sharply higher",
    "slightly higher",
    "roughly unchanged",
    "slightly lower",
    "sharply lower",
];

pub const FOCUS_POINTS: [&str; 6] = [
    "policy moves",
    "liquidity conditions",
    "overseas volatility",
    "key economic data",
    "sector rotation",
    "whether current themes hold",
];

/// Mean of the index changes; 0 when there are none.
pub fn mean_change(moves: &[Move]) -> f64 {
    if moves.is_empty() {
        return 0.0;
    }
    moves.iter().map(|m| m.change_pct).sum::<f64>() / moves.len() as f64
}

pub fn synthesize_review<R: Rng + ?Sized>(
    indices: &[Move],
    sectors: &[Move],
    date: NaiveDate,
    rng: &mut R,
) -> MarketReview {
    let sentiment = Sentiment::draw(rng);
    let template = REVIEW_TEMPLATES.choose(rng).copied().unwrap_or(REVIEW_TEMPLATES[0]);

    let mut sector_moves = sectors.to_vec();
    sector_moves.sort_by(|a, b| b.change_pct.total_cmp(&a.change_pct));

    let trend = MarketTrend::from_mean_change(mean_change(indices));

    let mut context = TemplateContext::new()
        .with("trend", Candidates::fixed(trend.label()))
        .with("sentiment", Candidates::fixed(sentiment.label()))
        .with("volume_change", Candidates::uniform(VOLUME_CHANGES))
        .with("focus", Candidates::uniform(FOCUS_POINTS));

    // One driver explains the whole session.
    if let Some(reason) = REASONS.choose(rng) {
        context.insert("reason", Candidates::fixed(*reason));
    }
    if let (Some(best), Some(worst)) = (sector_moves.first(), sector_moves.last()) {
        context.insert("best_sector", Candidates::fixed(best.name.as_str()));
        context.insert("worst_sector", Candidates::fixed(worst.name.as_str()));
    }
    if let Some(main) = indices.first() {
        context.insert("main_index", Candidates::fixed(main.name.as_str()));
    }

    let summary = resolve(template, &context, rng);

    MarketReview {
        date,
        index_moves: indices.to_vec(),
        sector_moves,
        sentiment,
        trend,
        summary,
    }
}

/// Index and sector moves for one simulated session.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketMoves {
    pub indices: Vec<Move>,
    pub sectors: Vec<Move>,
}

/// (name, max absolute percent change)
pub const INDEX_RANGES: [(&str, f64); 4] = [
    ("Shanghai Composite", 1.5),
    ("Shenzhen Component", 1.8),
    ("ChiNext", 2.0),
    ("STAR 50", 2.2),
];

pub const SECTOR_RANGES: [(&str, f64); 6] = [
    ("Technology", 2.5),
    ("Financials", 1.5),
    ("Healthcare", 2.0),
    ("Consumer", 1.8),
    ("New Energy", 3.0),
    ("Semiconductors", 3.5),
];

pub fn simulate_moves<R: Rng + ?Sized>(rng: &mut R) -> MarketMoves {
    let mut draw = |ranges: &[(&str, f64)]| -> Vec<Move> {
        ranges
            .iter()
            .map(|&(name, bound)| Move::new(name, rng.gen_range(-bound..bound)))
            .collect()
    };
    let indices = draw(&INDEX_RANGES[..]);
    let sectors = draw(&SECTOR_RANGES[..]);
    MarketMoves { indices, sectors }
}
