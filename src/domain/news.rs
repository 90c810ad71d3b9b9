//! Synthetic news feed.
//!
//! Headlines come from a fixed set of templates filled from vocabulary lists
//! through the template engine. Item `i` uses template `i % 5`, so every batch
//! cycles through all categories.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use crate::domain::error::MarketLabError;
use crate::domain::narrative::{Candidates, TemplateContext, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    CompanyNews,
    Earnings,
    IndustryAnalysis,
    Policy,
    MarketMovement,
}

pub const CATEGORIES: [NewsCategory; 5] = [
    NewsCategory::CompanyNews,
    NewsCategory::Earnings,
    NewsCategory::IndustryAnalysis,
    NewsCategory::Policy,
    NewsCategory::MarketMovement,
];

impl NewsCategory {
    pub fn label(self) -> &'static str {
        match self {
            NewsCategory::CompanyNews => "company",
            NewsCategory::Earnings => "earnings",
            NewsCategory::IndustryAnalysis => "industry",
            NewsCategory::Policy => "policy",
            NewsCategory::MarketMovement => "market",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        CATEGORIES.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub date: NaiveDate,
    pub source: &'static str,
    pub category: NewsCategory,
    pub summary: String,
}

pub const HEADLINE_TEMPLATES: [(&str, NewsCategory); 5] = [
    (
        "{company} unveils next-generation {product}; {feature} draws market attention",
        NewsCategory::CompanyNews,
    ),
    (
        "{company} Q{quarter} results beat expectations, {growth_driver} stands out",
        NewsCategory::Earnings,
    ),
    (
        "{analyst}: {industry} at an inflection point, {driver} to fuel long-term growth",
        NewsCategory::IndustryAnalysis,
    ),
    (
        "{country} announces new {policy}; {impact} stirs the market",
        NewsCategory::Policy,
    ),
    (
        "{index} hits {period} high as {sector} leads",
        NewsCategory::MarketMovement,
    ),
];

pub const SOURCES: [&str; 6] = [
    "Caixin",
    "Securities Times",
    "Economic Daily",
    "The Wall Street Journal",
    "Bloomberg",
    "Reuters",
];

/// Items are dated up to this many days before `today` (exclusive).
pub const MAX_AGE_DAYS: u64 = 7;

pub fn headline_context() -> TemplateContext {
    TemplateContext::new()
        .with(
            "company",
            Candidates::uniform([
                "Apple", "Microsoft", "Google", "Amazon", "Tesla", "Alibaba", "Tencent", "Baidu",
                "JD.com", "Meituan",
            ]),
        )
        .with(
            "product",
            Candidates::uniform([
                "smartphone",
                "cloud service",
                "AI platform",
                "electric vehicle",
                "chip",
                "operating system",
                "payment service",
            ]),
        )
        .with(
            "feature",
            Candidates::uniform([
                "innovative design",
                "performance gains",
                "aggressive pricing",
                "a better user experience",
                "a technical breakthrough",
            ]),
        )
        .with("quarter", Candidates::uniform(["1", "2", "3", "4"]))
        .with(
            "growth_driver",
            Candidates::uniform([
                "revenue",
                "profit",
                "user growth",
                "overseas sales",
                "new business",
            ]),
        )
        .with(
            "analyst",
            Candidates::uniform([
                "Goldman Sachs",
                "Morgan Stanley",
                "CICC",
                "Huatai Securities",
                "Nomura",
            ]),
        )
        .with(
            "industry",
            Candidates::uniform([
                "technology",
                "new energy",
                "healthcare",
                "consumer",
                "finance",
                "manufacturing",
            ]),
        )
        .with(
            "driver",
            Candidates::uniform([
                "policy support",
                "technical innovation",
                "rising demand",
                "industrial upgrading",
                "global expansion",
            ]),
        )
        .with(
            "country",
            Candidates::uniform(["China", "The US", "The EU", "Japan", "India"]),
        )
        .with(
            "policy",
            Candidates::uniform([
                "fiscal stimulus plan",
                "monetary policy adjustment",
                "industrial support policy",
                "regulatory measures",
                "tax reform",
            ]),
        )
        .with(
            "impact",
            Candidates::uniform([
                "a boost for tech stocks",
                "renewed confidence",
                "inflation worries",
                "heightened volatility",
                "a reshaped industry landscape",
            ]),
        )
        .with(
            "index",
            Candidates::uniform([
                "Shanghai Composite",
                "Shenzhen Component",
                "ChiNext",
                "Dow Jones",
                "Nasdaq",
            ]),
        )
        .with(
            "period",
            Candidates::uniform([
                "year-to-date",
                "three-year",
                "all-time",
                "five-year",
                "quarterly",
            ]),
        )
        .with(
            "sector",
            Candidates::uniform([
                "technology",
                "financials",
                "healthcare",
                "consumer",
                "new energy",
                "semiconductors",
            ]),
        )
}

/// Generate `count` items, newest first.
///
/// Fails when `today` is too close to the earliest representable date to
/// date an item up to [`MAX_AGE_DAYS`] back.
pub fn generate_news<R: Rng + ?Sized>(
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<NewsItem>, MarketLabError> {
    let out_of_range = MarketLabError::DateOutOfRange {
        date: today,
        days: (MAX_AGE_DAYS - 1) as usize,
    };
    if count > 0 && today.checked_sub_days(Days::new(MAX_AGE_DAYS - 1)).is_none() {
        return Err(out_of_range);
    }

    let context = headline_context();
    let mut items = Vec::with_capacity(count);

    for i in 0..count {
        let (template, category) = HEADLINE_TEMPLATES[i % HEADLINE_TEMPLATES.len()];
        let title = resolve(template, &context, rng);
        let days_ago = rng.gen_range(0..MAX_AGE_DAYS);
        let Some(date) = today.checked_sub_days(Days::new(days_ago)) else {
            return Err(out_of_range);
        };
        let source = SOURCES.choose(rng).copied().unwrap_or(SOURCES[0]);
        let summary = format!("Briefing on \"{title}\": background, impact analysis and outlook.");

        items.push(NewsItem {
            title,
            date,
            source,
            category,
            summary,
        });
    }

    items.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(items)
}

/// Up to `limit` items, optionally restricted to one category, preserving order.
pub fn latest_news(
    items: &[NewsItem],
    category: Option<NewsCategory>,
    limit: usize,
) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .take(limit)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotTopic {
    pub keyword: &'static str,
    pub heat: u32,
    pub related: Vec<NewsItem>,
}

pub const HOT_TOPICS: [(&str, u32); 5] = [
    ("Artificial intelligence", 95),
    ("Electric vehicles", 88),
    ("Semiconductors", 82),
    ("Metaverse", 75),
    ("Digital currency", 70),
];

pub const ITEMS_PER_TOPIC: usize = 3;

/// Each topic takes the next three items of the feed in order.
pub fn hot_topics(items: &[NewsItem]) -> Vec<HotTopic> {
    HOT_TOPICS
        .iter()
        .enumerate()
        .map(|(i, &(keyword, heat))| {
            let start = (i * ITEMS_PER_TOPIC).min(items.len());
            let end = (start + ITEMS_PER_TOPIC).min(items.len());
            HotTopic {
                keyword,
                heat,
                related: items[start..end].to_vec(),
            }
        })
        .collect()
}
