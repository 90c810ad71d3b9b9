//! Stock screener over a fixed universe.
//!
//! Each stock gets a per-symbol win rate; stocks at or above the threshold are
//! returned with their latest price, 30-day change and a short rationale,
//! highest win rate first.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::error::MarketLabError;
use crate::domain::generator::generate_series_ending;
use crate::domain::narrative::{Candidates, TemplateContext, resolve};
use crate::domain::seed::{Stream, rng_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockProfile {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    pub industry: &'static str,
}

const fn profile(
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    industry: &'static str,
) -> StockProfile {
    StockProfile {
        symbol,
        name,
        sector,
        industry,
    }
}

pub const UNIVERSE: [StockProfile; 10] = [
    profile("AAPL", "Apple Inc.", "Technology", "Consumer Electronics"),
    profile("MSFT", "Microsoft Corp.", "Technology", "Software"),
    profile("GOOGL", "Alphabet Inc.", "Technology", "Internet"),
    profile("AMZN", "Amazon.com Inc.", "Consumer Services", "E-commerce"),
    profile("TSLA", "Tesla Inc.", "Automotive", "Electric Vehicles"),
    profile("NVDA", "NVIDIA Corp.", "Technology", "Semiconductors"),
    profile("META", "Meta Platforms Inc.", "Technology", "Social Media"),
    profile("BABA", "Alibaba Group", "Consumer Services", "E-commerce"),
    profile("TCEHY", "Tencent Holdings", "Technology", "Internet"),
    profile("TSM", "Taiwan Semiconductor", "Technology", "Semiconductors"),
];

pub const MIN_WIN_RATE: f64 = 40.0;
pub const MAX_WIN_RATE: f64 = 85.0;
pub const PRICE_WINDOW_DAYS: usize = 30;

pub const RATIONALE_TEMPLATES: [&str; 5] = [
    "Indicators point to a strong uptrend; historical win rate {win_rate}%",
    "Broke through key resistance with room to run; historical win rate {win_rate}%",
    "MACD golden cross confirms a buy signal; historical win rate {win_rate}%",
    "Price and volume move together with strong momentum; historical win rate {win_rate}%",
    "RSI recovering from oversold, rebound signal confirmed; historical win rate {win_rate}%",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub sector: Option<String>,
    pub min_win_rate: f64,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenResult {
    pub profile: StockProfile,
    pub win_rate: f64,
    pub last_price: f64,
    pub price_change_pct: f64,
    pub rationale: String,
}

/// Historical win rate (percent) assigned to `symbol`.
pub fn win_rate(symbol: &str) -> f64 {
    rng_for(symbol, Stream::WinRate).gen_range(MIN_WIN_RATE..MAX_WIN_RATE)
}

pub fn rationale(symbol: &str, win_rate: f64) -> String {
    let mut rng = rng_for(symbol, Stream::Rationale);
    let template = RATIONALE_TEMPLATES
        .choose(&mut rng)
        .copied()
        .unwrap_or(RATIONALE_TEMPLATES[0]);
    let context =
        TemplateContext::new().with("win_rate", Candidates::fixed(format!("{win_rate:.1}")));
    resolve(template, &context, &mut rng)
}

pub fn screen(config: &ScreenConfig) -> Result<Vec<ScreenResult>, MarketLabError> {
    let mut results = Vec::new();

    for profile in UNIVERSE {
        if let Some(sector) = &config.sector
            && !profile.sector.eq_ignore_ascii_case(sector)
        {
            continue;
        }

        let rate = win_rate(profile.symbol);
        if rate < config.min_win_rate {
            tracing::debug!(symbol = profile.symbol, win_rate = rate, "below threshold");
            continue;
        }

        let series = generate_series_ending(profile.symbol, PRICE_WINDOW_DAYS, config.end_date)?;
        let (Some(last_price), Some(price_change_pct)) = (series.last_close(), series.change_pct())
        else {
            return Err(MarketLabError::empty_series("screen"));
        };

        results.push(ScreenResult {
            profile,
            win_rate: rate,
            last_price,
            price_change_pct,
            rationale: rationale(profile.symbol, rate),
        });
    }

    results.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    Ok(results)
}
