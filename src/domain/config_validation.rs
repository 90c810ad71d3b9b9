//! Configuration validation.
//!
//! Validates every config section before a command runs.

use crate::domain::error::MarketLabError;
use crate::domain::news::NewsCategory;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    validate_analysis_config(config)?;
    validate_screen_config(config)?;
    validate_news_config(config)?;
    validate_review_config(config)?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    validate_days(config)?;
    validate_end_date(config)?;
    Ok(())
}

pub fn validate_screen_config(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    let value = config.get_double("screen", "min_win_rate", 50.0);
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid("screen", "min_win_rate", "min_win_rate must be between 0 and 100"));
    }
    validate_end_date(config)
}

pub fn validate_news_config(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    if config.get_int("news", "count", 30) < 0 {
        return Err(invalid("news", "count", "count must be non-negative"));
    }
    if config.get_int("news", "limit", 10) < 1 {
        return Err(invalid("news", "limit", "limit must be at least 1"));
    }
    if let Some(category) = config.get_string("news", "category")
        && NewsCategory::from_label(&category).is_none()
    {
        return Err(invalid(
            "news",
            "category",
            "category must be one of company, earnings, industry, policy, market",
        ));
    }
    validate_seed(config, "news")
}

pub fn validate_review_config(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    validate_seed(config, "review")
}

/// Parse `[analysis] end_date`, `None` when unset.
pub fn parse_end_date(config: &dyn ConfigPort) -> Result<Option<NaiveDate>, MarketLabError> {
    match config.get_string("analysis", "end_date") {
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                invalid(
                    "analysis",
                    "end_date",
                    "invalid date format (expected YYYY-MM-DD)",
                )
            }),
        None => Ok(None),
    }
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    if config.get_int("analysis", "days", 60) < 1 {
        return Err(invalid("analysis", "days", "days must be at least 1"));
    }
    Ok(())
}

fn validate_end_date(config: &dyn ConfigPort) -> Result<(), MarketLabError> {
    parse_end_date(config).map(|_| ())
}

fn validate_seed(config: &dyn ConfigPort, section: &str) -> Result<(), MarketLabError> {
    if config.get_string(section, "seed").is_some() && config.get_int(section, "seed", -1) < 0 {
        return Err(invalid(section, "seed", "seed must be a non-negative integer"));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> MarketLabError {
    MarketLabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
