//! Core domain types and logic.

pub mod ohlcv;
pub mod seed;
pub mod generator;
pub mod indicator;
pub mod pattern;
pub mod levels;
pub mod trend;
pub mod classifier;
pub mod recommendation;
pub mod analysis;
pub mod narrative;
pub mod news;
pub mod review;
pub mod screener;
pub mod config_validation;
pub mod error;
