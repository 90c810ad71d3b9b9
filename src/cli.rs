//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::synthetic_data_adapter::SyntheticDataAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{DEFAULT_DAYS, analyze};
use crate::domain::config_validation::{
    DATE_FORMAT, parse_end_date, validate_analysis_config, validate_config, validate_news_config,
    validate_review_config, validate_screen_config,
};
use crate::domain::error::MarketLabError;
use crate::domain::indicator::compute_indicators;
use crate::domain::news::{NewsCategory, generate_news, hot_topics, latest_news};
use crate::domain::review::{MarketReview, simulate_moves, synthesize_review};
use crate::domain::screener::{ScreenConfig, ScreenResult, screen};
use crate::domain::seed::{Stream, seed_for};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_MIN_WIN_RATE: f64 = 50.0;
pub const DEFAULT_NEWS_COUNT: usize = 30;
pub const DEFAULT_NEWS_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "marketlab", about = "Synthetic market data and technical analysis")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one symbol: indicators, patterns, levels, trend, recommendation
    Analyze {
        symbol: String,
        #[arg(short, long)]
        days: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Also export bars and indicators to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print bars and indicator columns as CSV
    Indicators {
        symbol: String,
        #[arg(short, long)]
        days: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Screen the stock universe by historical win rate
    Screen {
        #[arg(long)]
        sector: Option<String>,
        #[arg(long)]
        min_win_rate: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print generated news headlines
    News {
        #[arg(long)]
        category: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Group headlines under hot topics
        #[arg(long)]
        hot: bool,
    },
    /// Print a synthesized market review
    Review {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            symbol,
            days,
            config,
            csv,
        } => run_analyze(&symbol, days, config.as_ref(), csv.as_ref()),
        Command::Indicators {
            symbol,
            days,
            config,
            csv,
        } => run_indicators(&symbol, days, config.as_ref(), csv.as_ref()),
        Command::Screen {
            sector,
            min_win_rate,
            config,
        } => run_screen(sector.as_deref(), min_win_rate, config.as_ref()),
        Command::News {
            category,
            limit,
            config,
            hot,
        } => run_news(category.as_deref(), limit, config.as_ref(), hot),
        Command::Review { seed, config } => run_review(seed, config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Load the INI file at `path`, or an empty config when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, MarketLabError> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// `[analysis] end_date`, or today.
pub fn reference_date(config: &dyn ConfigPort) -> Result<NaiveDate, MarketLabError> {
    Ok(parse_end_date(config)?.unwrap_or_else(|| Local::now().date_naive()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub days: usize,
    pub end_date: NaiveDate,
}

pub fn build_analysis_settings(
    config: &dyn ConfigPort,
    days_override: Option<usize>,
) -> Result<AnalysisSettings, MarketLabError> {
    validate_analysis_config(config)?;
    let days = match days_override {
        Some(days) => days,
        None => config.get_int("analysis", "days", DEFAULT_DAYS as i64) as usize,
    };
    if days < 1 {
        return Err(MarketLabError::InvalidHorizon { days });
    }
    Ok(AnalysisSettings {
        days,
        end_date: reference_date(config)?,
    })
}

pub fn build_screen_config(
    config: &dyn ConfigPort,
    sector_override: Option<&str>,
    min_win_rate_override: Option<f64>,
) -> Result<ScreenConfig, MarketLabError> {
    validate_screen_config(config)?;
    let min_win_rate = min_win_rate_override
        .unwrap_or_else(|| config.get_double("screen", "min_win_rate", DEFAULT_MIN_WIN_RATE));
    if !(0.0..=100.0).contains(&min_win_rate) {
        return Err(MarketLabError::ConfigInvalid {
            section: "screen".into(),
            key: "min_win_rate".into(),
            reason: "min_win_rate must be between 0 and 100".into(),
        });
    }
    Ok(ScreenConfig {
        sector: sector_override
            .map(str::to_string)
            .or_else(|| config.get_string("screen", "sector")),
        min_win_rate,
        end_date: reference_date(config)?,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsSettings {
    pub count: usize,
    pub limit: usize,
    pub category: Option<NewsCategory>,
    pub date: NaiveDate,
    pub seed: u64,
}

pub fn build_news_settings(
    config: &dyn ConfigPort,
    category_override: Option<&str>,
    limit_override: Option<usize>,
) -> Result<NewsSettings, MarketLabError> {
    validate_news_config(config)?;
    let date = reference_date(config)?;

    let category = match category_override
        .map(str::to_string)
        .or_else(|| config.get_string("news", "category"))
    {
        Some(label) => Some(NewsCategory::from_label(&label).ok_or_else(|| {
            MarketLabError::ConfigInvalid {
                section: "news".into(),
                key: "category".into(),
                reason: format!("unknown category '{label}'"),
            }
        })?),
        None => None,
    };

    let limit = limit_override
        .unwrap_or_else(|| config.get_int("news", "limit", DEFAULT_NEWS_LIMIT as i64) as usize);
    if limit < 1 {
        return Err(MarketLabError::ConfigInvalid {
            section: "news".into(),
            key: "limit".into(),
            reason: "limit must be at least 1".into(),
        });
    }

    Ok(NewsSettings {
        count: config.get_int("news", "count", DEFAULT_NEWS_COUNT as i64) as usize,
        limit,
        category,
        date,
        seed: configured_seed(config, "news", date, Stream::News),
    })
}

pub fn build_review_seed(
    config: &dyn ConfigPort,
    seed_override: Option<u64>,
) -> Result<(NaiveDate, u64), MarketLabError> {
    validate_review_config(config)?;
    let date = reference_date(config)?;
    let seed =
        seed_override.unwrap_or_else(|| configured_seed(config, "review", date, Stream::Review));
    Ok((date, seed))
}

/// `[section] seed` if set, otherwise a seed derived from the date.
fn configured_seed(config: &dyn ConfigPort, section: &str, date: NaiveDate, stream: Stream) -> u64 {
    match config.get_string(section, "seed") {
        Some(_) => config.get_int(section, "seed", 0) as u64,
        None => seed_for(&date.format(DATE_FORMAT).to_string(), stream),
    }
}

fn run_analyze(
    symbol: &str,
    days: Option<usize>,
    config_path: Option<&PathBuf>,
    csv_path: Option<&PathBuf>,
) -> Result<(), MarketLabError> {
    let config = load_config(config_path)?;
    let settings = build_analysis_settings(&config, days)?;
    let data = SyntheticDataAdapter::new(settings.end_date);

    let report = analyze(&data, symbol, settings.days)?;
    TextReportAdapter.write(&report, &mut io::stdout().lock())?;

    if let Some(path) = csv_path {
        let mut file = File::create(path)?;
        CsvExportAdapter.write(&report, &mut file)?;
        tracing::info!(path = %path.display(), "CSV written");
    }
    Ok(())
}

fn run_indicators(
    symbol: &str,
    days: Option<usize>,
    config_path: Option<&PathBuf>,
    csv_path: Option<&PathBuf>,
) -> Result<(), MarketLabError> {
    let config = load_config(config_path)?;
    let settings = build_analysis_settings(&config, days)?;
    let data = SyntheticDataAdapter::new(settings.end_date);

    let series = data.fetch_series(symbol, settings.days)?;
    let indicators = compute_indicators(&series)?;

    match csv_path {
        Some(path) => {
            let mut file = File::create(path)?;
            CsvExportAdapter.write_table(&series, &indicators, &mut file)?;
            tracing::info!(path = %path.display(), "CSV written");
        }
        None => CsvExportAdapter.write_table(&series, &indicators, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn run_screen(
    sector: Option<&str>,
    min_win_rate: Option<f64>,
    config_path: Option<&PathBuf>,
) -> Result<(), MarketLabError> {
    let config = load_config(config_path)?;
    let screen_config = build_screen_config(&config, sector, min_win_rate)?;
    let results = screen(&screen_config)?;

    let mut out = io::stdout().lock();
    write_screen_results(&results, &mut out)?;
    tracing::info!(matches = results.len(), "screen complete");
    Ok(())
}

pub fn write_screen_results(results: &[ScreenResult], out: &mut dyn Write) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No stocks match the screen");
    }
    for r in results {
        writeln!(
            out,
            "{:<6} {:<22} {:<18} win {:>5.1}%  last {:>8.2}  30d {:+6.2}%  {}",
            r.profile.symbol,
            r.profile.name,
            r.profile.sector,
            r.win_rate,
            r.last_price,
            r.price_change_pct,
            r.rationale
        )?;
    }
    Ok(())
}

fn run_news(
    category: Option<&str>,
    limit: Option<usize>,
    config_path: Option<&PathBuf>,
    hot: bool,
) -> Result<(), MarketLabError> {
    let config = load_config(config_path)?;
    let settings = build_news_settings(&config, category, limit)?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let items = generate_news(settings.count, settings.date, &mut rng)?;
    let mut out = io::stdout().lock();

    if hot {
        for topic in hot_topics(&items) {
            writeln!(out, "{} (heat {})", topic.keyword, topic.heat)?;
            for item in &topic.related {
                writeln!(out, "  {} {}", item.date, item.title)?;
            }
        }
        return Ok(());
    }

    for item in latest_news(&items, settings.category, settings.limit) {
        writeln!(
            out,
            "{} [{}] {} ({})",
            item.date, item.category, item.title, item.source
        )?;
    }
    Ok(())
}

fn run_review(seed: Option<u64>, config_path: Option<&PathBuf>) -> Result<(), MarketLabError> {
    let config = load_config(config_path)?;
    let (date, seed) = build_review_seed(&config, seed)?;
    tracing::debug!(seed, %date, "synthesizing review");

    let mut rng = StdRng::seed_from_u64(seed);
    let moves = simulate_moves(&mut rng);
    let review = synthesize_review(&moves.indices, &moves.sectors, date, &mut rng);

    write_review(&review, &mut io::stdout().lock())?;
    Ok(())
}

pub fn write_review(review: &MarketReview, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Market review {}", review.date)?;
    writeln!(out, "\nIndices")?;
    for m in &review.index_moves {
        writeln!(out, "  {:<20} {:+.2}%", m.name, m.change_pct)?;
    }
    writeln!(out, "\nSectors")?;
    for m in &review.sector_moves {
        writeln!(out, "  {:<20} {:+.2}%", m.name, m.change_pct)?;
    }
    writeln!(
        out,
        "\nSentiment: {}  Trend: {}",
        review.sentiment,
        review.trend.label()
    )?;
    writeln!(out, "\n{}", review.summary)
}

fn run_validate(config_path: &PathBuf) -> Result<(), MarketLabError> {
    let config = load_config(Some(config_path))?;
    validate_config(&config)?;
    println!("Config validated successfully: {}", config_path.display());
    Ok(())
}
