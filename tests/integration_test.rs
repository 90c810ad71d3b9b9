//! Integration tests for the analysis pipeline.
//!
//! Tests cover:
//! - End-to-end analysis of a generated 30-day series
//! - Indicator warmup and known values on hand-built series
//! - Recommendation decision table over every trend/pattern combination
//! - Reproducibility of the per-symbol pipeline
//! - Report adapters driven by a full analysis

mod common;

use approx::assert_relative_eq;
use common::*;
use marketlab::adapters::csv_adapter::CsvExportAdapter;
use marketlab::adapters::text_report_adapter::TextReportAdapter;
use marketlab::domain::analysis::analyze;
use marketlab::domain::error::MarketLabError;
use marketlab::domain::indicator::IndicatorType;
use marketlab::domain::pattern::{CATALOG, PatternCategory};
use marketlab::domain::recommendation::{Action, recommend};
use marketlab::domain::trend::{TrendAssessment, TrendDirection};
use marketlab::ports::report_port::ReportPort;

const SMA20: IndicatorType = IndicatorType::Sma(20);
const RSI14: IndicatorType = IndicatorType::Rsi(14);

mod end_to_end {
    use super::*;

    #[test]
    fn aapl_thirty_days() {
        let report = analyze(&MockDataPort::new(), "AAPL", 30).unwrap();
        let closes = report.series.closes();

        assert_eq!(report.series.len(), 30);
        assert_eq!(report.indicators.len(), 30);
        assert_eq!(report.series.bars.last().unwrap().date, end_date());

        for i in 0..19 {
            assert_eq!(report.indicators.value(SMA20, i), None, "SMA20[{i}]");
        }
        let expected = closes[..20].iter().sum::<f64>() / 20.0;
        assert_relative_eq!(
            report.indicators.value(SMA20, 19).unwrap(),
            expected,
            max_relative = 1e-12
        );

        for i in 0..14 {
            assert_eq!(report.indicators.value(RSI14, i), None, "RSI14[{i}]");
        }
        for i in 14..30 {
            let rsi = report.indicators.value(RSI14, i).unwrap();
            assert!((0.0..=100.0).contains(&rsi));
        }
    }

    #[test]
    fn recommendation_follows_classification() {
        let report = analyze(&MockDataPort::new(), "NVDA", 60).unwrap();
        let expected = recommend(&report.classification.trend, &report.classification.patterns);
        assert_eq!(report.recommendation, expected);
        assert!(!report.classification.patterns.is_empty());
        assert!(report.classification.patterns.len() <= 3);
    }

    #[test]
    fn levels_bracket_last_close() {
        for symbol in ["AAPL", "MSFT", "TSLA", "BABA", "TSM"] {
            let report = analyze(&MockDataPort::new(), symbol, 60).unwrap();
            let close = report.last_close().unwrap();
            let levels = &report.classification.levels;
            assert!(levels.supports.iter().all(|l| l.price < close));
            assert!(levels.resistances.iter().all(|l| l.price > close));
        }
    }

    #[test]
    fn pipeline_is_reproducible() {
        let a = analyze(&MockDataPort::new(), "GOOGL", 45).unwrap();
        let b = analyze(&MockDataPort::new(), "GOOGL", 45).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_series_is_an_error() {
        let port = MockDataPort::new().with_series(make_series("EMPTY", &[]));
        let err = analyze(&port, "EMPTY", 10).unwrap_err();
        assert!(matches!(err, MarketLabError::EmptySeries { .. }));
    }

    #[test]
    fn zero_days_is_an_error() {
        let err = analyze(&MockDataPort::new(), "AAPL", 0).unwrap_err();
        assert!(matches!(err, MarketLabError::InvalidHorizon { days: 0 }));
    }
}

mod known_values {
    use super::*;

    fn linear(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn sma_on_linear_series() {
        let port = MockDataPort::new().with_series(make_series("LIN", &linear(25)));
        let report = analyze(&port, "LIN", 25).unwrap();
        assert_relative_eq!(report.indicators.value(IndicatorType::Sma(5), 4).unwrap(), 3.0);
        assert_relative_eq!(report.indicators.value(IndicatorType::Sma(10), 24).unwrap(), 20.5);
        assert_relative_eq!(report.indicators.value(SMA20, 19).unwrap(), 10.5);
    }

    #[test]
    fn ema_continuity() {
        let closes = [100.0, 113.0, 90.0, 104.0];
        let port = MockDataPort::new().with_series(make_series("EMA", &closes));
        let report = analyze(&port, "EMA", 4).unwrap();
        let ema12 = IndicatorType::Ema(12);

        assert_relative_eq!(report.indicators.value(ema12, 0).unwrap(), 100.0);
        let mut expected = 100.0;
        for (i, close) in closes.iter().enumerate().skip(1) {
            expected = 2.0 / 13.0 * close + 11.0 / 13.0 * expected;
            assert_relative_eq!(
                report.indicators.value(ema12, i).unwrap(),
                expected,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn macd_starts_at_zero() {
        let port = MockDataPort::new().with_series(make_series("M", &linear(30)));
        let report = analyze(&port, "M", 30).unwrap();
        assert_eq!(report.indicators.value(IndicatorType::Macd, 0), Some(0.0));
        assert_eq!(report.indicators.value(IndicatorType::Signal, 0), Some(0.0));
        assert_eq!(report.indicators.value(IndicatorType::Histogram, 0), Some(0.0));
        // Rising prices keep the fast EMA above the slow one.
        assert!(report.indicators.latest(IndicatorType::Macd).unwrap() > 0.0);
    }

    #[test]
    fn rsi_extremes() {
        let rising = MockDataPort::new().with_series(make_series("UP", &linear(20)));
        let report = analyze(&rising, "UP", 20).unwrap();
        assert_eq!(report.indicators.latest(RSI14), Some(100.0));

        let falling: Vec<f64> = linear(20).into_iter().rev().collect();
        let port = MockDataPort::new().with_series(make_series("DOWN", &falling));
        let report = analyze(&port, "DOWN", 20).unwrap();
        assert_eq!(report.indicators.latest(RSI14), Some(0.0));

        let port = MockDataPort::new().with_series(make_series("FLAT", &[50.0; 20]));
        let report = analyze(&port, "FLAT", 20).unwrap();
        assert_eq!(report.indicators.latest(RSI14), Some(100.0));
    }

    #[test]
    fn rsi_balanced_moves() {
        // Alternating +1/-1 gives equal average gain and loss.
        let closes: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        let port = MockDataPort::new().with_series(make_series("ALT", &closes));
        let report = analyze(&port, "ALT", 16).unwrap();
        assert_relative_eq!(report.indicators.value(RSI14, 14).unwrap(), 50.0);
    }
}

mod recommendation_table {
    use super::*;

    fn trend(direction: TrendDirection, strength: f64) -> TrendAssessment {
        TrendAssessment {
            direction,
            strength,
            duration_days: 20,
        }
    }

    fn with_category(category: PatternCategory) -> Vec<marketlab::domain::pattern::Pattern> {
        CATALOG
            .iter()
            .copied()
            .filter(|p| p.category == category)
            .take(1)
            .collect()
    }

    #[test]
    fn every_combination_yields_an_action() {
        let directions = [TrendDirection::Up, TrendDirection::Down, TrendDirection::Sideways];
        for direction in directions {
            for strength in [0.6, 0.7, 0.71, 0.95] {
                for size in 0..=3 {
                    let patterns = &CATALOG[..size];
                    let rec = recommend(&trend(direction, strength), patterns);
                    assert!(!rec.rationale.is_empty());
                    if direction == TrendDirection::Sideways || strength <= 0.7 {
                        assert_eq!(rec.action, Action::Hold);
                    }
                }
            }
        }
    }

    #[test]
    fn strong_up_with_bullish_reversal() {
        let rec = recommend(
            &trend(TrendDirection::Up, 0.9),
            &with_category(PatternCategory::BullishReversal),
        );
        assert_eq!(rec.action, Action::StrongBuy);
    }

    #[test]
    fn strong_up_with_bearish_reversal_is_buy() {
        let rec = recommend(
            &trend(TrendDirection::Up, 0.9),
            &with_category(PatternCategory::BearishReversal),
        );
        assert_eq!(rec.action, Action::Buy);
        assert_eq!(rec.rationale, "clear uptrend");
    }

    #[test]
    fn strong_down_with_bearish_reversal() {
        let rec = recommend(
            &trend(TrendDirection::Down, 0.8),
            &with_category(PatternCategory::BearishReversal),
        );
        assert_eq!(rec.action, Action::StrongSell);
    }

    #[test]
    fn strong_down_without_confirmation() {
        let rec = recommend(
            &trend(TrendDirection::Down, 0.8),
            &with_category(PatternCategory::Continuation),
        );
        assert_eq!(rec.action, Action::Sell);
    }

    #[test]
    fn undirected_reversal_never_confirms() {
        let wedge = with_category(PatternCategory::Reversal);
        assert_eq!(wedge.len(), 1);
        let up = recommend(&trend(TrendDirection::Up, 0.9), &wedge);
        let down = recommend(&trend(TrendDirection::Down, 0.9), &wedge);
        assert_eq!(up.action, Action::Buy);
        assert_eq!(down.action, Action::Sell);
    }

    #[test]
    fn threshold_is_strict() {
        let rec = recommend(
            &trend(TrendDirection::Up, 0.7),
            &with_category(PatternCategory::BullishReversal),
        );
        assert_eq!(rec.action, Action::Hold);
        assert_eq!(rec.rationale, "trend unclear, await a clearer signal");
    }
}

mod report_adapters {
    use super::*;

    #[test]
    fn csv_export_of_full_report() {
        let report = analyze(&MockDataPort::new(), "AAPL", 30).unwrap();
        let mut buf = Vec::new();
        CsvExportAdapter.write(&report, &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 15);
        let sma20_col = headers.iter().position(|h| h == "SMA20").unwrap();

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 30);
        assert_eq!(&rows[18][sma20_col], "");
        let sma: f64 = rows[19][sma20_col].parse().unwrap();
        assert_eq!(Some(sma), report.indicators.value(SMA20, 19));
    }

    #[test]
    fn text_report_of_full_report() {
        let report = analyze(&MockDataPort::new(), "MSFT", 60).unwrap();
        let mut buf = Vec::new();
        TextReportAdapter.write(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("=== MSFT ==="));
        assert!(text.contains(&report.recommendation.action.to_string()));
    }
}
