//! Plain-text analysis report adapter implementing ReportPort.

use std::io::Write;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::MarketLabError;
use crate::domain::indicator::IndicatorType;
use crate::domain::levels::Level;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<(), MarketLabError> {
        out.write_all(render(report).as_bytes())?;
        Ok(())
    }
}

pub fn render(report: &AnalysisReport) -> String {
    let mut text = String::new();
    let series = &report.series;

    text.push_str(&format!("=== {} ===\n", report.symbol));
    if let (Some(first), Some(last)) = (series.bars.first(), series.bars.last()) {
        text.push_str(&format!(
            "Period:      {} to {} ({} bars)\n",
            first.date,
            last.date,
            series.len()
        ));
    }
    if let Some(close) = report.last_close() {
        text.push_str(&format!("Last close:  {close:.2}\n"));
    }
    if let Some(change) = series.change_pct() {
        text.push_str(&format!("Change:      {change:+.2}%\n"));
    }

    text.push_str("\nIndicators (latest)\n");
    for indicator in report.indicators.indicator_types() {
        let value = report
            .indicators
            .latest(indicator)
            .map(|v| format_indicator(indicator, v))
            .unwrap_or_else(|| "n/a".to_string());
        text.push_str(&format!("  {:<10} {}\n", indicator.to_string(), value));
    }

    let classification = &report.classification;
    text.push_str("\nPatterns\n");
    if classification.patterns.is_empty() {
        text.push_str("  none\n");
    }
    for pattern in &classification.patterns {
        text.push_str(&format!(
            "  {} [{}] confidence {:.2}\n",
            pattern.name, pattern.category, pattern.confidence
        ));
    }

    text.push_str("\nSupport\n");
    push_levels(&mut text, &classification.levels.supports);
    text.push_str("Resistance\n");
    push_levels(&mut text, &classification.levels.resistances);

    text.push_str(&format!("\nTrend:          {}\n", report.trend_description()));
    text.push_str(&format!(
        "Recommendation: {} ({})\n",
        report.recommendation.action, report.recommendation.rationale
    ));

    text
}

fn format_indicator(indicator: IndicatorType, value: f64) -> String {
    match indicator {
        IndicatorType::Rsi(_) => format!("{value:.1}"),
        IndicatorType::Macd | IndicatorType::Signal | IndicatorType::Histogram => {
            format!("{value:.4}")
        }
        _ => format!("{value:.2}"),
    }
}

fn push_levels(text: &mut String, levels: &[Level]) {
    if levels.is_empty() {
        text.push_str("  none\n");
    }
    for level in levels {
        text.push_str(&format!(
            "  {:.2} (strength {:.2})\n",
            level.price, level.strength
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::synthetic_data_adapter::SyntheticDataAdapter;
    use crate::domain::analysis::analyze;
    use chrono::NaiveDate;

    fn report() -> AnalysisReport {
        let data = SyntheticDataAdapter::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        analyze(&data, "AAPL", 30).unwrap()
    }

    #[test]
    fn render_contains_sections() {
        let report = report();
        let text = render(&report);
        assert!(text.starts_with("=== AAPL ===\n"));
        assert!(text.contains("2024-06-01 to 2024-06-30 (30 bars)"));
        assert!(text.contains("Indicators (latest)"));
        assert!(text.contains("RSI14"));
        assert!(text.contains("Patterns"));
        assert!(text.contains(&report.trend_description()));
        assert!(text.contains(&report.recommendation.rationale));
    }

    #[test]
    fn every_pattern_listed() {
        let report = report();
        let text = render(&report);
        for pattern in &report.classification.patterns {
            assert!(text.contains(pattern.name));
        }
    }

    #[test]
    fn short_series_shows_na() {
        let data = SyntheticDataAdapter::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        let report = analyze(&data, "AAPL", 3).unwrap();
        let text = render(&report);
        assert!(text.contains(&format!("  {:<10} n/a\n", "SMA20")));
    }

    #[test]
    fn write_matches_render() {
        let report = report();
        let mut buf = Vec::new();
        TextReportAdapter.write(&report, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render(&report));
    }
}
