//! CSV export of a price series with its indicator columns.
//!
//! Columns: date, open, high, low, close, volume, then one column per
//! indicator in `IndicatorType` order. Warmup (null) values are empty cells.

use std::io::Write;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::MarketLabError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::report_port::ReportPort;

pub const BASE_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn write_table(
        &self,
        series: &PriceSeries,
        indicators: &IndicatorSeries,
        out: &mut dyn Write,
    ) -> Result<(), MarketLabError> {
        if indicators.len() != series.len() {
            return Err(MarketLabError::Export {
                reason: format!(
                    "indicator length {} does not match series length {}",
                    indicators.len(),
                    series.len()
                ),
            });
        }

        let mut writer = csv::Writer::from_writer(out);

        let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        header.extend(indicators.indicator_types().map(|t| t.to_string()));
        writer.write_record(&header).map_err(export_error)?;

        for (i, bar) in series.bars.iter().enumerate() {
            let mut record = vec![
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ];
            record.extend(
                indicators
                    .indicator_types()
                    .map(|t| indicators.value(t, i).map(|v| v.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record).map_err(export_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvExportAdapter {
    fn write(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<(), MarketLabError> {
        self.write_table(&report.series, &report.indicators, out)
    }
}

fn export_error(e: csv::Error) -> MarketLabError {
    MarketLabError::Export {
        reason: format!("CSV write error: {}", e),
    }
}
