//! Report generation port trait.

use std::io::Write;

use crate::domain::analysis::AnalysisReport;
use crate::domain::error::MarketLabError;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, out: &mut dyn Write) -> Result<(), MarketLabError>;
}
