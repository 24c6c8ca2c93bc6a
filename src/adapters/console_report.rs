//! Plain-text report written to stdout.

use crate::domain::error::DipdcaError;
use crate::domain::roi::Performance;
use crate::domain::strategy::StrategyKind;
use crate::domain::universe::{AssetReport, BatchResult, SkipStage, SkippedTicker};
use crate::ports::report_port::ReportPort;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReport {
    /// Adds invested amount and final value after each ROI line.
    pub show_details: bool,
}

impl ConsoleReport {
    pub fn new(show_details: bool) -> Self {
        Self { show_details }
    }

    pub fn render(&self, result: &BatchResult) -> String {
        let mut output = String::new();
        for report in &result.reports {
            output.push_str(&self.render_asset(report));
        }
        if !result.skipped.is_empty() {
            output.push_str(&render_skipped(&result.skipped));
        }
        output
    }

    fn render_asset(&self, report: &AssetReport) -> String {
        let mut output = format!("--- Running analysis for: {} ---\n", report.ticker);
        if self.show_details {
            if let (Some(first), Some(last)) = (report.first_date, report.last_date) {
                output.push_str(&format!("{} prices, {} to {}\n", report.points, first, last));
            }
        }
        for kind in StrategyKind::ALL {
            output.push_str(&self.render_roi_line(kind, &report.analysis.outcome(kind).performance));
        }
        output.push('\n');
        output
    }

    fn render_roi_line(&self, kind: StrategyKind, perf: &Performance) -> String {
        let mut line = format!("{} ROI: {:.2}%", kind, perf.roi * 100.0);
        if self.show_details {
            line.push_str(&format!(
                " (invested {:.2}, value {:.2})",
                perf.total_invested, perf.final_value
            ));
        }
        line.push('\n');
        line
    }
}

fn render_skipped(skipped: &[SkippedTicker]) -> String {
    let mut output = String::from("=== Skipped ===\n");
    for skip in skipped {
        let stage = match skip.stage {
            SkipStage::Fetch => "fetch",
            SkipStage::Analysis => "analysis",
        };
        output.push_str(&format!("  {} ({} failed): {}\n", skip.ticker, stage, skip.reason));
    }
    output
}

impl ReportPort for ConsoleReport {
    fn write(&self, result: &BatchResult) -> Result<(), DipdcaError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(self.render(result).as_bytes())?;
        handle.flush()?;
        Ok(())
    }
}
