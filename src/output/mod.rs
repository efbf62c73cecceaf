//! Output formatting for comparison reports

mod json;
mod terminal;

use std::io::Write;

use anyhow::Result;
use termcolor::ColorChoice;

use crate::compare::ComparisonReport;
use crate::config::OutputFormat;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a report to a writer
    fn render(&self, report: &ComparisonReport, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, color_choice: ColorChoice) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::with_color_choice(color_choice)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a report to stdout
pub fn render_to_stdout(
    report: &ComparisonReport,
    format: OutputFormat,
    color_choice: ColorChoice,
) -> Result<()> {
    let formatter = OutputFactory::create(format, color_choice);
    let mut stdout = std::io::stdout().lock();
    formatter.render(report, &mut stdout)
}
