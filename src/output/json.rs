//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::compare::{ComparisonReport, ReportEntry};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    columns: &'a [String; 2],
    all_equal: bool,
    mismatches: usize,
    rows: &'a [ReportEntry],
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &ComparisonReport, writer: &mut dyn Write) -> Result<()> {
        let output = JsonReport {
            columns: report.columns(),
            all_equal: report.all_equal(),
            mismatches: report.mismatch_count(),
            rows: report.entries(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
