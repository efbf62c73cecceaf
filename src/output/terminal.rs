//! Colored terminal output

use std::io::{IsTerminal, Write};

use anyhow::Result;
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, NoColor, WriteColor};

use crate::compare::ComparisonReport;

use super::OutputFormatter;

/// Lines above the first entry: top border, headings, separator
const TABLE_HEADER_LINES: usize = 3;

/// Terminal output with colors
pub struct TerminalOutput {
    color_choice: ColorChoice,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    fn use_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    fn write_table(&self, report: &ComparisonReport, writer: &mut dyn WriteColor) -> Result<()> {
        let rendered = report.render();

        for (i, line) in rendered.lines().enumerate() {
            let entry = i
                .checked_sub(TABLE_HEADER_LINES)
                .and_then(|idx| report.entries().get(idx));

            match entry {
                Some(entry) => {
                    let color = if entry.equal { Color::Blue } else { Color::Red };
                    writer.set_color(ColorSpec::new().set_fg(Some(color)))?;
                    write!(writer, "{}", line)?;
                    writer.reset()?;
                    writeln!(writer)?;
                }
                None => writeln!(writer, "{}", line)?,
            }
        }
        Ok(())
    }

    fn write_summary(&self, report: &ComparisonReport, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer)?;
        if report.all_equal() {
            writeln!(writer, "All {} pairs equal.", report.len())?;
        } else {
            writeln!(
                writer,
                "{} of {} pairs differ.",
                report.mismatch_count(),
                report.len()
            )?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, report: &ComparisonReport, writer: &mut dyn Write) -> Result<()> {
        if self.use_color() {
            let mut writer = Ansi::new(writer);
            self.write_table(report, &mut writer)?;
            self.write_summary(report, &mut writer)
        } else {
            let mut writer = NoColor::new(writer);
            self.write_table(report, &mut writer)?;
            self.write_summary(report, &mut writer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> ComparisonReport {
        let mut report = ComparisonReport::new("df1", "df2");
        report.push("Row(a=1)", "Row(a=1)", true);
        report.push("Row(a=2)", "Row(a=3)", false);
        report
    }

    #[test]
    fn test_plain_output() {
        let mut out = Vec::new();
        TerminalOutput::with_color_choice(ColorChoice::Never)
            .render(&report(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n\n1 of 2 pairs differ.\n", report().render()));
    }

    #[test]
    fn test_colored_output_marks_rows() {
        let mut out = Vec::new();
        TerminalOutput::with_color_choice(ColorChoice::Always)
            .render(&report(), &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        // Headings stay uncolored
        assert!(!lines[1].contains('\x1b'));
        assert!(lines[3].starts_with("\x1b[0m\x1b[34m"));
        assert!(lines[4].starts_with("\x1b[0m\x1b[31m"));
        assert!(lines[4].contains("Row(a=3)"));
    }
}
