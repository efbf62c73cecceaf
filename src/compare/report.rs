//! Side-by-side comparison report

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

/// One compared pair, as display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub left: String,
    pub right: String,
    pub equal: bool,
}

/// Accumulated result of comparing pairs of rows, cells or fields
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    columns: [String; 2],
    entries: Vec<ReportEntry>,
    all_equal: bool,
}

impl ComparisonReport {
    /// Create an empty report with the two column headings
    pub fn new(left_heading: impl Into<String>, right_heading: impl Into<String>) -> Self {
        Self {
            columns: [left_heading.into(), right_heading.into()],
            entries: Vec::new(),
            all_equal: true,
        }
    }

    /// Record one compared pair
    pub fn push(&mut self, left: impl Into<String>, right: impl Into<String>, equal: bool) {
        if !equal {
            self.all_equal = false;
        }
        self.entries.push(ReportEntry {
            left: single_line(left.into()),
            right: single_line(right.into()),
            equal,
        });
    }

    /// True until a mismatching pair is pushed
    pub fn all_equal(&self) -> bool {
        self.all_equal
    }

    pub fn columns(&self) -> &[String; 2] {
        &self.columns
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pairs that did not match
    pub fn mismatch_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.equal).count()
    }

    /// Render as a box table, headings first
    ///
    /// Each entry occupies exactly one line, three lines below the top of the
    /// table.
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().cloned());
        for entry in &self.entries {
            builder.push_record([entry.left.clone(), entry.right.clone()]);
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        table.to_string()
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Keep every entry on one table line
fn single_line(s: String) -> String {
    if s.contains(['\n', '\r']) {
        s.replace('\r', "\\r").replace('\n', "\\n")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_equal_flag() {
        let mut report = ComparisonReport::new("df1", "df2");
        assert!(report.all_equal());

        report.push("a", "a", true);
        report.push("b", "c", false);
        report.push("d", "d", true);

        assert!(!report.all_equal());
        assert_eq!(report.len(), 3);
        assert_eq!(report.mismatch_count(), 1);
    }

    #[test]
    fn test_render() {
        let mut report = ComparisonReport::new("df1", "df2");
        report.push("Row(a=1)", "Row(a=1)", true);
        report.push("None", "Row(a=2)", false);

        let expected = "\
┌──────────┬──────────┐
│ df1      │ df2      │
├──────────┼──────────┤
│ Row(a=1) │ Row(a=1) │
│ None     │ Row(a=2) │
└──────────┴──────────┘";
        assert_eq!(report.render(), expected);
    }

    #[test]
    fn test_multiline_values_are_escaped() {
        let mut report = ComparisonReport::new("l", "r");
        report.push("a\nb", "a\nb", true);
        assert_eq!(report.entries()[0].left, "a\\nb");
        assert_eq!(report.render().lines().count(), 5);
    }
}
