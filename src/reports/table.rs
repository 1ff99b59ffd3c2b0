//! Bordered table report for terminal output.
//!
//! Each section renders as one three-column table: the record title (scope
//! and label, one line per level), the left value and the right value.

use super::{ansi_color, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, Report};
use unicode_width::UnicodeWidthStr;

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn section(&self, out: &mut Vec<String>, what: &str, report: &Report, result: &DiffResult) {
        let left = &result.left.server;
        let right = &result.right.server;

        if report.is_identical() {
            out.push(format!(
                "{} {left} {right}",
                self.color(&format!("{what} are identical:"), "green")
            ));
            return;
        }

        let mut table = Table::new(["DIFF", left.as_str(), right.as_str()]);
        for record in &report.records {
            table.row([record.title(), record.left.clone(), record.right.clone()]);
        }
        if !report.only_left.is_empty() || !report.only_right.is_empty() {
            table.row([
                format!("unique {what}"),
                report.only_left.join("\n"),
                report.only_right.join("\n"),
            ]);
        }

        out.push(self.color(&format!("{} {what}", capitalize(what)), "bold"));
        out.push(table.render(self.colored));
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = Vec::new();
        if let Some(title) = &config.title {
            out.push(self.color(title, "bold"));
        }
        if let Some(report) = &result.datasources {
            self.section(&mut out, "data sources", report, result);
        }
        if let Some(report) = &result.dashboards {
            self.section(&mut out, "dashboards", report, result);
        }
        Ok(out.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Three-column table with multi-line cells.
struct Table {
    header: [String; 3],
    rows: Vec<[String; 3]>,
}

impl Table {
    fn new(header: [&str; 3]) -> Self {
        Self {
            header: header.map(str::to_uppercase),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: [String; 3]) {
        self.rows.push(cells);
    }

    fn widths(&self) -> [usize; 3] {
        let mut widths = [0; 3];
        for cells in std::iter::once(&self.header).chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(cells) {
                let widest = cell.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
                *width = (*width).max(widest);
            }
        }
        widths
    }

    fn render(&self, colored: bool) -> String {
        let widths = self.widths();
        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");
        let border = format!("+{border}+");

        let mut lines = vec![border.clone()];
        lines.extend(render_cells(&self.header, &widths, |s| {
            ansi_color(s, "bold", colored)
        }));
        lines.push(border.clone());
        for cells in &self.rows {
            lines.extend(render_cells(cells, &widths, str::to_string));
        }
        lines.push(border);
        lines.join("\n")
    }
}

/// Lay out one row; cells taller than their neighbours leave blanks below.
fn render_cells(
    cells: &[String; 3],
    widths: &[usize; 3],
    style: impl Fn(&str) -> String,
) -> Vec<String> {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|i| {
            let parts: Vec<String> = split
                .iter()
                .zip(widths)
                .map(|(lines, &width)| {
                    let text = lines.get(i).copied().unwrap_or("");
                    let pad = width.saturating_sub(text.width());
                    format!(" {}{} ", style(text), " ".repeat(pad))
                })
                .collect();
            format!("|{}|", parts.join("|"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{ConfigSnapshot, DashboardDocument, DataSourceRecord, Panel, Target};

    fn memory_dashboard(expr: &str) -> DashboardDocument {
        DashboardDocument::new("App Debug", "c0be4e42").with_panels(vec![
            Panel::new("Memory usage").with_targets(vec![Target::new("A", expr)]),
        ])
    }

    #[test]
    fn test_table_layout() {
        let left = ConfigSnapshot::new("prod").with_dashboards(vec![memory_dashboard("count(x)")]);
        let right =
            ConfigSnapshot::new("staging").with_dashboards(vec![memory_dashboard("count(y)")]);
        let result = DiffEngine::new().diff(&left, &right);

        let output = TableReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("renders");
        let lines: Vec<&str> = output.lines().collect();

        assert!(output.contains("data sources are identical: prod staging"));
        assert!(lines.iter().any(|l| l.starts_with("| DIFF")));
        assert!(lines.iter().any(|l| l.contains("| Dashboard: App Debug")
            && l.contains("| count(x)")
            && l.contains("| count(y)")));
        assert!(lines.iter().any(|l| l.contains("| Panel: Memory usage")));
        assert!(lines.iter().any(|l| l.contains("| expr (refId A)")));

        let table_lines: Vec<&&str> = lines
            .iter()
            .filter(|l| l.starts_with('|') || l.starts_with('+'))
            .collect();
        let width = table_lines[0].width();
        assert!(table_lines.iter().all(|l| l.width() == width));
    }

    #[test]
    fn test_unique_keys_row() {
        let left = ConfigSnapshot::new("prod").with_datasources(vec![
            DataSourceRecord::new("Loki", "loki"),
            DataSourceRecord::new("Jaeger", "jaeger"),
        ]);
        let right =
            ConfigSnapshot::new("staging").with_datasources(vec![DataSourceRecord::new("Tempo", "tempo")]);
        let result = DiffEngine::new().diff(&left, &right);

        let output = TableReporter::new()
            .no_color()
            .generate(&result, &ReportConfig::default())
            .expect("renders");

        assert!(output.contains("| unique data sources"));
        assert!(output.contains("| Loki"));
        assert!(output.contains("| Jaeger"));
        assert!(output.contains("| Tempo"));
        assert!(output.contains("dashboards are identical"));
    }

    #[test]
    fn test_wide_characters_align() {
        let mut table = Table::new(["DIFF", "左", "right"]);
        table.row(["ラベル".to_string(), "値".to_string(), "x\ny".to_string()]);
        let rendered = table.render(false);
        let widths: Vec<usize> = rendered.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
        assert_eq!(rendered.lines().count(), 6);
    }
}
