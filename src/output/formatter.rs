//! Output formatters for conformance results
//!
//! Provides table, JSON, CSV and summary output formats.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::models::{ConformanceSummary, ScenarioResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::JsonPretty => "json-pretty",
            OutputFormat::Csv => "csv",
            OutputFormat::Summary => "summary",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One CSV line per scenario result
#[derive(Serialize)]
struct CsvRow<'a> {
    gateway: &'a str,
    scenario: u8,
    name: String,
    category: &'static str,
    status: String,
    duration_ms: u64,
    checks: usize,
    violations: usize,
    message: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(gateway: &'a str, result: &'a ScenarioResult) -> Self {
        Self {
            gateway,
            scenario: result.scenario.number(),
            name: result.scenario.name(),
            category: result.scenario.category(),
            status: result.status.to_string(),
            duration_ms: result.duration_ms,
            checks: result.checks,
            violations: result.violations.len(),
            message: result.message.as_deref().unwrap_or(""),
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Format a single scenario result
    pub fn format_result(&self, result: &ScenarioResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Csv => to_csv(std::iter::once(CsvRow::new("", result))),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        if self.colorize {
            match status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Skip => "○ SKIP",
                TestStatus::Error => "! ERROR",
            }
        }
    }

    fn format_result_table(&self, result: &ScenarioResult) -> String {
        format!(
            "{:2}. {:28} {} [{:>4}ms]",
            result.scenario.number(),
            result.scenario.name(),
            self.status_label(result.status),
            result.duration_ms
        )
    }

    fn format_result_summary(&self, result: &ScenarioResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.scenario.name(),
            result.duration_ms
        )
    }

    /// Format one gateway's run
    pub fn format_summary(&self, summary: &ConformanceSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => to_csv(
                summary
                    .results
                    .iter()
                    .map(|r| CsvRow::new(&summary.gateway, r)),
            ),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &ConformanceSummary) -> String {
        let mut output = String::new();

        // Header
        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!(
            "║  {:58}  ║\n",
            format!("{} Gateway ({})", summary.gateway, summary.short_name)
        ));
        output.push_str(&format!(
            "║  Started {:51}  ║\n",
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        for result in &summary.results {
            output.push_str(&format!("║  {}\n", self.format_result_table(result)));
            if result.status == TestStatus::Error {
                if let Some(message) = &result.message {
                    output.push_str(&format!("║        {message}\n"));
                }
            }
            for violation in &result.violations {
                output.push_str(&format!("║        - {violation}\n"));
            }
        }

        // Footer
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed + summary.errors > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            "║  Total: {:2} | Pass: {} | Fail: {} | Skip: {:2} | Error: {:2}\n",
            summary.total, pass_str, fail_str, summary.skipped, summary.errors
        ));
        output.push_str(&format!(
            "║  Pass Rate: {:5.1}% | Duration: {:6}ms | {}\n",
            summary.pass_rate(),
            summary.total_duration_ms,
            if summary.is_conformant() {
                "CONFORMANT"
            } else {
                "NOT CONFORMANT"
            }
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_brief(&self, summary: &ConformanceSummary) -> String {
        format!(
            "{} Gateway: {}/{} passed, {} failed, {} skipped, {} errors ({:.1}%) in {}ms",
            summary.gateway,
            summary.passed,
            summary.total,
            summary.failed,
            summary.skipped,
            summary.errors,
            summary.pass_rate(),
            summary.total_duration_ms
        )
    }

    /// Format comparison across multiple gateways
    pub fn format_comparison(&self, summaries: &[ConformanceSummary]) -> String {
        match self.format {
            OutputFormat::Table => self.format_comparison_table(summaries),
            OutputFormat::Json => serde_json::to_string(summaries).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summaries).unwrap_or_default(),
            OutputFormat::Csv => to_csv(
                summaries
                    .iter()
                    .flat_map(|s| s.results.iter().map(move |r| CsvRow::new(&s.gateway, r))),
            ),
            OutputFormat::Summary => summaries
                .iter()
                .map(|s| self.format_summary_brief(s))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn format_comparison_table(&self, summaries: &[ConformanceSummary]) -> String {
        let mut output = String::new();

        // Header
        output.push_str(
            "\n┌─────────────────────────────────────────────────────────────────────────────┐\n",
        );
        output.push_str(
            "│                        Gateway Conformance Results                          │\n",
        );
        output.push_str(
            "├─────────────────────────┬───────┬───────┬───────┬───────┬──────────┬────────┤\n",
        );
        output.push_str(
            "│ Gateway                 │ Pass  │ Fail  │ Skip  │ Total │ Rate     │ Time   │\n",
        );
        output.push_str(
            "├─────────────────────────┼───────┼───────┼───────┼───────┼──────────┼────────┤\n",
        );

        // Sort by pass rate
        let mut sorted: Vec<_> = summaries.iter().collect();
        sorted.sort_by(|a, b| b.pass_rate().total_cmp(&a.pass_rate()));

        for summary in sorted {
            let rate_str = format!("{:5.1}%", summary.pass_rate());
            let rate_colored = if self.colorize {
                if summary.is_conformant() {
                    format!("\x1b[32m{rate_str}\x1b[0m")
                } else if summary.pass_rate() >= 50.0 {
                    format!("\x1b[33m{rate_str}\x1b[0m")
                } else {
                    format!("\x1b[31m{rate_str}\x1b[0m")
                }
            } else {
                rate_str
            };

            output.push_str(&format!(
                "│ {:23} │ {:5} │ {:5} │ {:5} │ {:5} │ {:>8} │ {:>4}ms │\n",
                summary.gateway,
                summary.passed,
                summary.failed + summary.errors,
                summary.skipped,
                summary.total,
                rate_colored,
                summary.total_duration_ms
            ));
        }

        output.push_str(
            "└─────────────────────────┴───────┴───────┴───────┴───────┴──────────┴────────┘\n",
        );

        output
    }

    /// Format any number of runs: a single run on its own, several with a
    /// comparison table after the per-gateway tables.
    pub fn format_report(&self, summaries: &[ConformanceSummary]) -> String {
        match summaries {
            [single] => self.format_summary(single),
            _ if self.format == OutputFormat::Table => {
                let mut output: String = summaries
                    .iter()
                    .map(|s| self.format_summary_table(s))
                    .collect();
                output.push_str(&self.format_comparison_table(summaries));
                output
            }
            _ => self.format_comparison(summaries),
        }
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn to_csv<'a>(rows: impl IntoIterator<Item = CsvRow<'a>>) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        if writer.serialize(row).is_err() {
            return String::new();
        }
    }
    writer
        .into_inner()
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

/// Write results to a file, without colour
pub fn write_results_to_file(
    path: impl AsRef<Path>,
    summaries: &[ConformanceSummary],
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_report(summaries);

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Capability;
    use crate::models::{Scenario, Violation};
    use chrono::Utc;

    fn sample_summary() -> ConformanceSummary {
        ConformanceSummary::new(
            "Dummy",
            "Dummy",
            Utc::now(),
            vec![
                ScenarioResult::pass(Scenario::NameNotEmpty, 1, 1),
                ScenarioResult::from_violations(
                    Scenario::Supports(Capability::Refund),
                    2,
                    1,
                    vec![Violation::MissingCapability {
                        capability: Capability::Refund,
                    }],
                ),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("unknown"), None);
        assert_eq!(OutputFormat::JsonPretty.to_string(), "json-pretty");
    }

    #[test]
    fn test_formatter_creation() {
        let formatter = ResultFormatter::new(OutputFormat::Json).no_color();
        assert_eq!(formatter.format, OutputFormat::Json);
        assert!(!formatter.colorize);
    }

    #[test]
    fn test_format_result() {
        let result = ScenarioResult::pass(Scenario::Currency, 3, 2);
        let formatter = ResultFormatter::new(OutputFormat::Summary);
        assert_eq!(formatter.format_result(&result), "✓ Currency (3ms)");
    }

    #[test]
    fn test_table_lists_violations() {
        let output = ResultFormatter::default()
            .no_color()
            .format_summary(&sample_summary());

        assert!(output.contains("Dummy Gateway (Dummy)"));
        assert!(output.contains("supportsRefund() is true"));
        assert!(output.contains("NOT CONFORMANT"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_csv_quotes_messages() {
        let output = ResultFormatter::new(OutputFormat::Csv).format_summary(&sample_summary());
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("gateway,scenario,name,category,status,duration_ms,checks,violations,message")
        );
        assert_eq!(lines.next(), Some("Dummy,1,Name Not Empty,Baseline,PASS,1,1,0,"));
        assert!(lines.next().unwrap().starts_with("Dummy,12,Supports Refund,Capability,FAIL"));
    }

    #[test]
    fn test_json_report_for_many() {
        let summaries = vec![sample_summary(), sample_summary()];
        let output = ResultFormatter::new(OutputFormat::Json).format_report(&summaries);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["results"][1]["violations"][0]["kind"], "missing_capability");
    }

    #[test]
    fn test_write_results_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_results_to_file(&path, &[sample_summary()], OutputFormat::Json).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"gateway\":\"Dummy\""));
    }
}
