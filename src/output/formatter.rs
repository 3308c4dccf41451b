//! Output formatters for suite results
//!
//! Provides table, summary and JSON output formats.

use crate::error::{SuiteError, SuiteResult};
use crate::models::{ScenarioResult, ScenarioStatus, SuiteSummary};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
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

    fn status_label(&self, status: ScenarioStatus) -> String {
        let label = format!("{} {:5}", status.symbol(), status);
        if !self.colorize {
            return label;
        }
        match status {
            ScenarioStatus::Pass => format!("\x1b[32m{label}\x1b[0m"),
            ScenarioStatus::Fail | ScenarioStatus::Error => format!("\x1b[31m{label}\x1b[0m"),
        }
    }

    fn format_result_table(&self, result: &ScenarioResult) -> String {
        let mut line = format!(
            "{:34} {} [{:>6}ms]",
            result.id.as_str(),
            self.status_label(result.status),
            result.duration_ms
        );

        if !result.status.is_success() {
            if let Some(message) = &result.message {
                line.push_str(&format!("\n      {message}"));
            }
        }
        if let Some(note) = &result.known_issue {
            let note = if self.colorize {
                format!("\x1b[33mknown issue: {note}\x1b[0m")
            } else {
                format!("known issue: {note}")
            };
            line.push_str(&format!("\n      {note}"));
        }

        line
    }

    fn format_result_summary(&self, result: &ScenarioResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.id,
            result.duration_ms
        )
    }

    /// Format the summary of a suite run
    pub fn format_summary(&self, summary: &SuiteSummary) -> SuiteResult<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Json => to_json(summary, false),
            OutputFormat::JsonPretty => to_json(summary, true),
            OutputFormat::Summary => Ok(self.format_summary_brief(summary)),
        }
    }

    fn format_summary_table(&self, summary: &SuiteSummary) -> String {
        let rule = "━".repeat(70);
        let mut output = String::new();

        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&format!(
            "  User API suite - {} ({})\n",
            summary.target,
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("{rule}\n"));

        let mut current_group = None;
        for result in &summary.results {
            if current_group != Some(result.group) {
                output.push_str(&format!("\n{} Scenarios:\n", result.group));
                output.push_str(&format!("{}\n", "─".repeat(70)));
                current_group = Some(result.group);
            }
            output.push_str(&format!("  {}\n", self.format_result_table(result)));
        }

        output.push_str(&format!("\n{rule}\n"));

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            "  Total: {} | Pass: {} | Fail: {} | Error: {}\n",
            summary.total, pass_str, fail_str, summary.errors
        ));
        output.push_str(&format!(
            "  Pass Rate: {:5.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str(&format!("{rule}\n"));

        output
    }

    fn format_summary_brief(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();
        for result in summary.results.iter().filter(|r| !r.status.is_success()) {
            output.push_str(&format!("{}\n", self.format_result_summary(result)));
        }
        output.push_str(&format!(
            "{}: {}/{} passed ({:.1}%) in {}ms",
            summary.target,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> SuiteResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| SuiteError::Encoding(format!("failed to render results: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Expectation, Scenario, ScenarioGroup};
    use chrono::Utc;

    fn scenario(id: &'static str, group: ScenarioGroup) -> Scenario {
        Scenario::new(
            id,
            group,
            id,
            Action::Health { repeat: 1 },
            Expectation::error(400, "x"),
        )
    }

    fn summary() -> SuiteSummary {
        let health = scenario("health.status", ScenarioGroup::Health);
        let lookup = scenario("user.get", ScenarioGroup::UserLookup).known_issue("middleName is null");
        SuiteSummary::new(
            "http://localhost:5000",
            Utc::now(),
            vec![
                ScenarioResult::pass(&health, 3, "200"),
                ScenarioResult::fail(&lookup, 9, "middleName mismatch"),
            ],
        )
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_table_groups_and_known_issues() {
        let output = ResultFormatter::new(OutputFormat::Table)
            .no_color()
            .format_summary(&summary())
            .unwrap();

        assert!(output.contains("Health Scenarios:"));
        assert!(output.contains("User Lookup Scenarios:"));
        assert!(output.contains("known issue: middleName is null"));
        assert!(output.contains("middleName mismatch"));
        assert!(output.contains("Total: 2 | Pass: 1 | Fail: 1 | Error: 0"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_brief_lists_only_unsuccessful() {
        let output = ResultFormatter::new(OutputFormat::Summary)
            .format_summary(&summary())
            .unwrap();

        assert!(output.contains("✗ user.get"));
        assert!(!output.contains("health.status"));
        assert!(output.ends_with("1/2 passed (50.0%) in 12ms"));
    }

    #[test]
    fn test_json_output() {
        let output = ResultFormatter::new(OutputFormat::Json)
            .format_summary(&summary())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], 2);
        assert_eq!(value["results"][1]["status"], "fail");
        assert_eq!(value["results"][1]["group"], "user_lookup");
        assert_eq!(value["results"][0]["id"], "health.status");
    }
}
