//! Scenario result models
//!
//! Per-scenario outcomes and the summary of one suite run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::scenario::{Scenario, ScenarioGroup, ScenarioId};

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Pass,
    /// Observed response differs from the expectation
    Fail,
    /// Scenario could not be checked (network, encoding, missing run state)
    Error,
}

impl ScenarioStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            ScenarioStatus::Pass => "✓",
            ScenarioStatus::Fail => "✗",
            ScenarioStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioStatus::Pass)
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioStatus::Pass => write!(f, "PASS"),
            ScenarioStatus::Fail => write!(f, "FAIL"),
            ScenarioStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioResult {
    pub id: ScenarioId,
    pub group: ScenarioGroup,
    pub description: String,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_issue: Option<String>,
}

impl ScenarioResult {
    fn from_scenario(
        scenario: &Scenario,
        status: ScenarioStatus,
        duration_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: scenario.id,
            group: scenario.group,
            description: scenario.description.clone(),
            status,
            duration_ms,
            message: Some(message.into()),
            known_issue: scenario.known_issue.clone(),
        }
    }

    pub fn pass(scenario: &Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::from_scenario(scenario, ScenarioStatus::Pass, duration_ms, message)
    }

    pub fn fail(scenario: &Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::from_scenario(scenario, ScenarioStatus::Fail, duration_ms, message)
    }

    pub fn error(scenario: &Scenario, duration_ms: u64, message: impl Into<String>) -> Self {
        Self::from_scenario(scenario, ScenarioStatus::Error, duration_ms, message)
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.id,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one suite run
#[derive(Clone, Debug, Serialize)]
pub struct SuiteSummary {
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteSummary {
    pub fn new(
        target: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<ScenarioResult>,
    ) -> Self {
        let count = |status: ScenarioStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            target: target.into(),
            started_at,
            total: results.len(),
            passed: count(ScenarioStatus::Pass),
            failed: count(ScenarioStatus::Fail),
            errors: count(ScenarioStatus::Error),
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn result(&self, id: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.id.as_str() == id)
    }
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Suite run against {}", self.target)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Error: {}",
            self.total, self.passed, self.failed, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
