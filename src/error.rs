//! Suite error taxonomy
//!
//! Configuration and dependency errors abort a run before any scenario
//! executes. Every other error is scoped to the scenario that raised it.

use std::fmt;
use thiserror::Error;

/// Errors raised while loading, building, sending or verifying
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to encode request: {0}")]
    Encoding(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{what} mismatch: expected {expected}, got {actual}")]
    AssertionMismatch {
        what: String,
        expected: String,
        actual: String,
    },

    #[error("Missing run state: {0}")]
    StatePrecondition(String),

    #[error("Dependency error: {0}")]
    Dependency(String),
}

impl SuiteError {
    /// Build an assertion mismatch, rendering both sides with `Debug`
    pub fn mismatch(
        what: impl Into<String>,
        expected: impl fmt::Debug,
        actual: impl fmt::Debug,
    ) -> Self {
        SuiteError::AssertionMismatch {
            what: what.into(),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }

    /// Errors that abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SuiteError::Configuration(_) | SuiteError::Dependency(_)
        )
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, SuiteError::AssertionMismatch { .. })
    }
}

pub type SuiteResult<T> = std::result::Result<T, SuiteError>;
