//! Validation result model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a failed validation rule is.
///
/// Only `Error` failures affect compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Costs are disallowed until fixed.
    Error,
    /// Needs review but does not block the claim.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    /// Returns the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of one compliance rule against one timesheet period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Rule identifier, e.g. "UKRI-TS-001".
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// The funder terms the rule enforces.
    pub funder_clause: String,
    /// Severity of this outcome.
    pub severity: Severity,
    /// Whether the period satisfied the rule.
    pub passed: bool,
    /// Explanation of the outcome.
    pub message: String,
    /// Rule-specific evidence.
    pub details: serde_json::Value,
}
