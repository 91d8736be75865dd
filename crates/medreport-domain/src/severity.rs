//! Severity module - closed set of urgency labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall severity of a report's findings
///
/// Labels are ordered by urgency:
/// - Low: nothing requiring prompt attention
/// - Moderate: follow up at the next routine visit
/// - High: an urgent visit is recommended
/// - Critical: immediate physician visit required
///
/// The ordering is informational; nothing in the pipeline enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// No significant abnormalities
    #[serde(rename = "Low")]
    Low,

    /// Abnormal values that warrant follow-up
    #[serde(rename = "Moderate")]
    Moderate,

    /// Findings that warrant an urgent visit
    #[serde(rename = "High - Urgent Visit Recommended")]
    High,

    /// Findings that require immediate attention
    #[serde(rename = "Critical - Immediate Physician Visit Required")]
    Critical,
}

impl Severity {
    /// Every label, in urgency order
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    /// Get the wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High - Urgent Visit Recommended",
            Severity::Critical => "Critical - Immediate Physician Visit Required",
        }
    }

    /// Parse a wire label
    ///
    /// Matching is exact: the labels are part of the response schema sent to
    /// the model, so anything else is a schema violation.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.as_str() == s)
    }

    /// Urgency rank, 0 (Low) through 3 (Critical)
    pub fn urgency_rank(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Moderate => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    /// Whether this severity asks the patient to see a physician soon
    pub fn requires_prompt_visit(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}
