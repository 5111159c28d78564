//! Severity tiers shared by every triage verdict.

use crate::TextError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Headline output of a triage assessment.
///
/// Variants are declared from least to most severe, so the derived ordering gives
/// `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// No significant indicators; routine monitoring.
    Low,
    /// Needs follow-up or closer monitoring.
    Medium,
    /// Needs immediate attention.
    High,
}

impl Severity {
    /// All tiers in ascending order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Canonical label, as serialised.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// True for the tier that calls for immediate attention.
    pub fn is_urgent(self) -> bool {
        self == Self::High
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = TextError;

    /// Case-insensitive. `moderate` is accepted as an alias for `Medium`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "moderate" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TextError::UnknownSeverity(s.to_owned())),
        }
    }
}
