//! Outcome state of a single page scan

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the final state of one page scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// The engine evaluated the page and returned results
    Completed,

    /// The scan could not be performed (network error, non-2xx, timeout)
    Failed,
}

impl ScanStatus {
    /// Returns true if the page contributes to scores and totals
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the string representation used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
