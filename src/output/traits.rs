//! Output sink trait and errors
//!
//! This module defines the trait interface for report sinks and the error
//! type shared by every output format.

use crate::output::report::ScanReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a finished scan report
///
/// Sinks receive structured data only; any rendering to a presentation
/// format is the sink's own business.
pub trait ReportSink {
    /// Writes the report
    ///
    /// # Arguments
    ///
    /// * `report` - The finished report
    fn write_report(&self, report: &ScanReport) -> OutputResult<()>;
}
