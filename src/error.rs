//! Error taxonomy for diagnosis resolution
//!
//! Only two conditions are hard errors: a classifier index outside the known
//! label set, and a label with nothing normalizable in it. Everything else
//! (missing records, partial records, out-of-range confidence) degrades
//! gracefully through `DiagnosisResult` fields.

use thiserror::Error;

/// Errors that abort a single resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    /// Classifier returned an index with no entry in the label map.
    /// Surfaced to the presentation layer as a generic "diagnosis failed".
    #[error("class index {0} is outside the known label set")]
    UnknownIndex(usize),

    /// Label contains no normalizable segment (empty or separators only)
    #[error("label {0:?} has no normalizable segment")]
    UnparsableLabel(String),
}
