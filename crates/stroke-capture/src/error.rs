//! Stroke Capture Error Types

use thiserror::Error;

/// Errors while reading or validating stroke samples
#[derive(Debug, Error)]
pub enum StrokeError {
    /// Underlying file read failure
    #[error("Failed to read record {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Point-count header missing or non-numeric
    #[error("Invalid point count in {path}: {line:?}")]
    InvalidPointCount { path: String, line: String },

    /// Record ended before the declared number of points
    #[error("Record {path} truncated: expected {expected} points, got {actual}")]
    TruncatedRecord {
        path: String,
        expected: usize,
        actual: usize,
    },

    /// Point row has too few columns
    #[error("Row {row} of {path} has {columns} columns, need at least {required}")]
    ShortRow {
        path: String,
        row: usize,
        columns: usize,
        required: usize,
    },

    /// Field failed to parse as a number
    #[error("Non-numeric value {value:?} at row {row}, column {column} of {path}")]
    NonNumericField {
        path: String,
        row: usize,
        column: usize,
        value: String,
    },

    /// Channels of a sample have different lengths
    #[error("Channel length mismatch: x={x_len}, y={y_len}, pressure={pressure_len}")]
    ChannelMismatch {
        x_len: usize,
        y_len: usize,
        pressure_len: usize,
    },

    /// A channel contains NaN or infinity
    #[error("Non-finite value in {channel} channel at index {index}")]
    NonFiniteValue {
        channel: &'static str,
        index: usize,
    },
}
