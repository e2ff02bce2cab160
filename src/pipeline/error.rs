//! Error types for reading and checking vendor calibration files.

use thiserror::Error;

/// Errors raised while scanning a vendor calibration file.
///
/// Every variant that refers to file content carries the 1-based line
/// number so the user can find the offending row.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An `E` row is too short to hold all coefficient columns.
    #[error("line {line}: coefficient row has {found} field(s), expected at least {expected}")]
    MissingField {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A coefficient column holds something other than a finite number.
    #[error("line {line}: {column} value '{value}' is not a valid number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The creation time line does not hold a `dd-Mon-YYYY HH:MM:SS` timestamp.
    #[error("line {line}: cannot read creation time from '{value}': {source}")]
    InvalidTimestamp {
        line: u64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The file could not be tokenized as comma-separated text.
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line number of the offending row, when the error is tied to one
    pub fn line(&self) -> Option<u64> {
        match self {
            ParseError::MissingField { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::InvalidTimestamp { line, .. } => Some(*line),
            ParseError::Csv(e) => e.position().map(|p| p.line()),
            ParseError::Io(_) => None,
        }
    }
}

/// First structural rule a [`CalibrationSet`](super::CalibrationSet) fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no {0} found in the calibration file")]
    MissingField(&'static str),

    #[error("coefficient columns differ in length: wavelength {wavelength}, eno3 {eno3}, eswa {eswa}, di {di}")]
    LengthMismatch {
        wavelength: usize,
        eno3: usize,
        eswa: usize,
        di: usize,
    },
}
