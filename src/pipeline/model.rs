//! Calibration data model shared by the parser, validator and encoder

use chrono::NaiveDateTime;
use serde::Serialize;

/// Lower wavelength bound (nm) written for the spectra fit
pub const LOWER_WAVELENGTH_LIMIT: f64 = 217.0;

/// Upper wavelength bound (nm) written for the spectra fit
pub const UPPER_WAVELENGTH_LIMIT: f64 = 240.0;

/// Tag in field 0 that marks a coefficient row
pub const DATA_ROW_TAG: &str = "E";

/// Substring in field 1 that marks the file creation time line
pub const CREATION_TIME_MARKER: &str = "creation time";

/// Prefix in field 1 that marks the calibration temperature line
pub const CAL_TEMPERATURE_MARKER: &str = "T_CAL_SWA";

/// Character offset of the timestamp inside the creation time field
pub const CREATION_TIME_OFFSET: usize = 19;

/// Character offset of the temperature inside the `T_CAL_SWA` field
pub const CAL_TEMPERATURE_OFFSET: usize = 10;

/// chrono format of the creation timestamp, e.g. `15-Mar-2021 10:00:00`
pub const CREATION_TIME_FORMAT: &str = "%d-%b-%Y %H:%M:%S";

/// Kind of a source row, decided by its first field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `E` row carrying one wavelength bin of coefficients
    Data,
    /// Header or metadata row
    Metadata,
}

/// One row of the vendor calibration file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    /// 1-based line number in the source, used in error messages
    pub line: u64,
    pub fields: Vec<String>,
}

impl SourceRecord {
    pub fn new<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        if self.field(0) == Some(DATA_ROW_TAG) {
            RecordKind::Data
        } else {
            RecordKind::Metadata
        }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// Coefficients and metadata extracted from one vendor file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSet {
    pub cal_temperature: String,
    pub creation_date: Option<NaiveDateTime>,
    pub wavelength: Vec<f64>,
    pub extinction_nitrate: Vec<f64>,
    pub extinction_seawater: Vec<f64>,
    pub deionized_reference: Vec<f64>,
}

impl CalibrationSet {
    /// Number of wavelength bins read so far
    pub fn channel_count(&self) -> usize {
        self.wavelength.len()
    }

    /// Smallest and largest wavelength, if any bins were read
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        let first = *self.wavelength.first()?;
        Some(
            self.wavelength
                .iter()
                .fold((first, first), |(lo, hi), &w| (lo.min(w), hi.max(w))),
        )
    }
}

/// One row of the output calibration file
///
/// Field order is the column order of the written CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationRecord {
    pub serial: String,
    pub name: String,
    pub value: String,
    pub notes: String,
}

impl CalibrationRecord {
    pub fn new(serial: &str, name: &str, value: String) -> Self {
        Self {
            serial: serial.to_string(),
            name: name.to_string(),
            value,
            notes: String::new(),
        }
    }
}

/// Column names of the output calibration file
pub const RECORD_HEADER: [&str; 4] = ["serial", "name", "value", "notes"];
