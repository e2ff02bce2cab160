//! Encoding of a calibration set into CGINS calibration records
//!
//! Row order and naming are fixed; the asset management tooling that reads
//! these files matches on both.

use chrono::NaiveDate;

use super::error::ValidationError;
use super::model::{CalibrationRecord, CalibrationSet};
use super::validator::check;

/// Prefix of every NUTNR-B calibration file name
pub const FILE_NAME_PREFIX: &str = "CGINS-NUTNRB-";

const SERIAL_SUFFIX_LEN: usize = 4;
const SERIAL_FIELD_WIDTH: usize = 5;

/// Rows and file name for one converted calibration
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCalibration {
    pub file_name: String,
    pub records: Vec<CalibrationRecord>,
}

/// Validate a set and encode it in one step
pub fn encode_validated(
    set: &CalibrationSet,
    serial: &str,
    lower_limit: f64,
    upper_limit: f64,
) -> Result<EncodedCalibration, ValidationError> {
    check(set)?;
    let created = set
        .creation_date
        .ok_or(ValidationError::MissingField("creation time"))?;
    Ok(EncodedCalibration {
        file_name: output_file_name(serial, created.date()),
        records: encode(set, serial, lower_limit, upper_limit),
    })
}

/// Build the output rows for one instrument, header excluded
pub fn encode(
    set: &CalibrationSet,
    serial: &str,
    lower_limit: f64,
    upper_limit: f64,
) -> Vec<CalibrationRecord> {
    vec![
        CalibrationRecord::new(serial, "CC_cal_temp", set.cal_temperature.clone()),
        CalibrationRecord::new(serial, "CC_di", encode_array(&set.deionized_reference)),
        CalibrationRecord::new(serial, "CC_eno3", encode_array(&set.extinction_nitrate)),
        CalibrationRecord::new(serial, "CC_eswa", encode_array(&set.extinction_seawater)),
        CalibrationRecord::new(
            serial,
            "CC_lower_wavelength_limit_for_spectra_fit",
            format_number(lower_limit),
        ),
        CalibrationRecord::new(
            serial,
            "CC_upper_wavelength_limit_for_spectra_fit",
            format_number(upper_limit),
        ),
        CalibrationRecord::new(serial, "CC_wl", encode_array(&set.wavelength)),
    ]
}

/// `CGINS-NUTNRB-<last 4 of serial, zero padded to 5>__<YYYYMMDD>.csv`
pub fn output_file_name(serial: &str, creation_date: NaiveDate) -> String {
    let char_count = serial.chars().count();
    let suffix: String = serial
        .chars()
        .skip(char_count.saturating_sub(SERIAL_SUFFIX_LEN))
        .collect();
    format!(
        "{}{:0>width$}__{}.csv",
        FILE_NAME_PREFIX,
        suffix,
        creation_date.format("%Y%m%d"),
        width = SERIAL_FIELD_WIDTH
    )
}

/// Render a coefficient sequence as one JSON array cell, e.g. `[217.0, 217.5]`
pub fn encode_array(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| format_number(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Read back a cell written by [`encode_array`]
pub fn decode_coefficients(cell: &str) -> Result<Vec<f64>, serde_json::Error> {
    serde_json::from_str(cell)
}

/// Shortest representation that parses back to the same `f64`
fn format_number(value: f64) -> String {
    match serde_json::Number::from_f64(value) {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}
