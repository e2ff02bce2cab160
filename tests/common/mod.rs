//! Shared test utilities and vendor file fixtures

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use nutnrb_cal::pipeline::CalibrationSet;
use tempfile::TempDir;

/// A small but complete SUNA vendor calibration file
///
/// Includes the rows a real file carries that must be ignored: a second
/// creation time line, a plain `T_CAL` line and free-text headers.
pub const SAMPLE_CAL: &str = "\
H,File creation time: 15-Mar-2021 10:00:00
H,SUNA V2 calibration,,,,
H,T_CAL_SWA 12.34
H,T_CAL 19.86
H,Wavelength,ENO3,ESWA,Unused,Reference
E,217.14,0.002135,0.000157,0,24817
E,217.94,0.001985,0.000143,0,25013
E,218.74,0.001822,0.000130,0,25250
H,File creation time: 01-Jan-2020 00:00:00
";

/// Build a vendor file from header lines and coefficient rows
pub fn vendor_file(headers: &[&str], rows: &[(f64, f64, f64, f64)]) -> String {
    let mut text = String::new();
    for header in headers {
        text.push_str(header);
        text.push('\n');
    }
    for (wl, eno3, eswa, di) in rows {
        text.push_str(&format!("E,{},{},{},0,{}\n", wl, eno3, eswa, di));
    }
    text
}

/// Standard header lines for [`vendor_file`]
pub const STANDARD_HEADERS: [&str; 2] = [
    "H,File creation time: 15-Mar-2021 10:00:00",
    "H,T_CAL_SWA 12.34",
];

/// Write a vendor file into a temporary directory
pub fn write_cal(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// The set [`SAMPLE_CAL`] parses into
pub fn sample_set() -> CalibrationSet {
    CalibrationSet {
        cal_temperature: "12.34".to_string(),
        creation_date: Some(sample_creation_time()),
        wavelength: vec![217.14, 217.94, 218.74],
        extinction_nitrate: vec![0.002135, 0.001985, 0.001822],
        extinction_seawater: vec![0.000157, 0.000143, 0.000130],
        deionized_reference: vec![24817.0, 25013.0, 25250.0],
    }
}

pub fn sample_creation_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 3, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// File name the sample converts to for serial 332513
pub const SAMPLE_OUTPUT_NAME: &str = "CGINS-NUTNRB-02513__20210315.csv";

/// Expected CSV text for the sample with serial 332513 and default limits
pub const SAMPLE_OUTPUT_CSV: &str = "\
serial,name,value,notes
332513,CC_cal_temp,12.34,
332513,CC_di,\"[24817.0, 25013.0, 25250.0]\",
332513,CC_eno3,\"[0.002135, 0.001985, 0.001822]\",
332513,CC_eswa,\"[0.000157, 0.000143, 0.00013]\",
332513,CC_lower_wavelength_limit_for_spectra_fit,217.0,
332513,CC_upper_wavelength_limit_for_spectra_fit,240.0,
332513,CC_wl,\"[217.14, 217.94, 218.74]\",
";
