//! Line-oriented parser for SUNA/NUTNR-B vendor calibration files
//!
//! The vendor file is comma-separated text. Header rows carry the file
//! creation time and the calibration temperature in their second field;
//! `E` rows carry one wavelength bin each:
//!
//! ```text
//! H,File creation time: 15-Mar-2021 10:00:00
//! H,T_CAL_SWA 12.34
//! E,217.14,0.0021,0.00015,0,24817
//! ```
//!
//! Columns 1, 2, 3 and 5 of an `E` row are the wavelength, nitrate
//! extinction, seawater extinction and deionized water reference.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, trace};

use super::error::ParseError;
use super::model::{
    CalibrationSet, RecordKind, SourceRecord, CAL_TEMPERATURE_MARKER, CAL_TEMPERATURE_OFFSET,
    CREATION_TIME_FORMAT, CREATION_TIME_MARKER, CREATION_TIME_OFFSET,
};

/// Columns read from an `E` row, as (field index, column name)
const DATA_COLUMNS: [(usize, &str); 4] = [
    (1, "wavelength"),
    (2, "eno3"),
    (3, "eswa"),
    (5, "di"),
];

/// Minimum number of fields an `E` row must have
pub const MIN_DATA_FIELDS: usize = 6;

/// Parse a vendor calibration file from disk
pub fn parse_file(path: &Path) -> Result<CalibrationSet, ParseError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse vendor calibration text from any reader
pub fn parse_reader<R: Read>(reader: R) -> Result<CalibrationSet, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    // Header rows may carry Latin-1 unit symbols; fields are decoded lossily
    let mut parser = CalibrationParser::default();
    for (index, result) in csv_reader.byte_records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        let fields = row.iter().map(String::from_utf8_lossy);
        parser.feed(&SourceRecord::new(line, fields))?;
    }
    Ok(parser.finish())
}

/// Parse an already tokenized record stream
pub fn parse_records<I>(records: I) -> Result<CalibrationSet, ParseError>
where
    I: IntoIterator<Item = SourceRecord>,
{
    let mut parser = CalibrationParser::default();
    for record in records {
        parser.feed(&record)?;
    }
    Ok(parser.finish())
}

/// Incremental state of one parse pass
#[derive(Debug, Default)]
struct CalibrationParser {
    set: CalibrationSet,
    creation_date_seen: bool,
}

impl CalibrationParser {
    fn feed(&mut self, record: &SourceRecord) -> Result<(), ParseError> {
        let Some(label) = record.field(1) else {
            if record.kind() == RecordKind::Data {
                return self.push_coefficients(record);
            }
            trace!("line {}: skipping short row", record.line);
            return Ok(());
        };

        if label.contains(CREATION_TIME_MARKER) && !self.creation_date_seen {
            self.set.creation_date = Some(parse_creation_time(record.line, label)?);
            self.creation_date_seen = true;
        } else if label.starts_with(CAL_TEMPERATURE_MARKER) {
            self.set.cal_temperature = tail_from(label, CAL_TEMPERATURE_OFFSET).trim().to_string();
        } else if record.kind() == RecordKind::Data {
            self.push_coefficients(record)?;
        } else {
            debug!("line {}: ignoring row '{}'", record.line, label);
        }
        Ok(())
    }

    fn push_coefficients(&mut self, record: &SourceRecord) -> Result<(), ParseError> {
        if record.fields.len() < MIN_DATA_FIELDS {
            return Err(ParseError::MissingField {
                line: record.line,
                expected: MIN_DATA_FIELDS,
                found: record.fields.len(),
            });
        }

        // All four values convert before any is pushed; sequences stay equal length
        let mut values = [0.0f64; 4];
        for (slot, (index, column)) in values.iter_mut().zip(DATA_COLUMNS) {
            *slot = parse_coefficient(record.line, column, &record.fields[index])?;
        }

        let [wl, eno3, eswa, di] = values;
        self.set.wavelength.push(wl);
        self.set.extinction_nitrate.push(eno3);
        self.set.extinction_seawater.push(eswa);
        self.set.deionized_reference.push(di);
        Ok(())
    }

    fn finish(self) -> CalibrationSet {
        debug!(
            "parsed {} wavelength bin(s), creation date {:?}",
            self.set.channel_count(),
            self.set.creation_date
        );
        self.set
    }
}

fn parse_creation_time(line: u64, label: &str) -> Result<NaiveDateTime, ParseError> {
    let value = tail_from(label, CREATION_TIME_OFFSET).trim();
    NaiveDateTime::parse_from_str(value, CREATION_TIME_FORMAT).map_err(|source| {
        ParseError::InvalidTimestamp {
            line,
            value: value.to_string(),
            source,
        }
    })
}

fn parse_coefficient(line: u64, column: &'static str, raw: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        line,
        column,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Substring starting at a character offset; empty when the text is shorter
fn tail_from(text: &str, offset: usize) -> &str {
    match text.char_indices().nth(offset) {
        Some((byte_index, _)) => &text[byte_index..],
        None => "",
    }
}
