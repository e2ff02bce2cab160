//! Calibration record CSV output
//!
//! Rows end in a bare `\n` on every platform; the asset tooling reading
//! these files splits on either ending.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{CalibrationRecord, RECORD_HEADER};

/// Write the header and records to any writer
pub fn write_records<W: Write>(records: &[CalibrationRecord], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(RECORD_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save calibration records to a CSV file
pub fn write_calibration_file(path: &Path, records: &[CalibrationRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_records(records, file)
        .with_context(|| format!("Failed to write calibration file: {}", path.display()))?;
    log::info!("wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}
