//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{LOWER_WAVELENGTH_LIMIT, UPPER_WAVELENGTH_LIMIT};

/// nutnrb-cal - Convert SUNA/NUTNR-B vendor calibration files into CGINS calibration records.
///
/// Without a subcommand an interactive session starts: enter the serial
/// number, pick the vendor file, review the summary and choose where to save.
#[derive(Parser, Debug)]
#[command(name = "nutnrb-cal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Serial number offered as the default at the first prompt
    #[arg(short, long, value_parser = validate_serial)]
    pub serial: Option<String>,

    /// Directory the save dialog starts in.
    /// Defaults to the directory of the selected vendor file.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Lower wavelength limit (nm) written for the spectra fit
    #[arg(long, global = true, default_value_t = LOWER_WAVELENGTH_LIMIT, value_parser = validate_limit)]
    pub lower_limit: f64,

    /// Upper wavelength limit (nm) written for the spectra fit
    #[arg(long, global = true, default_value_t = UPPER_WAVELENGTH_LIMIT, value_parser = validate_limit)]
    pub upper_limit: f64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one vendor calibration file without prompting
    Convert {
        /// Vendor calibration file (CSV)
        input: PathBuf,

        /// Instrument serial number, e.g. 332513
        #[arg(short, long, value_parser = validate_serial)]
        serial: String,

        /// Output file path.
        /// Defaults to the derived CGINS-NUTNRB-<serial>__<date>.csv name.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the derived output file name (defaults to the input directory)
        #[arg(long, conflicts_with = "output")]
        output_dir: Option<PathBuf>,

        /// Overwrite the output file if it already exists
        #[arg(long, default_value = "false")]
        force: bool,
    },

    /// Read and check a vendor calibration file without writing anything
    Inspect {
        /// Vendor calibration file (CSV)
        input: PathBuf,
    },
}

impl Cli {
    /// Wavelength limits as (lower, upper), rejecting an inverted pair
    pub fn limits(&self) -> anyhow::Result<(f64, f64)> {
        if self.lower_limit >= self.upper_limit {
            anyhow::bail!(
                "--lower-limit ({}) must be below --upper-limit ({})",
                self.lower_limit,
                self.upper_limit
            );
        }
        Ok((self.lower_limit, self.upper_limit))
    }
}

/// Resolve where `convert` writes: an explicit path wins, otherwise the
/// derived file name inside `output_dir` or next to the input.
pub fn resolve_output_path(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
    file_name: &str,
) -> PathBuf {
    if let Some(path) = output {
        return path.to_path_buf();
    }
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(file_name)
}

/// Validator for serial numbers
fn validate_serial(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("serial number must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validator for wavelength limits
fn validate_limit(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("wavelength limit must be a positive number, got {}", value))
    }
}
