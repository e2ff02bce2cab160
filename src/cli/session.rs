//! Interactive conversion session
//!
//! One pass: serial number, vendor file, summary, destination, write. The
//! session then asks whether to do another file. Terminal input and file
//! selection are reached only through [`Prompter`] and [`FilePicker`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};

use crate::pipeline::{
    encode_validated, parse_file, write_calibration_file, CalibrationSet, ParseError,
    LOWER_WAVELENGTH_LIMIT, UPPER_WAVELENGTH_LIMIT,
};
use crate::report::CalibrationSummary;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_error, print_info,
    print_success, print_warning,
};

pub const GO_AGAIN_PROMPT: &str = "Would you like to do another file?";
pub const RETRY_SOURCE_PROMPT: &str = "Select a different calibration file?";
pub const SAVE_PROMPT: &str = "Save the new cal file?";

/// Text prompts used by the session
pub trait Prompter {
    /// Ask for a non-empty instrument serial number
    fn serial_number(&mut self, default: Option<&str>) -> Result<String>;

    /// Yes/no question with the given default answer
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

/// File selection used by the session; `None` means the user cancelled
pub trait FilePicker {
    fn pick_source(&mut self) -> Result<Option<PathBuf>>;

    /// Choose where to save `suggested_name`, converted from `source`
    fn pick_destination(&mut self, source: &Path, suggested_name: &str)
        -> Result<Option<PathBuf>>;
}

/// Session-wide settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub initial_serial: Option<String>,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            initial_serial: None,
            lower_limit: LOWER_WAVELENGTH_LIMIT,
            upper_limit: UPPER_WAVELENGTH_LIMIT,
        }
    }
}

/// What happened over a whole session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Files written, in order
    pub written: Vec<PathBuf>,
    /// Conversions given up on (cancelled or failed)
    pub abandoned: usize,
}

#[derive(Debug)]
enum Outcome {
    Written(PathBuf),
    Abandoned,
}

/// Run conversions until the user declines to do another file
pub fn run_session(
    prompter: &mut dyn Prompter,
    picker: &mut dyn FilePicker,
    settings: &SessionSettings,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut last_serial = settings.initial_serial.clone();

    loop {
        let serial = prompter.serial_number(last_serial.as_deref())?;
        last_serial = Some(serial.clone());

        match convert_one(prompter, picker, &serial, settings)? {
            Outcome::Written(path) => summary.written.push(path),
            Outcome::Abandoned => summary.abandoned += 1,
        }

        if !prompter.confirm(GO_AGAIN_PROMPT, false)? {
            break;
        }
    }

    info!(
        "session finished: {} written, {} abandoned",
        summary.written.len(),
        summary.abandoned
    );
    Ok(summary)
}

fn convert_one(
    prompter: &mut dyn Prompter,
    picker: &mut dyn FilePicker,
    serial: &str,
    settings: &SessionSettings,
) -> Result<Outcome> {
    let (source, set, encoded) = loop {
        let Some(source) = picker.pick_source()? else {
            print_warning("Operation cancelled!");
            return Ok(Outcome::Abandoned);
        };

        let problem = match read_source(&source) {
            Ok(set) => {
                match encode_validated(&set, serial, settings.lower_limit, settings.upper_limit) {
                    Ok(encoded) => break (source, set, encoded),
                    Err(e) => format!("{} is not a usable calibration file: {}", source.display(), e),
                }
            }
            Err(e) => format!("Could not read {}: {}", source.display(), e),
        };

        warn!("{}", problem);
        print_error(&problem);
        if !prompter.confirm(RETRY_SOURCE_PROMPT, true)? {
            return Ok(Outcome::Abandoned);
        }
    };

    CalibrationSummary::new(serial, source.clone(), &set)
        .with_output_name(encoded.file_name.clone())
        .display();

    if !prompter.confirm(SAVE_PROMPT, true)? {
        print_warning("Operation cancelled!");
        return Ok(Outcome::Abandoned);
    }

    let Some(destination) = picker.pick_destination(&source, &encoded.file_name)? else {
        print_warning("Operation cancelled!");
        return Ok(Outcome::Abandoned);
    };

    if let Err(e) = write_calibration_file(&destination, &encoded.records) {
        print_error(&format!("{:#}", e));
        return Ok(Outcome::Abandoned);
    }

    print_success(&format!("Saved {}", destination.display()));
    Ok(Outcome::Written(destination))
}

/// Parse a vendor file behind a spinner
pub fn read_source(path: &Path) -> Result<CalibrationSet, ParseError> {
    let spinner = create_spinner(&format!("Reading {}...", path.display()));
    match parse_file(path) {
        Ok(set) => {
            finish_with_success(
                &spinner,
                &format!("Read {} wavelength bin(s)", set.channel_count()),
            );
            Ok(set)
        }
        Err(e) => {
            finish_with_warning(&spinner, "Calibration file could not be read");
            if let Some(line) = e.line() {
                print_info(&format!("Check line {} of the file", line));
            }
            Err(e)
        }
    }
}
