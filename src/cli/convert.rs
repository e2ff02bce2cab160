//! Non-interactive `convert` and `inspect` subcommands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use super::args::resolve_output_path;
use super::session::read_source;
use crate::pipeline::{check, encode_validated, write_calibration_file};
use crate::report::CalibrationSummary;

/// Options for one non-interactive conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions<'a> {
    pub input: &'a Path,
    pub serial: &'a str,
    pub output: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
    pub force: bool,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

/// Convert one vendor file and return the path written
pub fn run_convert(options: &ConvertOptions<'_>) -> Result<PathBuf> {
    println!(
        "\n {} Converting NUTNR-B calibration",
        style("◆").cyan().bold()
    );
    println!("   Input:  {}", style(options.input.display()).dim());
    println!("   Serial: {}", style(options.serial).dim());
    println!();

    let set = read_source(options.input)
        .with_context(|| format!("Failed to read calibration file: {}", options.input.display()))?;
    let encoded = encode_validated(
        &set,
        options.serial,
        options.lower_limit,
        options.upper_limit,
    )
    .with_context(|| format!("Rejected calibration file: {}", options.input.display()))?;

    let output_path = resolve_output_path(
        options.input,
        options.output,
        options.output_dir,
        &encoded.file_name,
    );
    if output_path.exists() && !options.force {
        anyhow::bail!(
            "Output file already exists: {} (use --force to overwrite)",
            output_path.display()
        );
    }

    CalibrationSummary::new(options.serial, options.input.to_path_buf(), &set)
        .with_output_name(encoded.file_name.clone())
        .display();

    write_calibration_file(&output_path, &encoded.records)?;

    println!(
        " {} Conversion complete: {}",
        style("✓").green().bold(),
        output_path.display()
    );
    Ok(output_path)
}

/// Read and check a vendor file, printing what was found
pub fn run_inspect(input: &Path) -> Result<()> {
    let set = read_source(input)
        .with_context(|| format!("Failed to read calibration file: {}", input.display()))?;

    CalibrationSummary::new("-", input.to_path_buf(), &set).display();

    check(&set).with_context(|| format!("Rejected calibration file: {}", input.display()))?;
    println!(
        " {} {} is a complete calibration file",
        style("✓").green().bold(),
        input.display()
    );
    Ok(())
}
