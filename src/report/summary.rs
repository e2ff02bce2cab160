//! Calibration summary shown before a file is saved

use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::CalibrationSet;

/// What was read from one vendor file
#[derive(Debug, Default)]
pub struct CalibrationSummary {
    pub serial: String,
    pub source: PathBuf,
    pub creation_date: Option<String>,
    pub cal_temperature: String,
    pub channel_count: usize,
    pub wavelength_range: Option<(f64, f64)>,
    pub output_name: Option<String>,
}

impl CalibrationSummary {
    pub fn new(serial: &str, source: PathBuf, set: &CalibrationSet) -> Self {
        Self {
            serial: serial.to_string(),
            source,
            creation_date: set
                .creation_date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
            cal_temperature: set.cal_temperature.clone(),
            channel_count: set.channel_count(),
            wavelength_range: set.wavelength_range(),
            output_name: None,
        }
    }

    pub fn with_output_name(mut self, name: String) -> Self {
        self.output_name = Some(name);
        self
    }

    /// Render the summary as a table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🔢 Serial"), Cell::new(&self.serial)]);
        table.add_row(vec![
            Cell::new("📁 Source"),
            Cell::new(self.source.display()),
        ]);
        table.add_row(vec![
            Cell::new("🕒 Created"),
            missing_or(self.creation_date.as_deref()),
        ]);
        table.add_row(vec![
            Cell::new("🌡️  Cal temperature"),
            missing_or(Some(self.cal_temperature.as_str()).filter(|t| !t.is_empty())),
        ]);
        table.add_row(vec![
            Cell::new("📊 Wavelength bins"),
            Cell::new(self.channel_count).fg(if self.channel_count == 0 {
                Color::Red
            } else {
                Color::White
            }),
        ]);

        let range = self
            .wavelength_range
            .map(|(lo, hi)| format!("{:.2} – {:.2} nm", lo, hi));
        table.add_row(vec![
            Cell::new("🌈 Wavelength range"),
            missing_or(range.as_deref()),
        ]);

        if let Some(name) = &self.output_name {
            table.add_row(vec![
                Cell::new("💾 Output file"),
                Cell::new(name).fg(Color::Green).add_attribute(Attribute::Bold),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CALIBRATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
        println!();
    }
}

fn missing_or(value: Option<&str>) -> Cell {
    match value {
        Some(v) => Cell::new(v),
        None => Cell::new("(missing)").fg(Color::Red),
    }
}
