//! Interactive prompts using dialoguer, and the terminal file picker

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{Confirm, Input};

use super::file_selector::{default_start_dir, run_file_selector, FileSelectResult, SelectMode};
use super::session::{FilePicker, Prompter};

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn serial_number(&mut self, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt("Enter the NUTNR-B serial number")
            .validate_with(|s: &String| -> Result<(), &str> {
                if s.trim().is_empty() {
                    Err("Serial number must not be empty")
                } else {
                    Ok(())
                }
            });
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        confirm_step(message, default)
    }
}

/// Prompt user to confirm a yes/no step
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// File picking through the ratatui browser
///
/// The source browser reopens where the last file was picked. The save flow
/// picks a folder, then confirms the file name.
#[derive(Debug)]
pub struct TerminalFilePicker {
    source_dir: PathBuf,
    output_dir: Option<PathBuf>,
}

impl TerminalFilePicker {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            source_dir: default_start_dir(),
            output_dir,
        }
    }
}

impl FilePicker for TerminalFilePicker {
    fn pick_source(&mut self) -> Result<Option<PathBuf>> {
        match run_file_selector(SelectMode::Source, &self.source_dir)? {
            FileSelectResult::Selected(path) => {
                if let Some(parent) = path.parent() {
                    self.source_dir = parent.to_path_buf();
                }
                Ok(Some(path))
            }
            FileSelectResult::Cancelled => Ok(None),
        }
    }

    fn pick_destination(
        &mut self,
        source: &Path,
        suggested_name: &str,
    ) -> Result<Option<PathBuf>> {
        let start = self
            .output_dir
            .clone()
            .or_else(|| source.parent().map(Path::to_path_buf))
            .unwrap_or_else(default_start_dir);

        let dir = match run_file_selector(SelectMode::Directory, &start)? {
            FileSelectResult::Selected(dir) => dir,
            FileSelectResult::Cancelled => return Ok(None),
        };

        let name: String = Input::new()
            .with_prompt("Save as")
            .default(suggested_name.to_string())
            .interact_text()?;
        let mut path = dir.join(name.trim());
        if path.extension().is_none() {
            path.set_extension("csv");
        }

        if path.exists() && !confirm_step(&format!("{} exists. Overwrite?", path.display()), false)? {
            return Ok(None);
        }

        self.output_dir = Some(dir);
        Ok(Some(path))
    }
}
