//! Tests for the interactive session loop, driven by scripted prompts
//!
//! The terminal prompter and file browser are replaced by fakes that replay
//! a fixed script and record what they were asked.

mod common;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Result;
use common::{write_cal, SAMPLE_CAL, SAMPLE_OUTPUT_CSV, SAMPLE_OUTPUT_NAME};
use nutnrb_cal::cli::session::{GO_AGAIN_PROMPT, RETRY_SOURCE_PROMPT, SAVE_PROMPT};
use nutnrb_cal::cli::{run_session, FilePicker, Prompter, SessionSettings};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedPrompter {
    serials: VecDeque<String>,
    answers: VecDeque<bool>,
    serial_defaults: Vec<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(serials: &[&str], answers: &[bool]) -> Self {
        Self {
            serials: serials.iter().map(|s| s.to_string()).collect(),
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn serial_number(&mut self, default: Option<&str>) -> Result<String> {
        self.serial_defaults.push(default.map(str::to_string));
        self.serials
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected serial prompt"))
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {}", message))
    }
}

#[derive(Default)]
struct ScriptedPicker {
    sources: VecDeque<Option<PathBuf>>,
    /// Directories to save into; the suggested name is joined on
    destinations: VecDeque<Option<PathBuf>>,
    suggested: Vec<String>,
}

impl FilePicker for ScriptedPicker {
    fn pick_source(&mut self) -> Result<Option<PathBuf>> {
        self.sources
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected source selection"))
    }

    fn pick_destination(
        &mut self,
        _source: &Path,
        suggested_name: &str,
    ) -> Result<Option<PathBuf>> {
        self.suggested.push(suggested_name.to_string());
        let dir = self
            .destinations
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected destination selection"))?;
        Ok(dir.map(|d| d.join(suggested_name)))
    }
}

fn output_dir(temp_dir: &TempDir) -> PathBuf {
    let dir = temp_dir.path().join("out");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_single_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "SNA2513.CAL", SAMPLE_CAL);
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source)]),
        destinations: VecDeque::from([Some(out.clone())]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    let expected = out.join(SAMPLE_OUTPUT_NAME);
    assert_eq!(summary.written, vec![expected.clone()]);
    assert_eq!(summary.abandoned, 0);
    assert_eq!(picker.suggested, vec![SAMPLE_OUTPUT_NAME.to_string()]);
    assert_eq!(prompter.asked, vec![SAVE_PROMPT, GO_AGAIN_PROMPT]);
    assert_eq!(std::fs::read_to_string(expected).unwrap(), SAMPLE_OUTPUT_CSV);
}

#[test]
fn test_cancelled_source_selection_asks_to_go_again() {
    let mut prompter = ScriptedPrompter::new(&["332513"], &[false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([None]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert!(summary.written.is_empty());
    assert_eq!(summary.abandoned, 1);
    assert_eq!(prompter.asked, vec![GO_AGAIN_PROMPT]);
}

#[test]
fn test_unreadable_source_can_be_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let broken = write_cal(
        &temp_dir,
        "broken.csv",
        "H,T_CAL_SWA 12.34\nE,217.14,bad,0.000157,0,24817\n",
    );
    let good = write_cal(&temp_dir, "good.csv", SAMPLE_CAL);
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[true, true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(broken), Some(good)]),
        destinations: VecDeque::from([Some(out.clone())]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert_eq!(summary.written, vec![out.join(SAMPLE_OUTPUT_NAME)]);
    assert_eq!(
        prompter.asked,
        vec![RETRY_SOURCE_PROMPT, SAVE_PROMPT, GO_AGAIN_PROMPT]
    );
}

#[test]
fn test_incomplete_source_is_never_written() {
    let temp_dir = TempDir::new().unwrap();
    // No T_CAL_SWA line
    let incomplete = write_cal(
        &temp_dir,
        "incomplete.csv",
        "H,File creation time: 15-Mar-2021 10:00:00\nE,217.14,0.002135,0.000157,0,24817\n",
    );
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[false, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(incomplete)]),
        destinations: VecDeque::from([Some(out.clone())]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert!(summary.written.is_empty());
    assert_eq!(summary.abandoned, 1);
    assert_eq!(prompter.asked, vec![RETRY_SOURCE_PROMPT, GO_AGAIN_PROMPT]);
    assert!(picker.suggested.is_empty(), "save dialog must not open");
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_declining_save_abandons_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "cal.csv", SAMPLE_CAL);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[false, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source)]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert_eq!(summary.abandoned, 1);
    assert!(picker.suggested.is_empty());
}

#[test]
fn test_cancelled_save_dialog_abandons_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "cal.csv", SAMPLE_CAL);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source)]),
        destinations: VecDeque::from([None]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert!(summary.written.is_empty());
    assert_eq!(summary.abandoned, 1);
    assert_eq!(picker.suggested, vec![SAMPLE_OUTPUT_NAME.to_string()]);
}

#[test]
fn test_write_failure_keeps_session_running() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "cal.csv", SAMPLE_CAL);
    let missing_dir = temp_dir.path().join("does_not_exist");
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513", "332513"], &[true, true, true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source.clone()), Some(source)]),
        destinations: VecDeque::from([Some(missing_dir), Some(out.clone())]),
        ..Default::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &SessionSettings::default()).unwrap();

    assert_eq!(summary.abandoned, 1);
    assert_eq!(summary.written, vec![out.join(SAMPLE_OUTPUT_NAME)]);
}

#[test]
fn test_previous_serial_is_offered_again() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "cal.csv", SAMPLE_CAL);
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513", "10077"], &[true, true, true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source.clone()), Some(source)]),
        destinations: VecDeque::from([Some(out.clone()), Some(out.clone())]),
        ..Default::default()
    };
    let settings = SessionSettings {
        initial_serial: Some("332000".to_string()),
        ..SessionSettings::default()
    };

    let summary = run_session(&mut prompter, &mut picker, &settings).unwrap();

    assert_eq!(
        prompter.serial_defaults,
        vec![Some("332000".to_string()), Some("332513".to_string())]
    );
    assert_eq!(
        summary.written,
        vec![
            out.join(SAMPLE_OUTPUT_NAME),
            out.join("CGINS-NUTNRB-00077__20210315.csv")
        ]
    );
}

#[test]
fn test_custom_limits_are_written() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_cal(&temp_dir, "cal.csv", SAMPLE_CAL);
    let out = output_dir(&temp_dir);

    let mut prompter = ScriptedPrompter::new(&["332513"], &[true, false]);
    let mut picker = ScriptedPicker {
        sources: VecDeque::from([Some(source)]),
        destinations: VecDeque::from([Some(out.clone())]),
        ..Default::default()
    };
    let settings = SessionSettings {
        lower_limit: 220.5,
        upper_limit: 238.0,
        ..SessionSettings::default()
    };

    run_session(&mut prompter, &mut picker, &settings).unwrap();

    let text = std::fs::read_to_string(out.join(SAMPLE_OUTPUT_NAME)).unwrap();
    assert!(text.contains("332513,CC_lower_wavelength_limit_for_spectra_fit,220.5,\n"));
    assert!(text.contains("332513,CC_upper_wavelength_limit_for_spectra_fit,238.0,\n"));
}
