//! CLI module - argument parsing, interactive prompts and the session loop

mod args;
pub mod convert;
pub mod file_selector;
mod prompts;
pub mod session;

pub use args::{resolve_output_path, Cli, Commands};
pub use convert::{run_convert, run_inspect, ConvertOptions};
pub use prompts::*;
pub use session::{run_session, FilePicker, Prompter, SessionSettings, SessionSummary};
