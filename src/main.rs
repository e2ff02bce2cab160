//! nutnrb-cal: NUTNR-B calibration converter CLI
//!
//! Interactive by default; `convert` and `inspect` run without prompts.

use anyhow::Result;
use clap::Parser;

use nutnrb_cal::cli::{
    run_convert, run_inspect, run_session, Cli, Commands, ConvertOptions, SessionSettings,
    TerminalFilePicker, TerminalPrompter,
};
use nutnrb_cal::utils::{print_banner, print_info};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (lower_limit, upper_limit) = cli.limits()?;

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Convert {
                input,
                serial,
                output,
                output_dir,
                force,
            } => run_convert(&ConvertOptions {
                input,
                serial,
                output: output.as_deref(),
                output_dir: output_dir.as_deref(),
                force: *force,
                lower_limit,
                upper_limit,
            })
            .map(|_| ()),
            Commands::Inspect { input } => run_inspect(input),
        };
    }

    print_banner(env!("CARGO_PKG_VERSION"));

    let settings = SessionSettings {
        initial_serial: cli.serial.clone(),
        lower_limit,
        upper_limit,
    };
    let mut prompter = TerminalPrompter;
    let mut picker = TerminalFilePicker::new(cli.output_dir.clone());

    let summary = run_session(&mut prompter, &mut picker, &settings)?;
    print_info(&format!(
        "{} file(s) written, {} conversion(s) abandoned",
        summary.written.len(),
        summary.abandoned
    ));

    Ok(())
}
