//! Terminal styling utilities

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[x] ");
pub static WAVE: Emoji<'_, '_> = Emoji("🌊 ", ">> ");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        WAVE,
        style("NUTNR-B Calibration Converter").cyan().bold()
    );
    println!(
        "    {}",
        style("SUNA vendor calibration → CGINS calibration records").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("    {} {}", CROSS, style(message).red().bold());
}
