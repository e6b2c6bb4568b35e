//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Color a readiness flag for terminal display
pub fn color_ready(ready: bool) -> String {
    if ready {
        "Ready".green().to_string()
    } else {
        "NotReady".red().to_string()
    }
}

/// Color a current/target ratio: green below target, yellow near it,
/// red above
pub fn color_ratio(ratio: Option<f64>) -> String {
    match ratio {
        None => "-".dimmed().to_string(),
        Some(ratio) => {
            let formatted = format!("{:.2}", ratio);
            if ratio < 0.8 {
                formatted.green().to_string()
            } else if ratio <= 1.0 {
                formatted.yellow().to_string()
            } else {
                formatted.red().to_string()
            }
        }
    }
}
