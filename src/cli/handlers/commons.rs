// src/cli/handlers/commons.rs

// Status lines shared by the handlers. Informational output goes to stdout,
// errors to stderr.

use colored::Colorize;

/// Opens the run with the tool banner.
pub fn intro(title: &str) {
    println!("{} {}", "┌".dimmed(), title.bold().on_cyan().black());
}

/// Prints a neutral status line.
pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

/// Prints a completed-step line.
pub fn success(message: &str) {
    println!("{} {}", "◆".green(), message);
}

/// Prints a non-fatal problem.
pub fn warn(message: &str) {
    println!("{} {}", "▲".yellow(), message.yellow());
}

/// Prints a fatal error to stderr.
pub fn error(label: &str, message: &str) {
    eprintln!("\n{}: {}", label.red().bold(), message);
}

/// Closes the run with a final status line.
pub fn outro(message: &str) {
    println!("{} {}\n", "└".dimmed(), message);
}
