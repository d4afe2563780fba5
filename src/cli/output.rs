use std::fmt;

use colored::Colorize;

/// Print an informational line.
pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

/// Print a success line.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[✓]".green(), message);
}

/// Print a warning line.
pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

/// Print an error line.
pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

/// Print a secondary hint line.
pub fn hint(message: impl fmt::Display) {
    println!("    {}", message.to_string().dimmed());
}

/// Print a section header.
pub fn section(title: impl fmt::Display) {
    println!("{}", format!("=== {} ===", title).bold());
}

/// Print raw text without any prefix, e.g. rendered reports.
pub fn plain(message: impl fmt::Display) {
    println!("{}", message);
}
