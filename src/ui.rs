#![allow(dead_code)]

use colored::Colorize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message to stderr
pub fn warn(msg: &str) {
    eprintln!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}
