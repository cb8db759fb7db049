//! Message helpers shared by the one-shot commands and the interactive session.
//!
//! Each `print_*` function has a `format_*` twin that builds the colored line without
//! writing it, so the session can reuse the same look and tests can inspect it.
//!
//! # Public API
//! - [`print_error`] / [`print_error_with_usage`]: Failures, optionally with a usage table
//! - [`print_warning`]: Degraded but still working (e.g. no persistent cache)
//! - [`print_success`] / [`print_info`]: Confirmations and hints
//! - [`print_section_header`]: Title above a listing, the heatmap or history

use colored::*;

const ERROR_MARK: &str = "✕ Error:";
const WARNING_MARK: &str = "!";
const SUCCESS_MARK: &str = "✓";

pub fn format_error(message: &str) -> String {
    format!("{} {}", ERROR_MARK.red(), message.white())
}

pub fn format_warning(message: &str) -> String {
    format!("{} {}", WARNING_MARK.yellow(), message.yellow())
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", SUCCESS_MARK.green(), message.white())
}

/// Two-column usage table, patterns padded to the widest one
pub fn format_usage(usage: &[(&str, &str)]) -> Vec<String> {
    let width = usage
        .iter()
        .map(|(pattern, _)| pattern.chars().count())
        .max()
        .unwrap_or(0);

    usage
        .iter()
        .map(|(pattern, description)| {
            let padded = format!("{pattern:<width$}");
            format!("  {}  {}", padded.white(), description.bright_black())
        })
        .collect()
}

pub fn print_error(message: &str) {
    println!("\n{}\n", format_error(message));
}

/// Error line followed by the accepted commands
pub fn print_error_with_usage(message: &str, usage: &[(&str, &str)]) {
    println!("\n{}\n", format_error(message));
    if usage.is_empty() {
        return;
    }

    println!("{}", "Usage:".blue());
    for line in format_usage(usage) {
        println!("{line}");
    }
    println!();
}

pub fn print_warning(message: &str) {
    println!("\n{}", format_warning(message));
}

pub fn print_success(message: &str) {
    println!("\n{}", format_success(message));
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}\n", format!("{header}:").white().bold());
}
