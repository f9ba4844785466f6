//! Pure formatting functions for UI output.
//!
//! Colour comes from the `console` crate, which drops styling on its own when
//! the terminal does not support it.

use console::style;
use std::fmt::Debug;

/// Label shown for a menu separator
pub const SEPARATOR_LABEL: &str = "──────────────";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a failed action: styled one-liner, then the raw error.
pub fn display_failure(err: &(impl std::fmt::Display + Debug)) {
    eprintln!("{}", style(err.to_string()).red());
    eprintln!("{:?}", err);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("\n{}\n", style(message).yellow());
}

/// Print "<done>: <action>" in green.
pub fn display_done(line: &str) {
    println!("{}\n", style(line).green());
}

/// Print a title followed by indented red items (conflicted files, markers).
pub fn display_list(title: &str, items: &[String]) {
    println!();
    println!("{}", title);
    for item in items {
        println!("{}", style(format!("  {}", item)).red());
    }
}

/// Print command output as-is, skipping empty output.
pub fn display_output(output: &str) {
    let trimmed = output.trim_end();
    if !trimmed.is_empty() {
        println!("{}", trimmed);
    }
}

/// Echo a git command about to run.
pub fn display_command(args: &[&str]) {
    println!("{}", style(format!("$ git {}", args.join(" "))).dim());
}

/// `[branch][flow]` prefix placed before every prompt.
pub fn prompt_prefix(branch: &str, flow: &str) -> String {
    format!("[{}][{}]", style(branch).magenta(), style(flow).yellow())
}

/// Menu label for a separator.
pub fn separator_label() -> String {
    style(SEPARATOR_LABEL).dim().to_string()
}
