//! Console helpers for user-facing lines.
//! Prefixes are colored only when stdout is a TTY.

use owo_colors::OwoColorize;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

/// Labeled `key: value` line; the label is bold on a TTY.
pub fn print_field(label: &str, value: &str) {
    if is_tty() {
        println!("{}: {}", label.bold(), value);
    } else {
        println!("{}: {}", label, value);
    }
}
