//! Terminal output.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use apigen_compiler::codegen::{WriteAction, WrittenFile};

pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const GREEN: Color = Color::Color256(82);
    pub const YELLOW: Color = Color::Color256(220);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const DOT: &str = "\u{00B7}"; // ·
}

/// Disables styling on stdout and stderr.
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

pub fn header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("apigen").fg(colors::CYAN).bold(),
        style(version).dim()
    );
    println!();
}

pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::TARGET_FILLED).fg(colors::GREEN), msg);
}

pub fn error(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

pub fn info(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN), msg);
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// One line per written file, relative to the project directory.
pub fn written(file: &WrittenFile, root: &Path) {
    let shown = file.path.strip_prefix(root).unwrap_or(&file.path);
    let action = match file.action {
        WriteAction::Create => style(file.action.as_str()).fg(colors::GREEN),
        WriteAction::Update => style(file.action.as_str()).fg(colors::YELLOW),
    };
    println!("    {:>8} {}", action, shown.display());
}

/// Spinner on stderr; hidden when stderr is not a terminal.
///
/// An invisible spinner is returned when `visible` is false, so machine
/// readable output stays clean.
pub fn spinner(msg: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}
