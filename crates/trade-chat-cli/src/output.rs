//! Terminal output helpers

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;
use trade_chat_core::render::LOADING_INDICATOR;

/// Braille spinner animation frames
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const FALLBACK_WIDTH: u16 = 100;

/// Whether stdout should get ANSI colors
pub fn color_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Current terminal width, or a sane default when not attached to one
pub fn terminal_width() -> u16 {
    ratatui::crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Create and start the "waiting for reply" spinner.
///
/// Hidden when stderr is not a terminal.
pub fn spinner() -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(LOADING_INDICATOR);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn banner(service: &str, portfolio: Option<&str>, color: bool) -> String {
    let title = "Trade Chat";
    let portfolio = portfolio.unwrap_or("(not set)");
    if color {
        format!(
            "{}\n  service:   {}\n  portfolio: {}\n  /help for commands\n",
            title.bold(),
            service.cyan(),
            portfolio.cyan()
        )
    } else {
        format!("{title}\n  service:   {service}\n  portfolio: {portfolio}\n  /help for commands\n")
    }
}

pub fn error(message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", "×".red())
    } else {
        format!("× {message}")
    }
}

pub fn notice(message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", "✓".green())
    } else {
        format!("✓ {message}")
    }
}
