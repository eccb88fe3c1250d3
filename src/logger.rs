//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "rendering {} pages", count);
//! log!("error"; "{}: {:#}", path.display(), err);
//! ```
//!
//! Lines look like `[module] message`. Regular lines go to stdout and are cut
//! to the terminal width so a busy server stays one line per request.
//! `error` lines go to stderr untruncated, since the cause chain is the point.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write};

/// Width used when stdout is not a terminal.
const FALLBACK_WIDTH: usize = 120;

/// `[`, `]` and the space after the prefix.
const PREFIX_DECORATION_LEN: usize = 3;

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write one log line under the stream lock, so lines from concurrent
/// request handlers never interleave.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    if module.eq_ignore_ascii_case("error") {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        return;
    }

    let mut stdout = io::stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    let budget = terminal_width().saturating_sub(module.len() + PREFIX_DECORATION_LEN);
    writeln!(stdout, "{prefix} {}", fit_line(message, budget)).ok();
    stdout.flush().ok();
}

/// Queried per line; the terminal may be resized while serving.
fn terminal_width() -> usize {
    size().map_or(FALLBACK_WIDTH, |(width, _)| width as usize)
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "build" => prefix.bright_green().bold(),
        "render" => prefix.bright_cyan().bold(),
        "assets" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// First line of `message`, cut to at most `max_len` bytes on a char boundary.
fn fit_line(message: &str, max_len: usize) -> &str {
    let line = message.lines().next().unwrap_or_default();
    if line.len() <= max_len {
        return line;
    }
    let end = (0..=max_len)
        .rev()
        .find(|&i| line.is_char_boundary(i))
        .unwrap_or(0);
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_line_short() {
        assert_eq!(fit_line("hello", 10), "hello");
        assert_eq!(fit_line("hello", 5), "hello");
        assert_eq!(fit_line("", 5), "");
    }

    #[test]
    fn test_fit_line_cuts() {
        assert_eq!(fit_line("/docs/intro -> pages/docs/intro.md", 11), "/docs/intro");
    }

    #[test]
    fn test_fit_line_first_line_only() {
        assert_eq!(fit_line("first\nsecond", 80), "first");
    }

    #[test]
    fn test_fit_line_unicode_boundary() {
        // "€" is 3 bytes, cutting at 4 falls back to 3
        assert_eq!(fit_line("€€", 4), "€");
        assert_eq!(fit_line("€€", 2), "");
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        assert!(colorize_prefix("Serve").to_string().contains("[Serve]"));
        assert!(colorize_prefix("assets").to_string().contains("[assets]"));
    }
}
