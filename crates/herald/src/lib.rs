//! ## Features
//!
//! - Prefixed status lines (warn, success) for the chat driver
//! - Multi-line message support, one prefix per line
//! - Timestamped session events
//! - Banners for startup and shutdown
//! - All output to stderr so stdout carries only bot replies
//!
//! ## Usage
//!
//! Status lines: `warn()`, `success()`
//!
//! Session events: `event()`
//!
//! Banners: `announce()`, `farewell()`

use chrono::Local;
use colored::*;

/// Write every line of a message to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Format a colored, fixed-width prefix for status lines
fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7 - prefix.len() - 2)
}

fn log_prefixed(color: Color, prefix: &str, message: &str) {
  let prefix = format_prefix(color, prefix);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Repeat a border character to the given width
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Render a message framed by border lines
pub fn as_banner<F>(log_fn: F, message: &str, width: Option<usize>, border_char: Option<char>)
where
  F: Fn(&str),
{
  let width = width.unwrap_or(50);
  let border_char = border_char.unwrap_or('=');

  let banner = banner_line(width, border_char);

  log_fn(&banner);
  log_fn(message);
  log_fn(&banner);
}

/// Something the user should know about but that does not stop the session
pub fn warn(message: &str) {
  log_prefixed(Color::Yellow, "warn", message);
}

/// Startup step completed
pub fn success(message: &str) {
  log_prefixed(Color::Green, "sccs", message);
}

/// Timestamped session event (start, end, dataset reload)
pub fn event(message: &str) {
  let timestamp = Local::now().format("%H:%M:%S").to_string();
  let prefix = format!("[{}] [{}]", "event".blue().bold(), timestamp.cyan());
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Startup banner
pub fn announce(message: &str) {
  as_banner(|msg| log(&msg.blue().bold().to_string()), message, Some(50), Some('-'));
}

/// Closing banner, printed when the session ends
pub fn farewell(message: &str) {
  as_banner(|msg| log(&msg.green().bold().to_string()), message, Some(45), Some('~'));
}

/// Macros for coverage-excluded logging - these expand with LCOV_EXCL_LINE at call sites
#[macro_export]
macro_rules! warn {
  ($msg:expr) => {
    $crate::warn($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($msg:expr) => {
    $crate::success($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! event {
  ($msg:expr) => {
    $crate::event($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! announce {
  ($msg:expr) => {
    $crate::announce($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! farewell {
  ($msg:expr) => {
    $crate::farewell($msg); // LCOV_EXCL_LINE
  };
}
