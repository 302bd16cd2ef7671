//! CLI output formatting utilities.
//!
//! Action log lines go to stdout with per-kind coloring; error messages go to
//! stderr. Every colorization is gated on the stream being a terminal, so
//! piped output keeps the fixed log line format.

use owo_colors::{OwoColorize, Stream};

use skelly_lib::apply::Action;

pub mod symbols {
  pub const ERROR: &str = "✗";
}

/// Print one action log line to stdout.
pub fn print_action(action: &Action) {
  let line = action.to_string();
  match action {
    Action::DirCreated(_) | Action::FileCreated(_) => {
      println!("{}", line.if_supports_color(Stream::Stdout, |l| l.green()));
    }
    Action::DirExists(_) | Action::FileExists(_) => {
      println!("{}", line.if_supports_color(Stream::Stdout, |l| l.dimmed()));
    }
    Action::ChmodFailed { .. } => {
      println!("{}", line.if_supports_color(Stream::Stdout, |l| l.yellow()));
    }
  }
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}
