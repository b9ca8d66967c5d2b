// fieldstrip/src/ui/output_format.rs
//! Status message formatting for stdout and stderr.
//!
//! Colors are applied only when the caller says the stream supports them;
//! see [`ColorMode`].

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Which streams may receive ANSI colors for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode {
    pub stdout: bool,
    pub stderr: bool,
}

impl ColorMode {
    /// Detects terminal support unless colors were disabled.
    pub fn detect(no_color: bool) -> Self {
        if no_color {
            return Self::plain();
        }
        Self {
            stdout: io::stdout().is_terminal(),
            stderr: io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            stdout: false,
            stderr: false,
        }
    }
}

pub fn print_success_message<W: Write>(w: &mut W, msg: &str, colored: bool) -> io::Result<()> {
    if colored {
        writeln!(w, "{}", msg.green())
    } else {
        writeln!(w, "{}", msg)
    }
}

pub fn print_info_message<W: Write>(w: &mut W, msg: &str, colored: bool) -> io::Result<()> {
    if colored {
        writeln!(w, "{}", msg.cyan())
    } else {
        writeln!(w, "{}", msg)
    }
}

pub fn print_warn_message<W: Write>(w: &mut W, msg: &str, colored: bool) -> io::Result<()> {
    if colored {
        writeln!(w, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(w, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(w: &mut W, msg: &str, colored: bool) -> io::Result<()> {
    if colored {
        writeln!(w, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(w, "error: {}", msg)
    }
}
