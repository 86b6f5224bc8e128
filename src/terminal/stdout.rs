use super::Terminal;
use crate::{Error, Result};

use console::Term;
use std::io;
use tracing::debug;

/// Terminal backed by the process stdout.
#[derive(Debug, Clone)]
pub struct ConsoleTerminal {
    term: Term,
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ConsoleTerminal {
    /// Create a terminal writing to stdout.
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Create a terminal writing to stderr.
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn size(&self) -> Result<(u16, u16)> {
        // console reports (rows, columns).
        let (rows, columns) = self.term.size_checked().ok_or(Error::TerminalUnavailable)?;
        Ok((columns, rows))
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.term.write_str(s)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.term.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.term.show_cursor()
    }

    /// Turn on escape sequence processing.
    ///
    /// `console` has no public call for this. On Windows its colour support
    /// check (`TermFeatures::colors_supported`) switches the console into
    /// virtual terminal mode as part of answering, and elsewhere it only reads
    /// the environment.
    fn enable_ansi(&mut self) {
        let supported = self.term.features().colors_supported();
        debug!(supported, "Checked terminal colour support");
    }

    fn flush(&mut self) -> io::Result<()> {
        self.term.flush()
    }
}
