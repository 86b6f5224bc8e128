//! Terminal collaborators used by the bar group.
//!
//! The group only needs a handful of capabilities from the terminal: query its
//! size, write raw text, toggle the cursor and make sure ANSI escapes are
//! interpreted. The [`Terminal`] trait captures exactly that.
//!
//! # Overview
//!
//! - `stdout` - [`ConsoleTerminal`], stdout through the `console` crate
//! - `memory` - [`MemoryTerminal`], an in-memory capture for headless runs
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::terminal::{MemoryTerminal, Terminal};
//!
//! let mut term = MemoryTerminal::new(80, 24);
//! term.write_str("hello").unwrap();
//! assert_eq!(term.size().unwrap(), (80, 24));
//! assert_eq!(term.output(), "hello");
//! ```

pub(crate) mod stdout;
pub(crate) mod memory;

pub use self::stdout::ConsoleTerminal;
pub use self::memory::MemoryTerminal;

use crate::Result;
use std::fmt::Debug;
use std::io;

/// Hide the cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Clear everything above the cursor, then move up 500 lines.
///
/// Approximates "clear the viewport and go home" for viewports up to 500 rows.
pub const CLEAR_SCREEN: &str = "\x1b[1J\x1b[500A";

/// The capabilities a [`BarGroup`](crate::BarGroup) needs from a terminal.
pub trait Terminal: Debug + Send {
    /// Return `(columns, rows)`, or [`Error::TerminalUnavailable`](crate::Error::TerminalUnavailable)
    /// when no terminal is attached.
    fn size(&self) -> Result<(u16, u16)>;

    /// Write raw text, escape sequences included.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_str(HIDE_CURSOR)
    }

    /// Show the cursor.
    fn show_cursor(&mut self) -> io::Result<()> {
        self.write_str(SHOW_CURSOR)
    }

    /// Make the terminal interpret ANSI escapes. A no-op where that is the default.
    fn enable_ansi(&mut self) {}

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
