//! Error handling for the loading-bars library.
//!
//! Every error here is a local precondition violation raised synchronously by
//! the call that violates it, or an I/O failure while writing to the terminal.
//! Checks run before any state is touched, so a failed call leaves the bar and
//! the group exactly as they were.

use std::io;
use thiserror::Error;

/// Errors that can happen when driving loading bars.
#[derive(Error, Debug)]
pub enum Error {
    /// An advance would push a bar past its total.
    ///
    /// This indicates a logic bug in the caller; the bar is left untouched.
    #[error("amount {amount} is too much for {name:?}: {current}/{total}")]
    OutOfRange {
        name: String,
        amount: u64,
        current: u64,
        total: u64,
    },

    /// A call was made with arguments the group cannot accept.
    ///
    /// Returned by [`BarGroup::group`](crate::BarGroup::group) with fewer than
    /// two distinct bars or with bars owned by another group, and by
    /// [`BarGroup::add_bar`](crate::BarGroup::add_bar) with a zero total.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The terminal size could not be queried, e.g. stdout is redirected.
    ///
    /// The group recovers from this by laying bars out against its configured
    /// fallback width.
    #[error("Terminal unavailable")]
    TerminalUnavailable,

    /// I/O Error.
    ///
    /// Wraps failures while writing escape sequences or repaint frames.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for operations that can fail with a loading-bars error.
pub type Result<T> = std::result::Result<T, Error>;
