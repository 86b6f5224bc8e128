//! Builder pattern implementation for creating [`BarGroup`] instances.
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::{BarGroupBuilder, MemoryTerminal};
//!
//! # fn main() -> loading_bars::Result<()> {
//! let term = MemoryTerminal::new(100, 30);
//! let group = BarGroupBuilder::new()
//!     .terminal(term.clone())
//!     .max_text(3)
//!     .completion_message("done!")
//!     .on_complete(|bar| eprintln!("{} finished", bar.name))
//!     .build()?;
//!
//! let bar = group.add_bar("fetch", 2)?;
//! bar.advance(2)?;
//! assert_eq!(bar.rendered(), "fetch done!");
//! # Ok(())
//! # }
//! ```

use super::config::GroupConfig;
use super::group::BarGroup;
use crate::bar::BarSnapshot;
use crate::terminal::{ConsoleTerminal, Terminal};
use crate::Result;

use std::sync::Arc;

/// A builder used to create a [`BarGroup`].
#[derive(Default)]
pub struct BarGroupBuilder {
    config: GroupConfig,
    terminal: Option<Box<dyn Terminal>>,
}

impl BarGroupBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        BarGroupBuilder::default()
    }

    /// Set the maximum number of scrollback lines.
    pub fn max_text(mut self, max_text: usize) -> Self {
        self.config.max_text = max_text;
        self
    }

    /// Set the default completion message.
    pub fn completion_message(mut self, message: impl Into<String>) -> Self {
        self.config.completion_message = message.into();
        self
    }

    /// Set the preferred bar width.
    ///
    /// The width is still clamped to the terminal and stretched to fill it.
    pub fn bar_size(mut self, bar_size: usize) -> Self {
        self.config.bar_size = bar_size;
        self
    }

    /// Set the width assumed when no terminal is attached.
    pub fn fallback_width(mut self, columns: u16) -> Self {
        self.config.fallback_width = columns;
        self
    }

    /// Choose whether `advance_smooth` fires the completion on reaching the total.
    ///
    /// When disabled, the next [`Bar::step`](crate::Bar::step) fires it instead.
    pub fn smooth_completion(mut self, enabled: bool) -> Self {
        self.config.smooth_completion = enabled;
        self
    }

    /// Set callback for when each bar completes.
    ///
    /// The callback runs once per bar, while the group is locked: it must not
    /// call back into the group or its bars.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&BarSnapshot) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Render to `terminal` instead of stdout.
    pub fn terminal<T: Terminal + 'static>(mut self, terminal: T) -> Self {
        self.terminal = Some(Box::new(terminal));
        self
    }

    /// Create the [`BarGroup`], enabling ANSI processing and hiding the cursor.
    pub fn build(self) -> Result<BarGroup> {
        let terminal = self
            .terminal
            .unwrap_or_else(|| Box::new(ConsoleTerminal::stdout()) as Box<dyn Terminal>);
        BarGroup::start(self.config, terminal)
    }
}
