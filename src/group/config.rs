//! Configuration structures and defaults for the bar group.
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::group::{CompletionCallback, GroupConfig};
//! use loading_bars::BarSnapshot;
//!
//! let callback: CompletionCallback = Box::new(|bar: &BarSnapshot| {
//!     eprintln!("{} reached {}", bar.name, bar.total);
//! });
//!
//! let config = GroupConfig::default();
//! assert_eq!(config.max_text, 10);
//! assert_eq!(config.completion_message, "is completed.");
//! ```

use crate::bar::{BarSnapshot, DEFAULT_BAR_SIZE};

use std::sync::Arc;

/// Callback type for bar completion events.
pub type CompletionCallback = Box<dyn Fn(&BarSnapshot) + Send + Sync>;

/// Message appended to the name of a completed bar.
pub const DEFAULT_COMPLETION_MESSAGE: &str = "is completed.";

/// Configuration structure for the bar group.
#[derive(Clone)]
pub struct GroupConfig {
    /// Maximum number of scrollback lines kept above the bars.
    pub max_text: usize,
    /// Default completion message for bars that do not set their own.
    pub completion_message: String,
    /// Preferred bar width before clamping and stretching.
    pub bar_size: usize,
    /// Width assumed when the terminal size cannot be queried.
    pub fallback_width: u16,
    /// Fire the completion when `advance_smooth` reaches the total.
    pub smooth_completion: bool,
    /// Callback for when each bar completes.
    pub on_complete: Option<Arc<CompletionCallback>>,
}

impl std::fmt::Debug for GroupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupConfig")
            .field("max_text", &self.max_text)
            .field("completion_message", &self.completion_message)
            .field("bar_size", &self.bar_size)
            .field("fallback_width", &self.fallback_width)
            .field("smooth_completion", &self.smooth_completion)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            max_text: 10,
            completion_message: DEFAULT_COMPLETION_MESSAGE.into(),
            bar_size: DEFAULT_BAR_SIZE,
            fallback_width: 80,
            smooth_completion: true,
            on_complete: None,
        }
    }
}
