//! loading-bars renders a stack of live-updating progress bars in a terminal,
//! with a scrollback log above them and a way to gate the completion of
//! several bars on each other.
//!
//! # Quick Start
//!
//! ```rust
//! use loading_bars::{BarGroup, MemoryTerminal};
//!
//! # fn main() -> loading_bars::Result<()> {
//! // `BarGroup::new()` draws on stdout; a memory terminal keeps this headless.
//! let group = BarGroup::builder()
//!     .terminal(MemoryTerminal::new(80, 24))
//!     .build()?;
//!
//! let download = group.add_bar("download", 3)?;
//! let extract = group.add_bar("extract", 5)?;
//!
//! // Step both until the slower one finishes.
//! for positions in group.group(&[&download, &extract])? {
//!     let _positions = positions?;
//! }
//! assert!(download.is_completed() && extract.is_completed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`bar`] - Bar layout and the per-bar state machine
//! - [`group`] - The `BarGroup` coordinator, its builder, handles and grouped iteration
//! - [`terminal`] - The terminal collaborator trait and its implementations
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod bar;
pub mod error;
pub mod group;
pub mod terminal;

pub use bar::{BarSnapshot, Layout, Phase, Step};
pub use error::{Error, Result};
pub use group::{Bar, BarGroup, BarGroupBuilder, BarSteps, GroupConfig, GroupId, GroupSteps};
pub use terminal::{ConsoleTerminal, MemoryTerminal, Terminal};
