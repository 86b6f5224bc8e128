//! Group module containing the multi-bar coordinator, its builder and configuration.
//!
//! # Overview
//!
//! - `group` - [`BarGroup`], the coordinator that owns bars, log and repaints
//! - `builder` - [`BarGroupBuilder`] for configuring a group
//! - `config` - [`GroupConfig`] and the completion callback type
//! - `handle` - [`Bar`], the handle callers drive
//! - `steps` - [`GroupSteps`], lockstep iteration over grouped bars
//! - `table` - reference counts behind grouped completion
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::{BarGroup, MemoryTerminal};
//!
//! # fn main() -> loading_bars::Result<()> {
//! let term = MemoryTerminal::new(80, 24);
//! let group = BarGroup::builder().terminal(term.clone()).max_text(2).build()?;
//!
//! let bar = group.add_bar("task", 4)?;
//! bar.advance(2)?;
//! group.log("halfway")?;
//! bar.advance(2)?;
//!
//! assert_eq!(bar.rendered(), "task is completed.");
//! assert_eq!(group.text_log(), vec!["halfway"]);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod group;
pub mod handle;
pub mod steps;
pub(crate) mod table;

pub use builder::BarGroupBuilder;
pub use config::{CompletionCallback, GroupConfig};
pub use group::BarGroup;
pub use handle::{Bar, BarSteps};
pub use steps::GroupSteps;
pub use table::GroupId;
