//! Single progress bar: layout, state machine and rendering.
//!
//! # Overview
//!
//! - `layout` - [`Layout`], how wide the bar is and whether it needs its own line
//! - `state` - the per-bar counters and the [`Phase`] / [`Step`] state machine
//!
//! Callers never hold bar state directly; they drive it through the
//! [`Bar`](crate::Bar) handle returned by [`BarGroup::add_bar`](crate::BarGroup::add_bar).

pub(crate) mod layout;
pub(crate) mod state;

pub use layout::{Layout, DEFAULT_BAR_SIZE};
pub use state::{BarSnapshot, Phase, Step};
