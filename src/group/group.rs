//! The bar group: owns every bar, the scrollback log and the completion table,
//! and repaints the whole screen whenever any of them changes.
//!
//! # Examples
//!
//! ```rust
//! use loading_bars::{BarGroup, MemoryTerminal};
//!
//! # fn main() -> loading_bars::Result<()> {
//! let term = MemoryTerminal::new(60, 20);
//! let group = BarGroup::builder().terminal(term.clone()).build()?;
//!
//! let first = group.add_bar("first", 2)?;
//! let second = group.add_bar("second", 3)?;
//! group.log("starting")?;
//!
//! for positions in group.group(&[&first, &second])? {
//!     let _ = positions?;
//! }
//!
//! assert_eq!(first.position(), 2);
//! assert_eq!(second.position(), 3);
//! assert_eq!(
//!     term.last_frame(),
//!     vec!["starting", "second is completed.", "first is completed."]
//! );
//! # Ok(())
//! # }
//! ```

use super::builder::BarGroupBuilder;
use super::config::GroupConfig;
use super::handle::Bar;
use super::steps::GroupSteps;
use super::table::{CompletionTable, GroupId};
use crate::bar::state::{BarEvents, BarId, BarSettings, BarState};
use crate::terminal::{Terminal, CLEAR_SCREEN};
use crate::{Error, Result};

use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// State shared between a group and the handles it gives out.
pub(crate) struct Shared {
    state: Mutex<GroupState>,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, GroupState> {
        self.state.lock()
    }
}

pub(crate) struct GroupState {
    /// Newest first; this is also the render order.
    bars: Vec<BarState>,
    screen: Screen,
    next_id: u64,
}

/// Everything a repaint needs besides the bars themselves.
struct Screen {
    terminal: Box<dyn Terminal>,
    config: GroupConfig,
    text_log: VecDeque<String>,
    table: CompletionTable,
    fallback_reported: bool,
    cursor_restored: bool,
}

/// The [`BarEvents`] seen by one bar while its neighbours are borrowed apart.
pub(crate) struct Frame<'a> {
    screen: &'a mut Screen,
    before: &'a mut [BarState],
    after: &'a mut [BarState],
}

impl Screen {
    fn columns(&mut self) -> u16 {
        match self.terminal.size() {
            Ok((columns, _)) => columns,
            Err(err) => {
                if !self.fallback_reported {
                    self.fallback_reported = true;
                    debug!(
                        error = %err,
                        fallback = self.config.fallback_width,
                        "Terminal size unavailable, using fallback width"
                    );
                }
                self.config.fallback_width
            }
        }
    }

    fn push_log(&mut self, message: String) {
        self.text_log.push_back(message);
        while self.text_log.len() > self.config.max_text {
            self.text_log.pop_front();
        }
    }

    /// Clear the viewport and print the log followed by `bars`, in one write.
    fn paint<'a, I>(&mut self, bars: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut frame = String::from(CLEAR_SCREEN);
        frame.push('\n');
        for line in &self.text_log {
            frame.push_str(line);
            frame.push('\n');
        }
        for line in bars {
            frame.push_str(line);
            frame.push('\n');
        }
        trace!(bytes = frame.len(), "Repainting");
        self.terminal.write_str(&frame)?;
        self.terminal.flush()?;
        Ok(())
    }

    fn restore_cursor(&mut self) -> Result<()> {
        if self.cursor_restored {
            return Ok(());
        }
        self.cursor_restored = true;
        self.terminal.show_cursor()?;
        self.terminal.flush()?;
        Ok(())
    }
}

impl BarEvents for Frame<'_> {
    fn columns(&mut self) -> u16 {
        self.screen.columns()
    }

    fn redraw(&mut self, bar: &BarState) -> Result<()> {
        let lines = self
            .before
            .iter()
            .map(BarState::rendered)
            .chain(std::iter::once(bar.rendered()))
            .chain(self.after.iter().map(BarState::rendered));
        self.screen.paint(lines)
    }

    fn completed(&mut self, bar: &BarState) -> bool {
        if let Some(callback) = &self.screen.config.on_complete {
            callback(&bar.snapshot());
        }
        let Some(id) = bar.group() else {
            return false;
        };
        if !self.screen.table.member_completed(id) {
            trace!(group = %id, pending = ?self.screen.table.pending(id), "Group member completed");
            return false;
        }
        debug!(group = %id, "Group drained, releasing members");
        for other in self.before.iter_mut().chain(self.after.iter_mut()) {
            if other.group() == Some(id) {
                other.release();
            }
        }
        true
    }
}

impl GroupState {
    fn index_of(&self, id: BarId) -> Result<usize> {
        self.bars
            .iter()
            .position(|bar| bar.id() == id)
            .ok_or_else(|| Error::Precondition("bar is not part of this group".into()))
    }

    pub(crate) fn bar(&self, id: BarId) -> Result<&BarState> {
        let index = self.index_of(id)?;
        Ok(&self.bars[index])
    }

    /// Run `f` on one bar, with the rest of the group available as its events.
    pub(crate) fn with_bar<T, F>(&mut self, id: BarId, f: F) -> Result<T>
    where
        F: for<'a> FnOnce(&mut BarState, &mut Frame<'a>) -> Result<T>,
    {
        let index = self.index_of(id)?;
        let (before, rest) = self.bars.split_at_mut(index);
        let Some((bar, after)) = rest.split_first_mut() else {
            return Err(Error::Precondition("bar is not part of this group".into()));
        };
        let mut frame = Frame {
            screen: &mut self.screen,
            before,
            after,
        };
        f(bar, &mut frame)
    }

    fn redraw(&mut self) -> Result<()> {
        let bars = &self.bars;
        self.screen.paint(bars.iter().map(BarState::rendered))
    }
}

/// Coordinates a stack of bars drawn on one terminal.
///
/// A group can be created directly or via its builder:
///
/// ```rust
/// use loading_bars::{BarGroup, MemoryTerminal};
///
/// # fn main() -> loading_bars::Result<()> {
/// let group = BarGroup::builder()
///     .terminal(MemoryTerminal::new(80, 24))
///     .max_text(5)
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// Building the group hides the cursor; dropping it shows the cursor again.
pub struct BarGroup {
    shared: Arc<Shared>,
}

impl fmt::Debug for BarGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("BarGroup")
            .field("config", &state.screen.config)
            .field("bars", &state.bars.len())
            .field("text_log", &state.screen.text_log.len())
            .finish()
    }
}

impl BarGroup {
    /// Create a group drawing on stdout with the default options.
    pub fn new() -> Result<Self> {
        BarGroupBuilder::new().build()
    }

    /// Creates a builder with the default options.
    pub fn builder() -> BarGroupBuilder {
        BarGroupBuilder::new()
    }

    pub(crate) fn start(config: GroupConfig, mut terminal: Box<dyn Terminal>) -> Result<Self> {
        terminal.enable_ansi();
        terminal.hide_cursor()?;
        terminal.flush()?;
        debug!(?config, "Starting bar group");

        let state = GroupState {
            bars: Vec::new(),
            screen: Screen {
                terminal,
                config,
                text_log: VecDeque::new(),
                table: CompletionTable::default(),
                fallback_reported: false,
                cursor_restored: false,
            },
            next_id: 0,
        };
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
            }),
        })
    }

    /// Add a bar counting to `total`, using the group's completion message.
    pub fn add_bar(&self, name: impl Into<String>, total: u64) -> Result<Bar> {
        self.insert_bar(name.into(), total, None)
    }

    /// Add a bar counting to `total` with its own completion message.
    pub fn add_bar_with_message(
        &self,
        name: impl Into<String>,
        total: u64,
        message: impl Into<String>,
    ) -> Result<Bar> {
        self.insert_bar(name.into(), total, Some(message.into()))
    }

    fn insert_bar(&self, name: String, total: u64, message: Option<String>) -> Result<Bar> {
        let mut state = self.shared.lock();
        let config = &state.screen.config;
        let settings = BarSettings {
            completion_message: message.unwrap_or_else(|| config.completion_message.clone()),
            preferred_size: config.bar_size,
            smooth_completion: config.smooth_completion,
        };
        let id = BarId(state.next_id);
        let bar = BarState::new(id, name, total, settings)?;
        debug!(name = bar.name(), total, "Adding bar");

        state.next_id += 1;
        state.bars.insert(0, bar);
        state.with_bar(id, |bar, frame| bar.update(frame))?;
        Ok(Bar::new(id, Arc::clone(&self.shared)))
    }

    /// Append a line to the scrollback log and repaint.
    ///
    /// Once the log holds more than `max_text` lines the oldest ones are dropped.
    pub fn log(&self, message: impl Into<String>) -> Result<()> {
        let mut state = self.shared.lock();
        state.screen.push_log(message.into());
        state.redraw()
    }

    /// Join `parts` with `sep` and log the result.
    pub fn log_parts<I, S>(&self, parts: I, sep: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let message = parts
            .into_iter()
            .map(|part| part.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(sep);
        self.log(message)
    }

    /// Repaint the log and every bar.
    pub fn redraw(&self) -> Result<()> {
        self.shared.lock().redraw()
    }

    /// Gate the completion of `bars` on each other and step them in lockstep.
    ///
    /// Every member keeps reporting "more" after it completes, until the last
    /// member of the group completes. The returned iterator therefore runs
    /// until every member has reached its total.
    ///
    /// Fails with [`Error::Precondition`] when fewer than two distinct bars
    /// are given, when a bar belongs to another group, or when a bar is
    /// already completed or already grouped. Nothing is changed on failure.
    pub fn group(&self, bars: &[&Bar]) -> Result<GroupSteps> {
        let mut members: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            if !bar.belongs_to(&self.shared) {
                return Err(Error::Precondition(
                    "only bars which are part of the same group can be grouped".into(),
                ));
            }
            if !members.contains(*bar) {
                members.push((*bar).clone());
            }
        }
        if members.len() < 2 {
            return Err(Error::Precondition(format!(
                "grouping needs 2 or more distinct bars, got {}",
                members.len()
            )));
        }

        let mut state = self.shared.lock();
        for member in &members {
            let bar = state.bar(member.id)?;
            if bar.is_completed() {
                return Err(Error::Precondition(format!(
                    "bar {:?} is already completed",
                    bar.name()
                )));
            }
            if let Some(group) = bar.group() {
                return Err(Error::Precondition(format!(
                    "bar {:?} already belongs to group {group}",
                    bar.name()
                )));
            }
        }

        let id = state.screen.table.allocate(members.len());
        for member in &members {
            let index = state.index_of(member.id)?;
            state.bars[index].join(id);
        }
        debug!(group = %id, members = members.len(), "Grouped bars");
        drop(state);

        Ok(GroupSteps::new(id, members))
    }

    /// Handles to every bar, in render order (newest first).
    pub fn bars(&self) -> Vec<Bar> {
        let state = self.shared.lock();
        state
            .bars
            .iter()
            .map(|bar| Bar::new(bar.id(), Arc::clone(&self.shared)))
            .collect()
    }

    /// The scrollback log, oldest first.
    pub fn text_log(&self) -> Vec<String> {
        self.shared.lock().screen.text_log.iter().cloned().collect()
    }

    /// Members of `id` that have not completed yet, or `None` once drained.
    pub fn pending(&self, id: GroupId) -> Option<usize> {
        self.shared.lock().screen.table.pending(id)
    }

    /// Gets the group configuration.
    pub fn config(&self) -> GroupConfig {
        self.shared.lock().screen.config.clone()
    }

    /// Show the cursor again, reporting any error instead of logging it.
    pub fn finish(self) -> Result<()> {
        let mut state = self.shared.lock();
        let restored = state.screen.restore_cursor();
        drop(state);
        restored
    }
}

impl Drop for BarGroup {
    fn drop(&mut self) {
        if let Err(err) = self.shared.lock().screen.restore_cursor() {
            warn!(error = %err, "Failed to restore the cursor");
        }
    }
}
