//! Caller-facing handle to one bar of a group.

use super::group::Shared;
use super::table::GroupId;
use crate::bar::state::{BarId, BarState};
use crate::bar::{BarSnapshot, Phase, Step};
use crate::Result;

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// A progress bar living in a [`BarGroup`](crate::BarGroup).
///
/// Handles are cheap to clone; every clone drives the same bar. Each
/// operation locks the owning group for the whole mutate-and-repaint
/// sequence, so handles can be moved to other threads without their repaints
/// interleaving.
#[derive(Clone)]
pub struct Bar {
    pub(crate) id: BarId,
    shared: Arc<Shared>,
}

impl PartialEq for Bar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for Bar {}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("id", &self.id.0)
            .field("name", &self.name())
            .finish()
    }
}

impl Bar {
    pub(crate) fn new(id: BarId, shared: Arc<Shared>) -> Self {
        Self { id, shared }
    }

    pub(crate) fn belongs_to(&self, shared: &Arc<Shared>) -> bool {
        Arc::ptr_eq(&self.shared, shared)
    }

    /// Read the bar's state under the group lock.
    ///
    /// A group only ever appends bars and a handle is only minted by the group
    /// that owns it, so the lookup cannot miss.
    fn read<T>(&self, f: impl FnOnce(&BarState) -> T) -> T {
        let state = self.shared.lock();
        match state.bar(self.id) {
            Ok(bar) => f(bar),
            Err(err) => unreachable!("bar {} missing from its group: {err}", self.id.0),
        }
    }

    /// Advance by `amount` logical units.
    ///
    /// Fails with [`Error::OutOfRange`](crate::Error::OutOfRange), leaving the
    /// bar untouched, if that would go past the total. Reaching the total fires
    /// the completion.
    pub fn advance(&self, amount: u64) -> Result<()> {
        self.shared
            .lock()
            .with_bar(self.id, |bar, frame| bar.advance_logical(amount, frame))
    }

    /// Advance by `amount` logical units, animating the fill one unit per repaint.
    pub fn advance_smooth(&self, amount: u64) -> Result<()> {
        self.shared
            .lock()
            .with_bar(self.id, |bar, frame| bar.advance_smooth(amount, frame))
    }

    /// Take one step of the iteration protocol.
    ///
    /// ```rust
    /// use loading_bars::{BarGroup, MemoryTerminal, Step};
    ///
    /// # fn main() -> loading_bars::Result<()> {
    /// let group = BarGroup::builder().terminal(MemoryTerminal::new(80, 24)).build()?;
    /// let bar = group.add_bar("copy", 1)?;
    ///
    /// assert_eq!(bar.step()?, Step::More(1));
    /// // The next step fires the completion and ends the sequence.
    /// assert_eq!(bar.step()?, Step::Done);
    /// assert!(bar.is_completed());
    /// # Ok(())
    /// # }
    /// ```
    pub fn step(&self) -> Result<Step> {
        self.shared
            .lock()
            .with_bar(self.id, |bar, frame| bar.step(frame))
    }

    /// Iterate [`step`](Self::step) until the bar reports [`Step::Done`].
    pub fn steps(&self) -> BarSteps {
        BarSteps {
            bar: self.clone(),
            done: false,
        }
    }

    /// Move the fill to `value` cells and repaint, keeping the logical position.
    pub fn set_current(&self, value: f64) -> Result<()> {
        self.shared
            .lock()
            .with_bar(self.id, |bar, frame| bar.set_current(value, frame))
    }

    /// Re-layout against the current terminal width and repaint.
    pub fn resize(&self) -> Result<()> {
        self.shared
            .lock()
            .with_bar(self.id, |bar, frame| bar.update(frame))
    }

    pub fn name(&self) -> String {
        self.read(|bar| bar.name().to_owned())
    }

    /// Logical units completed so far.
    pub fn position(&self) -> u64 {
        self.read(BarState::position)
    }

    pub fn total(&self) -> u64 {
        self.read(BarState::total)
    }

    /// Fractional fill position, in cells.
    pub fn render_position(&self) -> f64 {
        self.read(BarState::current)
    }

    /// Cells per logical unit.
    pub fn scale(&self) -> f64 {
        self.read(BarState::inc)
    }

    /// Width of the bar interior, in cells.
    pub fn bar_size(&self) -> usize {
        self.read(|bar| bar.layout().bar_size)
    }

    /// Whether the completion has fired.
    pub fn is_completed(&self) -> bool {
        self.read(BarState::is_completed)
    }

    /// Whether the bar is held open by its group.
    pub fn is_waiting(&self) -> bool {
        self.read(BarState::is_waiting)
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.read(BarState::group)
    }

    pub fn phase(&self) -> Phase {
        self.read(BarState::phase)
    }

    /// The text this bar contributes to the screen.
    pub fn rendered(&self) -> String {
        self.read(|bar| bar.rendered().to_owned())
    }

    pub fn snapshot(&self) -> BarSnapshot {
        self.read(BarState::snapshot)
    }
}

/// Iterator over the steps of a single bar, see [`Bar::steps`].
///
/// Yields the logical position after each step. A bar held by its group keeps
/// yielding until the group releases it.
#[derive(Debug)]
pub struct BarSteps {
    bar: Bar,
    done: bool,
}

impl Iterator for BarSteps {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.bar.step() {
            Ok(Step::More(position)) => Some(Ok(position)),
            Ok(Step::Done) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for BarSteps {}
