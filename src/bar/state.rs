//! The bar state machine.
//!
//! A [`BarState`] owns one bar's counters and rendered text. It never talks to
//! the terminal itself: every operation takes a [`BarEvents`] implementation
//! that answers the terminal width, repaints the screen and handles the
//! completion notification. The group provides that implementation while it
//! holds its lock, which is what keeps repaints serialized.

use super::layout::Layout;
use crate::group::GroupId;
use crate::{Error, Result};

/// Where a bar is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `position < total`.
    Advancing,
    /// The total is reached but the completion has not fired yet.
    CompletionPending,
    /// Completed, but held open until the rest of its group completes.
    Held,
    /// Completed and released; stepping reports [`Step::Done`].
    Exhausted,
}

/// Outcome of a single [`Bar::step`](crate::Bar::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The sequence goes on; carries the logical position after the step.
    More(u64),
    /// End of sequence.
    Done,
}

/// A copy of the observable state of a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSnapshot {
    pub name: String,
    pub position: u64,
    pub total: u64,
    /// Fractional fill position, in cells.
    pub render_position: f64,
    pub bar_size: usize,
    pub phase: Phase,
    pub group: Option<GroupId>,
    pub rendered: String,
}

/// Identifies a bar inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct BarId(pub(crate) u64);

/// Callbacks a bar needs from whoever owns it.
pub(crate) trait BarEvents {
    /// Current terminal width in columns.
    fn columns(&mut self) -> u16;

    /// Repaint the screen; `bar` is the bar being mutated.
    fn redraw(&mut self, bar: &BarState) -> Result<()>;

    /// `bar` just latched its completion. Returns `true` when this released
    /// the bar's group, in which case the bar must release itself too.
    fn completed(&mut self, bar: &BarState) -> bool;
}

/// Settings a bar takes from its group at creation.
#[derive(Debug, Clone)]
pub(crate) struct BarSettings {
    pub(crate) completion_message: String,
    pub(crate) preferred_size: usize,
    pub(crate) smooth_completion: bool,
}

#[derive(Debug)]
pub(crate) struct BarState {
    id: BarId,
    name: String,
    settings: BarSettings,
    total: u64,
    position: u64,
    current: f64,
    inc: f64,
    layout: Layout,
    completed: bool,
    waiting: bool,
    group: Option<GroupId>,
    rendered: String,
}

impl BarState {
    /// Create a bar at zero. Nothing is laid out or painted until [`update`](Self::update).
    pub(crate) fn new(id: BarId, name: String, total: u64, settings: BarSettings) -> Result<Self> {
        if total == 0 {
            return Err(Error::Precondition(format!(
                "bar {name:?} needs a total of at least 1"
            )));
        }
        Ok(Self {
            id,
            name,
            settings,
            total,
            position: 0,
            current: 0.0,
            inc: 0.0,
            layout: Layout::default(),
            completed: false,
            waiting: false,
            group: None,
            rendered: String::new(),
        })
    }

    pub(crate) fn id(&self) -> BarId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn position(&self) -> u64 {
        self.position
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn current(&self) -> f64 {
        self.current
    }

    pub(crate) fn inc(&self) -> f64 {
        self.inc
    }

    pub(crate) fn layout(&self) -> Layout {
        self.layout
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub(crate) fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn rendered(&self) -> &str {
        &self.rendered
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.position < self.total {
            Phase::Advancing
        } else if !self.completed {
            Phase::CompletionPending
        } else if self.waiting {
            Phase::Held
        } else {
            Phase::Exhausted
        }
    }

    pub(crate) fn snapshot(&self) -> BarSnapshot {
        BarSnapshot {
            name: self.name.clone(),
            position: self.position,
            total: self.total,
            render_position: self.current,
            bar_size: self.layout.bar_size,
            phase: self.phase(),
            group: self.group,
            rendered: self.rendered.clone(),
        }
    }

    /// Hold the bar open until `group` drains.
    pub(crate) fn join(&mut self, group: GroupId) {
        self.group = Some(group);
        self.waiting = true;
    }

    /// Let go of the group this bar was held by.
    pub(crate) fn release(&mut self) {
        self.group = None;
        self.waiting = false;
    }

    /// Advance by `amount` logical units, firing the completion when the
    /// total is reached.
    pub(crate) fn advance_logical<E: BarEvents>(&mut self, amount: u64, events: &mut E) -> Result<()> {
        self.check_room(amount)?;
        self.position += amount;
        self.current = self.fill_for_position();
        self.update(events)?;
        if self.position == self.total {
            self.complete(events)?;
        }
        Ok(())
    }

    /// Advance by `amount` logical units, animating the fill one unit at a time.
    pub(crate) fn advance_smooth<E: BarEvents>(&mut self, amount: u64, events: &mut E) -> Result<()> {
        self.check_room(amount)?;
        self.position += amount;
        for _ in 0..amount {
            self.current += self.inc;
            self.update(events)?;
        }
        if self.settings.smooth_completion && self.position == self.total {
            self.complete(events)?;
        }
        Ok(())
    }

    /// One step of the iteration protocol.
    pub(crate) fn step<E: BarEvents>(&mut self, events: &mut E) -> Result<Step> {
        match self.phase() {
            Phase::Advancing => {
                self.position += 1;
                self.current = self.fill_for_position();
                self.update(events)?;
                Ok(Step::More(self.position))
            }
            Phase::CompletionPending => {
                self.complete(events)?;
                if self.waiting {
                    Ok(Step::More(self.position))
                } else {
                    Ok(Step::Done)
                }
            }
            Phase::Held => Ok(Step::More(self.position)),
            Phase::Exhausted => Ok(Step::Done),
        }
    }

    /// Move the fill to `value` cells without touching the logical position.
    pub(crate) fn set_current<E: BarEvents>(&mut self, value: f64, events: &mut E) -> Result<()> {
        self.current = value.clamp(0.0, self.layout.bar_size as f64);
        self.update(events)
    }

    /// Re-layout against the current terminal width.
    ///
    /// When the bar width changes the fill is rescaled from the logical
    /// position, so a resize never loses progress.
    pub(crate) fn resize(&mut self, columns: u16) {
        let layout = Layout::fit(
            &self.name,
            self.total,
            self.settings.preferred_size,
            columns,
        );
        let inc = layout.bar_size as f64 / self.total as f64;
        let rescale = layout.bar_size != self.layout.bar_size;
        self.layout = layout;
        self.inc = inc;
        if rescale {
            self.current = self.fill_for_position();
        }
    }

    /// Re-layout, re-render and repaint.
    pub(crate) fn update<E: BarEvents>(&mut self, events: &mut E) -> Result<()> {
        self.resize(events.columns());
        self.render();
        events.redraw(self)
    }

    fn render(&mut self) {
        if self.completed {
            self.rendered = self.completion_text();
            return;
        }
        let bar_size = self.layout.bar_size;
        let filled = (self.current.round_ties_even().max(0.0) as usize).min(bar_size);
        self.rendered = format!(
            "{}{}[{}{}] {}/{}",
            self.name,
            self.layout.separator(),
            "#".repeat(filled),
            " ".repeat(bar_size - filled),
            self.position,
            self.total,
        );
    }

    /// The fill matching the logical position at the current scale.
    fn fill_for_position(&self) -> f64 {
        self.inc * self.position as f64
    }

    fn completion_text(&self) -> String {
        format!("{} {}", self.name, self.settings.completion_message)
    }

    fn complete<E: BarEvents>(&mut self, events: &mut E) -> Result<()> {
        if self.completed {
            return Ok(());
        }
        self.completed = true;
        self.rendered = self.completion_text();
        if events.completed(self) {
            self.release();
        }
        events.redraw(self)
    }

    fn check_room(&self, amount: u64) -> Result<()> {
        match self.position.checked_add(amount) {
            Some(next) if next <= self.total => Ok(()),
            _ => Err(Error::OutOfRange {
                name: self.name.clone(),
                amount,
                current: self.position,
                total: self.total,
            }),
        }
    }
}
