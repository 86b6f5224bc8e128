//! Lockstep iteration over a group of bars.

use super::handle::Bar;
use super::table::GroupId;
use crate::bar::Step;
use crate::Result;

use std::iter::FusedIterator;

/// Steps every member of a group once per item, returned by
/// [`BarGroup::group`](crate::BarGroup::group).
///
/// Members are stepped in the order they were passed in. Iteration ends as
/// soon as one member reports [`Step::Done`], which for a group only happens
/// once the last member has completed and released the others.
#[derive(Debug)]
pub struct GroupSteps {
    id: GroupId,
    members: Vec<Bar>,
    done: bool,
}

impl GroupSteps {
    pub(crate) fn new(id: GroupId, members: Vec<Bar>) -> Self {
        Self {
            id,
            members,
            done: false,
        }
    }

    /// The completion group the members were placed in.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The distinct members, in stepping order.
    pub fn members(&self) -> &[Bar] {
        &self.members
    }
}

impl Iterator for GroupSteps {
    /// The logical position of every member after the step.
    type Item = Result<Vec<u64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut positions = Vec::with_capacity(self.members.len());
        for bar in &self.members {
            match bar.step() {
                Ok(Step::More(position)) => positions.push(position),
                Ok(Step::Done) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        Some(Ok(positions))
    }
}

impl FusedIterator for GroupSteps {}
