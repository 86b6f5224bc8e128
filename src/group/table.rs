//! Reference counts for grouped completion.
//!
//! Each slot counts the members of one group that have not completed yet.
//! A slot that reaches zero is marked drained and handed out again by the next
//! [`allocate`](CompletionTable::allocate).

use std::fmt;

/// Identifies a set of bars whose completions are gated on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    /// The slot index in the completion table.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Pending(usize),
    Drained,
}

#[derive(Debug, Default)]
pub(crate) struct CompletionTable {
    slots: Vec<Slot>,
}

impl CompletionTable {
    /// Claim a slot for `members` bars, reusing the first drained one.
    pub(crate) fn allocate(&mut self, members: usize) -> GroupId {
        match self.slots.iter().position(|slot| *slot == Slot::Drained) {
            Some(index) => {
                self.slots[index] = Slot::Pending(members);
                GroupId(index)
            }
            None => {
                self.slots.push(Slot::Pending(members));
                GroupId(self.slots.len() - 1)
            }
        }
    }

    /// Record one member completion. Returns `true` when the group drained.
    pub(crate) fn member_completed(&mut self, id: GroupId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(Slot::Pending(count)) => {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.slots[id.0] = Slot::Drained;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Members still pending in `id`, or `None` once drained.
    pub(crate) fn pending(&self, id: GroupId) -> Option<usize> {
        match self.slots.get(id.0) {
            Some(Slot::Pending(count)) => Some(*count),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
