//! Bounded undo/redo history of structural edits.
//!
//! Each history entry is a value of some `C: Command`, typically an enum
//! whose variants carry enough data to apply and to invert themselves.  The
//! stack never runs commands on its own; [`CommandStack::undo`] and
//! [`CommandStack::redo`] execute them against a target the caller passes in.
//!
//! Rules:
//!
//! - `push` drops the oldest entry once the undo list exceeds `max_size`
//!   (that edit becomes permanently irrecoverable) and clears the redo list.
//!   Every dropped entry is handed back so the caller can finalise it.
//! - `undo` moves the newest entry to the redo list after reverting it.
//! - `redo` moves it back after re-applying it.

use std::collections::VecDeque;

use tp_core::Tick;
use tracing::trace;

/// Undo depth used when the caller does not choose one.
pub const DEFAULT_UNDO_DEPTH: usize = 5;

/// A reversible edit.
///
/// Both methods take `&mut self` so a command can park whatever it takes out
/// of the target (a removed entity, say) and hand it back on the inverse.
pub trait Command {
    /// The state the command mutates.
    type Target;

    /// Perform (or re-perform) the edit.
    fn apply(&mut self, target: &mut Self::Target, now: Tick);

    /// Reverse the edit.
    fn revert(&mut self, target: &mut Self::Target, now: Tick);
}

/// Undo list bounded by `max_size`, plus a redo list.
///
/// The two lists are always disjoint: every entry lives in exactly one.
#[derive(Debug)]
pub struct CommandStack<C> {
    undo:     VecDeque<C>,
    redo:     Vec<C>,
    max_size: usize,
}

impl<C> Default for CommandStack<C> {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl<C> CommandStack<C> {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_size + 1),
            redo: Vec::new(),
            max_size,
        }
    }

    /// Record a freshly performed edit.
    ///
    /// Any previously undone history is invalidated.  Returns the entries
    /// that can no longer be undone or redone: the evicted oldest edit, if
    /// any, followed by the discarded redo list.
    pub fn push(&mut self, command: C) -> Vec<C> {
        let mut dropped = Vec::new();
        self.undo.push_back(command);
        if self.undo.len() > self.max_size {
            dropped.extend(self.undo.pop_front());
            trace!(max_size = self.max_size, "oldest edit evicted from undo history");
        }
        dropped.append(&mut self.redo);
        dropped
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The edit the next `undo` would revert.
    pub fn peek_undo(&self) -> Option<&C> {
        self.undo.back()
    }

    /// The edit the next `redo` would re-apply.
    pub fn peek_redo(&self) -> Option<&C> {
        self.redo.last()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl<C: Command> CommandStack<C> {
    /// Revert the most recent edit.  Returns `false` (and does nothing) when
    /// there is nothing to undo.
    pub fn undo(&mut self, target: &mut C::Target, now: Tick) -> bool {
        let Some(mut command) = self.undo.pop_back() else {
            return false;
        };
        command.revert(target, now);
        self.redo.push(command);
        true
    }

    /// Re-apply the most recently undone edit.  Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, target: &mut C::Target, now: Tick) -> bool {
        let Some(mut command) = self.redo.pop() else {
            return false;
        };
        command.apply(target, now);
        self.undo.push_back(command);
        true
    }
}
