//! `WaitList` — the FIFO line in front of a facility.

use std::collections::VecDeque;

/// First-in, first-out queue of waiting visitors.
///
/// Only the owning facility mutates it; everyone else sees it through
/// `&Facility`.
#[derive(Clone, Debug)]
pub struct WaitList<T> {
    inner: VecDeque<T>,
}

impl<T> Default for WaitList<T> {
    fn default() -> Self {
        Self { inner: VecDeque::new() }
    }
}

impl<T> WaitList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the back of the line.  O(1).
    #[inline]
    pub fn append(&mut self, item: T) {
        self.inner.push_back(item);
    }

    /// Remove and return whoever has waited longest, or `None` if nobody is
    /// waiting.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate front (next to be served) to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.iter()
    }

    /// Empty the line, returning everyone in service order.
    pub fn drain(&mut self) -> Vec<T> {
        self.inner.drain(..).collect()
    }
}

impl<T: PartialEq> WaitList<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.inner.contains(item)
    }
}
