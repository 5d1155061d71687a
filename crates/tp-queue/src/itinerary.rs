//! `ItineraryStack` — a visitor's remaining destinations.

/// LIFO stack of destinations.  The next stop is always the top.
///
/// Build it with [`from_plan`](Self::from_plan), which pushes the plan in
/// reverse so the first destination ends up on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItineraryStack<T> {
    stack: Vec<T>,
}

impl<T> Default for ItineraryStack<T> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<T> ItineraryStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack whose pop order equals `plan`'s order.
    pub fn from_plan(plan: impl IntoIterator<Item = T>) -> Self {
        let mut stack: Vec<T> = plan.into_iter().collect();
        stack.reverse();
        Self { stack }
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.stack.push(item);
    }

    /// Remove and return the top, or `None` when the itinerary is finished.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.stack.pop()
    }

    /// The top without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.stack.last()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Keep only the destinations for which `keep` returns `true`, in their
    /// original order.  Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.stack.len();
        self.stack.retain(|item| keep(item));
        before - self.stack.len()
    }

    /// Remaining destinations in visit order (next stop first).
    pub fn remaining(&self) -> impl Iterator<Item = &T> + '_ {
        self.stack.iter().rev()
    }
}
