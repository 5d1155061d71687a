//! `EventQueue` — time-ordered queue with stable tie-breaking.
//!
//! # Ordering
//!
//! Every pushed item receives a strictly increasing sequence number at
//! insertion time.  Items pop in ascending `(time, seq)` order: earliest time
//! first, and among equal times, earliest insertion first.
//!
//! The tick-driven `Sim` polls facilities every tick and does not consume
//! this queue.  It is kept as a standalone utility for look-ahead
//! scheduling (e.g. "facility X finishes at T").
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log n) push and pop.  `len`/`is_empty` are O(1).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tp_core::Tick;

/// One popped occurrence.
///
/// Equality and ordering look only at `(time, seq)`, which is unique per
/// queue, so payloads need no trait bounds.
#[derive(Clone, Debug)]
pub struct ScheduledEvent<K, P> {
    pub time:    Tick,
    /// Insertion order; unique within one queue.
    pub seq:     u64,
    pub kind:    K,
    pub payload: P,
}

impl<K, P> PartialEq for ScheduledEvent<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl<K, P> Eq for ScheduledEvent<K, P> {}

impl<K, P> Ord for ScheduledEvent<K, P> {
    /// Reversed so `BinaryHeap` (a max-heap) yields the smallest key first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.time, other.seq).cmp(&(self.time, self.seq))
    }
}

impl<K, P> PartialOrd for ScheduledEvent<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-priority queue over `(time, insertion order)`.
pub struct EventQueue<K, P> {
    heap:     BinaryHeap<ScheduledEvent<K, P>>,
    next_seq: u64,
}

impl<K, P> Default for EventQueue<K, P> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<K, P> EventQueue<K, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind`/`payload` at `time`.  Returns the assigned sequence
    /// number.
    pub fn push(&mut self, time: Tick, kind: K, payload: P) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(ScheduledEvent { time, seq, kind, payload });
        seq
    }

    /// Remove and return the earliest event, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<ScheduledEvent<K, P>> {
        self.heap.pop()
    }

    /// Time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<Tick> {
        self.heap.peek().map(|e| e.time)
    }

    /// Pop every event with `time <= until`, in queue order.
    pub fn drain_until(&mut self, until: Tick) -> Vec<ScheduledEvent<K, P>> {
        let mut out = Vec::new();
        while self.peek_time().is_some_and(|t| t <= until) {
            if let Some(event) = self.heap.pop() {
                out.push(event);
            }
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
