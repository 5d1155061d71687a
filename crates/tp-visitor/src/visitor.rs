//! The `Visitor` struct and its itinerary state machine.

use std::collections::HashSet;
use std::fmt;

use tp_core::{FacilityId, GridPos, Tick, VisitorId};
use tp_queue::ItineraryStack;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum VisitorStatus {
    #[default]
    Free,
    Waiting,
    Riding,
    Done,
}

impl VisitorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VisitorStatus::Free    => "free",
            VisitorStatus::Waiting => "waiting",
            VisitorStatus::Riding  => "riding",
            VisitorStatus::Done    => "done",
        }
    }
}

impl fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A park visitor.
///
/// The target is always the top of the itinerary; there is no separate
/// field that could drift out of sync with it.
///
/// # Invariants
///
/// - `Done` ⇔ the itinerary is empty
/// - `waiting_start` is set only while `Waiting`, `ride_start` only while
///   `Riding`
#[derive(Clone, Debug)]
pub struct Visitor {
    id:        VisitorId,
    pos:       GridPos,
    itinerary: ItineraryStack<FacilityId>,
    status:    VisitorStatus,

    waiting_start: Option<Tick>,
    ride_start:    Option<Tick>,

    total_waiting_time: u64,
    total_ride_time:    u64,

    visited: HashSet<FacilityId>,
}

impl Visitor {
    /// Create a visitor at `pos` who will visit `plan` in order.
    ///
    /// An empty plan yields a visitor that is `Done` from the start.
    pub fn new(id: VisitorId, pos: GridPos, plan: impl IntoIterator<Item = FacilityId>) -> Self {
        let itinerary = ItineraryStack::from_plan(plan);
        let status = if itinerary.is_empty() {
            VisitorStatus::Done
        } else {
            VisitorStatus::Free
        };
        Self {
            id,
            pos,
            itinerary,
            status,
            waiting_start: None,
            ride_start: None,
            total_waiting_time: 0,
            total_ride_time: 0,
            visited: HashSet::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> VisitorId {
        self.id
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    pub fn status(&self) -> VisitorStatus {
        self.status
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.status == VisitorStatus::Done
    }

    /// The facility the visitor is heading to, queuing for, or riding.
    #[inline]
    pub fn target(&self) -> Option<FacilityId> {
        self.itinerary.peek().copied()
    }

    /// Same as [`target`](Self::target); never mutates.
    pub fn next_destination(&self) -> Option<FacilityId> {
        self.target()
    }

    pub fn has_plan(&self) -> bool {
        !self.itinerary.is_empty()
    }

    /// Remaining stops in visit order, current target first.
    pub fn remaining_plan(&self) -> Vec<FacilityId> {
        self.itinerary.remaining().copied().collect()
    }

    pub fn itinerary_len(&self) -> usize {
        self.itinerary.len()
    }

    pub fn waiting_start_time(&self) -> Option<Tick> {
        self.waiting_start
    }

    pub fn ride_start_time(&self) -> Option<Tick> {
        self.ride_start
    }

    pub fn total_waiting_time(&self) -> u64 {
        self.total_waiting_time
    }

    pub fn total_ride_time(&self) -> u64 {
        self.total_ride_time
    }

    pub fn visited(&self) -> &HashSet<FacilityId> {
        &self.visited
    }

    pub fn has_visited(&self, facility: FacilityId) -> bool {
        self.visited.contains(&facility)
    }

    /// The `(status, target)` pair a display layer renders as
    /// "next stop" / "waiting" / "riding" / "trip complete".
    pub fn status_line(&self) -> (VisitorStatus, Option<FacilityId>) {
        (self.status, self.target())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Take one grid step towards `target`, x axis first.
    ///
    /// Returns `true` only when the visitor was already standing on
    /// `target` before this call; the step that lands on it returns `false`.
    pub fn move_towards(&mut self, target: GridPos) -> bool {
        match self.pos.step_towards(target) {
            Some(next) => {
                self.pos = next;
                false
            }
            None => true,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Free → Waiting.  The caller registers the visitor on the target's
    /// wait-list in the same step.
    ///
    /// Returns `false` without changing state unless the visitor is `Free`
    /// with a target.
    pub fn start_waiting(&mut self, now: Tick) -> bool {
        if self.status != VisitorStatus::Free || self.target().is_none() {
            return false;
        }
        self.status = VisitorStatus::Waiting;
        self.waiting_start = Some(now);
        trace!(visitor = %self.id, %now, "waiting");
        true
    }

    /// Waiting → Riding.  Closes the waiting interval.
    pub fn start_ride(&mut self, now: Tick) -> bool {
        if self.status != VisitorStatus::Waiting {
            return false;
        }
        self.close_waiting(now);
        self.status = VisitorStatus::Riding;
        self.ride_start = Some(now);
        trace!(visitor = %self.id, %now, "riding");
        true
    }

    /// Waiting/Riding → Free or Done.
    ///
    /// Credits the ride time, marks the current target visited, and moves on
    /// to the next stop.  The visitor is `Done` when no stop remains.
    pub fn end_ride(&mut self, now: Tick) -> bool {
        if !matches!(self.status, VisitorStatus::Waiting | VisitorStatus::Riding) {
            return false;
        }
        self.close_waiting(now);
        self.close_ride(now);

        if let Some(finished) = self.itinerary.pop() {
            self.visited.insert(finished);
        }
        self.status = if self.itinerary.is_empty() {
            VisitorStatus::Done
        } else {
            VisitorStatus::Free
        };
        trace!(
            visitor = %self.id,
            %now,
            status = %self.status,
            stops_left = self.itinerary.len(),
            "ride ended"
        );
        true
    }

    /// Waiting/Riding → Free, keeping the current target.
    ///
    /// Used when the target facility disappears mid-visit.  Elapsed time is
    /// still credited; nothing is marked visited.
    pub fn abandon(&mut self, now: Tick) -> bool {
        if !matches!(self.status, VisitorStatus::Waiting | VisitorStatus::Riding) {
            return false;
        }
        self.close_waiting(now);
        self.close_ride(now);
        self.status = VisitorStatus::Free;
        trace!(visitor = %self.id, %now, "abandoned visit");
        true
    }

    /// Strike `facility` from the remaining plan for good.
    ///
    /// Used once a removed facility can no longer come back.  A visitor
    /// queuing for or riding `facility` is left alone.  A `Free` visitor
    /// whose plan runs out becomes `Done`.  Returns `true` if a stop was
    /// removed.
    pub fn drop_stop(&mut self, facility: FacilityId) -> bool {
        if self.status != VisitorStatus::Free && self.target() == Some(facility) {
            return false;
        }
        if self.itinerary.retain(|&stop| stop != facility) == 0 {
            return false;
        }
        if self.status == VisitorStatus::Free && self.itinerary.is_empty() {
            self.status = VisitorStatus::Done;
        }
        trace!(
            visitor = %self.id,
            %facility,
            status = %self.status,
            stops_left = self.itinerary.len(),
            "stop dropped"
        );
        true
    }

    fn close_waiting(&mut self, now: Tick) {
        if let Some(start) = self.waiting_start.take() {
            self.total_waiting_time += now.saturating_since(start);
        }
    }

    fn close_ride(&mut self, now: Tick) {
        if let Some(start) = self.ride_start.take() {
            self.total_ride_time += now.saturating_since(start);
        }
    }
}
