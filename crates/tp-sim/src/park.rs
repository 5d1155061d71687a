//! `Park` — the live simulation state: facility slots and visitors.

use std::collections::HashMap;

use tp_core::{FacilityId, GridPos, Tick, VisitorId};
use tp_facility::{Facility, FacilityRecord, FacilityStats};
use tp_visitor::{Visitor, VisitorStatus};
use tracing::{debug, warn};

/// Facility slots plus the visitor population.
///
/// Facilities live in a slot table indexed by [`FacilityId`].  A slot is
/// emptied when its facility is removed and refilled only when that removal
/// is undone, so ids are never reused and slot order is creation order.
///
/// Visitors are indexed by [`VisitorId`] and never leave the park.
#[derive(Debug, Default)]
pub struct Park {
    pub(crate) facilities: Vec<Option<Facility>>,
    pub(crate) names:      HashMap<String, FacilityId>,
    pub(crate) visitors:   Vec<Visitor>,
}

impl Park {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Facility lookup ───────────────────────────────────────────────────

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.get(id.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: FacilityId) -> bool {
        self.facility(id).is_some()
    }

    /// Handle of the live facility called `name`.
    pub fn id_of(&self, name: &str) -> Option<FacilityId> {
        self.names.get(name).copied()
    }

    pub fn facility_by_name(&self, name: &str) -> Option<&Facility> {
        self.id_of(name).and_then(|id| self.facility(id))
    }

    /// Live facilities in creation order.
    pub fn facilities(&self) -> impl Iterator<Item = (FacilityId, &Facility)> + '_ {
        self.facilities
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|f| (FacilityId(i as u32), f)))
    }

    pub fn facility_ids(&self) -> Vec<FacilityId> {
        self.facilities().map(|(id, _)| id).collect()
    }

    /// Names of live facilities in creation order.
    pub fn facility_names(&self) -> Vec<&str> {
        self.facilities().map(|(_, f)| f.name()).collect()
    }

    pub fn facility_count(&self) -> usize {
        self.names.len()
    }

    /// Cells currently taken by a facility.
    pub fn occupied_positions(&self) -> Vec<GridPos> {
        self.facilities().map(|(_, f)| f.pos()).collect()
    }

    /// The handle the next new facility will receive.
    pub fn next_facility_id(&self) -> FacilityId {
        FacilityId(self.facilities.len() as u32)
    }

    /// Records of every live facility, in creation order.
    pub fn layout(&self) -> Vec<FacilityRecord> {
        self.facilities().map(|(_, f)| f.to_record()).collect()
    }

    pub fn facility_stats(&self) -> Vec<FacilityStats> {
        self.facilities().map(|(_, f)| f.stats()).collect()
    }

    // ── Visitor lookup ────────────────────────────────────────────────────

    pub fn visitor(&self, id: VisitorId) -> Option<&Visitor> {
        self.visitors.get(id.index())
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn visitor_count(&self) -> usize {
        self.visitors.len()
    }

    /// Visitors per status, in `[Free, Waiting, Riding, Done]` order.
    pub fn status_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for v in &self.visitors {
            let slot = match v.status() {
                VisitorStatus::Free    => 0,
                VisitorStatus::Waiting => 1,
                VisitorStatus::Riding  => 2,
                VisitorStatus::Done    => 3,
            };
            counts[slot] += 1;
        }
        counts
    }

    // ── Mutation (crate-internal: edits and the tick loop only) ───────────

    pub(crate) fn push_visitor(&mut self, visitor: Visitor) {
        debug_assert_eq!(
            visitor.id().index(),
            self.visitors.len(),
            "visitors must be added in id order"
        );
        self.visitors.push(visitor);
    }

    /// Put `facility` into slot `id`, growing the table if needed.
    pub(crate) fn insert_facility(&mut self, id: FacilityId, facility: Facility) {
        let idx = id.index();
        if self.facilities.len() <= idx {
            self.facilities.resize_with(idx + 1, || None);
        }
        debug_assert!(self.facilities[idx].is_none(), "{id} slot already occupied");
        if let Some(previous) = self.names.insert(facility.name().to_owned(), id) {
            warn!(facility = facility.name(), %previous, %id, "name index overwritten");
        }
        debug!(%id, facility = facility.name(), pos = %facility.pos(), "facility placed");
        self.facilities[idx] = Some(facility);
    }

    /// Take the facility out of slot `id`.
    ///
    /// Everyone queued for or riding it is sent away: they go back to `Free`
    /// with the facility still as their target and wait for it to return.
    /// If the edit holding it is later dropped from the history, see
    /// [`forget_facility`](Self::forget_facility).
    pub(crate) fn take_facility(&mut self, id: FacilityId, now: Tick) -> Option<Facility> {
        let mut facility = self.facilities.get_mut(id.index())?.take()?;
        self.names.remove(facility.name());

        let evicted = facility.evict_all();
        for visitor in &evicted {
            if let Some(v) = self.visitors.get_mut(visitor.index()) {
                v.abandon(now);
            }
        }
        debug!(%id, facility = facility.name(), evicted = evicted.len(), "facility taken off the map");
        Some(facility)
    }

    /// Strike a facility that will never return from every visitor's plan.
    ///
    /// Free visitors left with nothing to do are `Done`.  Returns how many
    /// visitors were affected.
    pub(crate) fn forget_facility(&mut self, id: FacilityId) -> usize {
        let affected = self
            .visitors
            .iter_mut()
            .map(|v| v.drop_stop(id))
            .filter(|&dropped| dropped)
            .count();
        debug!(%id, affected, "facility gone for good");
        affected
    }

    pub(crate) fn move_facility(&mut self, id: FacilityId, to: GridPos) -> bool {
        match self.facilities.get_mut(id.index()).and_then(Option::as_mut) {
            Some(f) => {
                f.move_to(to);
                true
            }
            None => false,
        }
    }
}
