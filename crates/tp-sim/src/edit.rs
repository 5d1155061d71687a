//! `ParkEdit` — the undoable structural edits.

use tp_core::{FacilityId, GridPos, Tick};
use tp_facility::Facility;
use tp_queue::Command;
use tracing::debug;

use crate::Park;

/// One structural edit, carrying what it needs to invert itself.
///
/// Add and remove are mirror images: whichever direction takes the facility
/// off the map keeps it in `parked` until the opposite direction puts it
/// back in its original slot.  The facility keeps its accumulators across
/// the round trip; its queue does not survive removal.
#[derive(Debug)]
pub enum ParkEdit {
    AddFacility {
        id:     FacilityId,
        parked: Option<Facility>,
    },
    RemoveFacility {
        id:     FacilityId,
        parked: Option<Facility>,
    },
    MoveFacility {
        id:   FacilityId,
        from: GridPos,
        to:   GridPos,
    },
}

impl ParkEdit {
    pub fn facility_id(&self) -> FacilityId {
        match self {
            ParkEdit::AddFacility { id, .. }
            | ParkEdit::RemoveFacility { id, .. }
            | ParkEdit::MoveFacility { id, .. } => *id,
        }
    }

    /// The facility this edit holds off the map, if any.
    ///
    /// Once the edit leaves the history, that facility can never return.
    pub fn parked_facility(&self) -> Option<FacilityId> {
        match self {
            ParkEdit::AddFacility { id, parked: Some(_) }
            | ParkEdit::RemoveFacility { id, parked: Some(_) } => Some(*id),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParkEdit::AddFacility { .. }    => "add facility",
            ParkEdit::RemoveFacility { .. } => "remove facility",
            ParkEdit::MoveFacility { .. }   => "move facility",
        }
    }
}

fn put_back(park: &mut Park, id: FacilityId, parked: &mut Option<Facility>) {
    if let Some(facility) = parked.take() {
        park.insert_facility(id, facility);
    }
}

fn take_out(park: &mut Park, id: FacilityId, parked: &mut Option<Facility>, now: Tick) {
    *parked = park.take_facility(id, now);
}

impl Command for ParkEdit {
    type Target = Park;

    fn apply(&mut self, park: &mut Park, now: Tick) {
        debug!(edit = self.label(), id = %self.facility_id(), %now, "apply");
        match self {
            ParkEdit::AddFacility { id, parked }    => put_back(park, *id, parked),
            ParkEdit::RemoveFacility { id, parked } => take_out(park, *id, parked, now),
            ParkEdit::MoveFacility { id, to, .. }   => {
                park.move_facility(*id, *to);
            }
        }
    }

    fn revert(&mut self, park: &mut Park, now: Tick) {
        debug!(edit = self.label(), id = %self.facility_id(), %now, "revert");
        match self {
            ParkEdit::AddFacility { id, parked }    => take_out(park, *id, parked, now),
            ParkEdit::RemoveFacility { id, parked } => put_back(park, *id, parked),
            ParkEdit::MoveFacility { id, from, .. } => {
                park.move_facility(*id, *from);
            }
        }
    }
}
