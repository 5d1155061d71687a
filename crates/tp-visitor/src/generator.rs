//! Visitor construction with sampled itineraries.

use tp_core::{FacilityId, GridPos, SimRng, VisitorId};
use tracing::debug;

use crate::Visitor;

/// Shortest itinerary drawn when enough facilities exist.
pub const MIN_PLAN_LEN: usize = 2;

/// Longest itinerary drawn.
pub const MAX_PLAN_LEN: usize = 4;

/// Hands out visitors with monotonically increasing ids.
///
/// Ids are never reused for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct VisitorGenerator {
    next_id: u32,
}

impl VisitorGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next visitor will receive.
    pub fn peek_next_id(&self) -> VisitorId {
        VisitorId(self.next_id)
    }

    /// Number of visitors generated so far.
    pub fn generated(&self) -> usize {
        self.next_id as usize
    }

    pub fn generate_visitor(
        &mut self,
        pos:  GridPos,
        plan: impl IntoIterator<Item = FacilityId>,
    ) -> Visitor {
        let id = VisitorId(self.next_id);
        self.next_id += 1;
        Visitor::new(id, pos, plan)
    }

    /// `count` visitors at `entry`, each with a plan sampled without
    /// replacement from `targets`.
    ///
    /// Plan length is uniform in `[min(2, n), min(4, n)]` for `n` targets.
    /// With no targets every visitor is `Done` on creation.
    pub fn generate_batch(
        &mut self,
        count:   usize,
        entry:   GridPos,
        targets: &[FacilityId],
        rng:     &mut SimRng,
    ) -> Vec<Visitor> {
        let lo = MIN_PLAN_LEN.min(targets.len());
        let hi = MAX_PLAN_LEN.min(targets.len());

        let visitors: Vec<Visitor> = (0..count)
            .map(|_| {
                let len = rng.gen_range(lo..=hi);
                let plan = rng.sample_distinct(targets, len);
                self.generate_visitor(entry, plan)
            })
            .collect();

        debug!(count, %entry, targets = targets.len(), "visitor batch generated");
        visitors
    }
}
