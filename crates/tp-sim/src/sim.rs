//! The `Sim` struct and its tick loop.

use tp_core::{FacilityId, GridPos, SimClock, SimConfig, SimRng, Tick, VisitorId};
use tp_facility::{Facility, FacilityFactory, FacilityRecord, random_free_position};
use tp_queue::{Command, CommandStack};
use tp_visitor::{VisitorGenerator, VisitorStatus};
use tracing::{debug, info};

use crate::{Park, ParkEdit, SimError, SimObserver, SimResult};

// ── Per-tick summary ──────────────────────────────────────────────────────────

/// Counts gathered at the end of one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: Tick,

    /// Visitor population by status after the tick.
    pub free:    usize,
    pub waiting: usize,
    pub riding:  usize,
    pub done:    usize,

    /// Facilities running a cycle after the tick.
    pub running_facilities: usize,
    /// Visitors standing in any wait-list after the tick.
    pub queued: usize,

    /// Visitors who joined a wait-list this tick.
    pub arrivals: usize,
    /// Cycles started this tick.
    pub cycles_started: usize,
    /// Riders released by cycles that finished this tick.
    pub released: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the park, the clock, and the undo history of structural edits.
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, seed, entry cell, …).
    pub config: SimConfig,

    /// Simulation clock.
    pub clock: SimClock,

    pub(crate) park:      Park,
    pub(crate) commands:  CommandStack<ParkEdit>,
    pub(crate) generator: VisitorGenerator,
    pub(crate) rng:       SimRng,
}

impl Sim {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        info!(
            facilities = self.park.facility_count(),
            visitors = self.park.visitor_count(),
            end = %self.config.end_tick(),
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.observed_tick(now, observer);
        }
        observer.on_sim_end(self.clock.current_tick, &self.park);

        let [_, _, _, done] = self.park.status_counts();
        info!(final_tick = %self.clock.current_tick, done, "simulation finished");
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.observed_tick(now, observer);
        }
    }

    /// Process one tick at a caller-supplied time.
    ///
    /// No observer is called.  Afterwards the clock sits on the tick after
    /// `now` (it never moves backwards), so a later `run` or `run_ticks`
    /// does not process `now` a second time.
    pub fn step(&mut self, now: Tick) -> TickSummary {
        let summary = self.process_tick(now);
        self.clock.complete(now);
        summary
    }

    fn observed_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let index = self.clock.ticks_elapsed;
        observer.on_tick_start(now);
        let summary = self.process_tick(now);
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && index.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.park);
        }
        self.clock.advance();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        let mut summary = TickSummary { tick: now, ..TickSummary::default() };
        let Park { facilities, visitors, .. } = &mut self.park;

        // ── Phase 1: facilities, creation order ───────────────────────────
        for facility in facilities.iter_mut().flatten() {
            for rider in facility.update(now) {
                if let Some(v) = visitors.get_mut(rider.index()) {
                    v.end_ride(now);
                }
                summary.released += 1;
            }

            if !facility.is_running() && facility.queue_len() > 0 && facility.start_run(now) {
                summary.cycles_started += 1;
                for rider in facility.current_batch() {
                    if let Some(v) = visitors.get_mut(rider.index()) {
                        v.start_ride(now);
                    }
                }
            }
        }

        // ── Phase 2: visitors, id order ───────────────────────────────────
        //
        // A target slot that is empty belongs to a removed facility; the
        // visitor stands still until the removal is undone or the edit
        // leaves the history.
        for visitor in visitors.iter_mut() {
            if visitor.status() != VisitorStatus::Free {
                continue;
            }
            let Some(target) = visitor.target() else {
                continue;
            };
            let Some(facility) = facilities.get_mut(target.index()).and_then(Option::as_mut) else {
                continue;
            };
            if visitor.move_towards(facility.pos()) && visitor.start_waiting(now) {
                facility.add_visitor(visitor.id());
                summary.arrivals += 1;
            }
        }

        // ── Counts ────────────────────────────────────────────────────────
        [summary.free, summary.waiting, summary.riding, summary.done] = self.park.status_counts();
        for (_, f) in self.park.facilities() {
            summary.running_facilities += usize::from(f.is_running());
            summary.queued += f.queue_len();
        }
        summary
    }

    // ── Structural edits ──────────────────────────────────────────────────

    /// Place `facility` on the map as a new, undoable edit.
    pub fn add_facility(&mut self, facility: Facility) -> SimResult<FacilityId> {
        if self.park.id_of(facility.name()).is_some() {
            return Err(SimError::DuplicateFacility(facility.name().to_owned()));
        }
        let id = self.park.next_facility_id();
        let facility = facility.with_history_cap(self.config.history_cap);
        self.record(ParkEdit::AddFacility { id, parked: Some(facility) });
        Ok(id)
    }

    /// Build a facility of `type_tag` with the type's defaults and add it.
    ///
    /// Without a position, a random free cell of the map is used.
    pub fn create_facility(
        &mut self,
        name:     &str,
        type_tag: &str,
        pos:      Option<GridPos>,
    ) -> SimResult<FacilityId> {
        let pos = match pos {
            Some(pos) => pos,
            None => random_free_position(
                self.config.map_size,
                &self.park.occupied_positions(),
                &mut self.rng,
            ),
        };
        let facility = FacilityFactory::create(name, type_tag, None, None, pos)?;
        self.add_facility(facility)
    }

    /// Take a facility off the map as an undoable edit.
    ///
    /// Its queue and current riders are sent away and resume walking once
    /// the facility is back.  If the removal falls out of the undo history,
    /// the facility is struck from every visitor's plan.
    pub fn remove_facility(&mut self, id: FacilityId) -> SimResult<()> {
        if !self.park.contains(id) {
            return Err(SimError::UnknownFacility(id));
        }
        self.record(ParkEdit::RemoveFacility { id, parked: None });
        Ok(())
    }

    pub fn remove_facility_named(&mut self, name: &str) -> SimResult<()> {
        let id = self
            .park
            .id_of(name)
            .ok_or_else(|| SimError::UnknownFacilityName(name.to_owned()))?;
        self.remove_facility(id)
    }

    /// Relocate a facility as an undoable edit.  Moving to the current cell
    /// records nothing.
    pub fn move_facility(&mut self, id: FacilityId, to: GridPos) -> SimResult<()> {
        let from = self
            .park
            .facility(id)
            .map(Facility::pos)
            .ok_or(SimError::UnknownFacility(id))?;
        if from != to {
            self.record(ParkEdit::MoveFacility { id, from, to });
        }
        Ok(())
    }

    /// Apply `edit` and push it onto the history.
    ///
    /// A facility held by an edit that falls out of the history is gone for
    /// good, so visitors stop waiting for it.
    fn record(&mut self, mut edit: ParkEdit) {
        edit.apply(&mut self.park, self.clock.current_tick);
        for dropped in self.commands.push(edit) {
            if let Some(id) = dropped.parked_facility() {
                self.park.forget_facility(id);
            }
        }
    }

    /// Revert the most recent edit.  `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.commands.undo(&mut self.park, self.clock.current_tick);
        debug!(undone, undo_left = self.commands.undo_len(), "undo");
        undone
    }

    /// Re-apply the most recently undone edit.  `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.commands.redo(&mut self.park, self.clock.current_tick);
        debug!(redone, redo_left = self.commands.redo_len(), "redo");
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.commands.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.commands.can_redo()
    }

    /// The edit history, for enabling/disabling affordances.
    pub fn history(&self) -> &CommandStack<ParkEdit> {
        &self.commands
    }

    // ── Visitors ──────────────────────────────────────────────────────────

    /// Add `count` visitors at the park entry, each planning a visit to a
    /// random subset of the live facilities.
    pub fn spawn_visitors(&mut self, count: usize) -> Vec<VisitorId> {
        let targets = self.park.facility_ids();
        let batch = self
            .generator
            .generate_batch(count, self.config.entry, &targets, &mut self.rng);
        batch
            .into_iter()
            .map(|v| {
                let id = v.id();
                self.park.push_visitor(v);
                id
            })
            .collect()
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn park(&self) -> &Park {
        &self.park
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.park.facility(id)
    }

    pub fn facility_by_name(&self, name: &str) -> Option<&Facility> {
        self.park.facility_by_name(name)
    }

    pub fn facility_names(&self) -> Vec<&str> {
        self.park.facility_names()
    }

    /// The current layout as persistable records.
    pub fn layout(&self) -> Vec<FacilityRecord> {
        self.park.layout()
    }
}
