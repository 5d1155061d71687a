//! Logical simulation time.
//!
//! # Design
//!
//! Time is a caller-driven `Tick` value, never a wall-clock poll.  Every
//! state-mutating call in the simulator takes the current `Tick` explicitly,
//! so feeding the same sequence of ticks and edits always reproduces the same
//! run.
//!
//! Durations (`run_time`, accumulated waiting time, …) are plain `u64`
//! counts of the same logical unit.  `SimClock` owns the "current time"
//! when the simulator drives itself; callers that want to step manually
//! pass their own `Tick` values to `Sim::step`.

use std::fmt;

use crate::{TpError, TpResult, GridPos};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute logical timestamp.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Time elapsed from `earlier` to `self`, clamped to zero when the
    /// caller feeds a timestamp earlier than `earlier`.
    #[inline]
    pub fn saturating_since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulator's own logical clock.
///
/// Each call to [`advance`](Self::advance) moves time forward by `tick_step`
/// units.  With the default step of 1, tick numbers and time units coincide.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Logical time units covered by one tick.
    pub tick_step: u64,
    /// The current time, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Number of ticks processed so far.
    pub ticks_elapsed: u64,
}

impl SimClock {
    pub fn new(tick_step: u64) -> Self {
        Self {
            tick_step,
            current_tick: Tick::ZERO,
            ticks_elapsed: 0,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + self.tick_step;
        self.ticks_elapsed += 1;
    }

    /// Record that the caller processed the tick at `now`.
    ///
    /// The clock moves to the tick after `now`, so a following `advance`
    /// loop resumes there.  It never moves backwards.
    #[inline]
    pub fn complete(&mut self, now: Tick) {
        let next = now + self.tick_step;
        if next > self.current_tick {
            self.current_tick = next;
        }
        self.ticks_elapsed += 1;
    }

    /// Break the current time into (hours, minutes, seconds) treating one
    /// time unit as one second.  Convenience for logs and reports.
    pub fn elapsed_hms(&self) -> (u64, u32, u32) {
        format_hms(self.current_tick.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}

/// Split a duration in seconds into (hours, minutes, seconds).
pub fn format_hms(secs: u64) -> (u64, u32, u32) {
    let hours = secs / 3_600;
    let minutes = ((secs % 3_600) / 60) as u32;
    let seconds = (secs % 60) as u32;
    (hours, minutes, seconds)
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks run by `Sim::run`.
    pub total_ticks: u64,

    /// Logical time units per tick.  Must be ≥ 1.
    pub tick_step: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Maximum queue-length samples kept per facility.
    pub history_cap: usize,

    /// Maximum undoable structural edits.  Must be ≥ 1.
    pub undo_depth: usize,

    /// Grid cell where new visitors appear.
    pub entry: GridPos,

    /// Side length of the square park map, in cells.
    pub map_size: u32,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks: 600,
            tick_step: 1,
            seed: 42,
            history_cap: 1_000,
            undo_depth: 5,
            entry: GridPos::ORIGIN,
            map_size: 16,
            output_interval_ticks: 10,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulator cannot run with.
    pub fn validate(&self) -> TpResult<()> {
        if self.tick_step == 0 {
            return Err(TpError::Config("tick_step must be >= 1".into()));
        }
        if self.history_cap == 0 {
            return Err(TpError::Config("history_cap must be >= 1".into()));
        }
        if self.map_size == 0 {
            return Err(TpError::Config("map_size must be >= 1".into()));
        }
        if self.undo_depth == 0 {
            return Err(TpError::Config("undo_depth must be >= 1".into()));
        }
        if self.total_ticks.checked_mul(self.tick_step).is_none() {
            return Err(TpError::Config(format!(
                "total_ticks {} x tick_step {} overflows the clock",
                self.total_ticks, self.tick_step
            )));
        }
        if !self.entry.within(self.map_size) {
            return Err(TpError::Config(format!(
                "entry {} lies outside the {}x{} map",
                self.entry, self.map_size, self.map_size
            )));
        }
        Ok(())
    }

    /// The time at which `Sim::run` stops (exclusive upper bound).
    ///
    /// Saturates for configurations `validate` would reject.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks.saturating_mul(self.tick_step))
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_step)
    }
}
