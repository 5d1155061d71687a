//! The `Facility` struct and its service-cycle state machine.

use std::collections::VecDeque;

use tp_core::{GridPos, Tick, VisitorId};
use tp_queue::WaitList;
use tracing::{debug, trace};

use crate::{DEFAULT_EMOJI, FacilityError, FacilityKind, FacilityResult};

/// Queue-length samples kept per facility unless configured otherwise.
pub const DEFAULT_HISTORY_CAP: usize = 1_000;

// ── Status / samples ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FacilityStatus {
    #[default]
    Idle,
    Running,
}

impl FacilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FacilityStatus::Idle    => "idle",
            FacilityStatus::Running => "running",
        }
    }
}

/// One `(timestamp, queue length)` observation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueSample {
    pub time: Tick,
    pub len:  usize,
}

/// Read-only snapshot handed to export collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct FacilityStats {
    pub name:                  String,
    pub type_tag:              String,
    pub capacity:              u32,
    pub run_time:              u64,
    pub pos:                   GridPos,
    pub status:                FacilityStatus,
    pub queue_len:             usize,
    pub batch_len:             usize,
    pub utilization:           f64,
    pub avg_waiting_time:      u64,
    pub total_run_time:        u64,
    pub total_idle_time:       u64,
    pub total_visitors_served: u64,
}

// ── Facility ──────────────────────────────────────────────────────────────────

/// A stationary attraction that serves visitors in FIFO batches.
///
/// Construct through [`Facility::new`] (or the factory / a layout record),
/// which validates `capacity >= 1` and `run_time > 0`.  Nothing after
/// construction re-validates.
///
/// # Invariants
///
/// - `batch.len() <= capacity`
/// - a visitor is never in both the wait-list and the batch
/// - `Running` ⇔ `run_start.is_some()` and the batch is non-empty
#[derive(Clone, Debug)]
pub struct Facility {
    name:     String,
    type_tag: String,
    emoji:    String,
    capacity: u32,
    run_time: u64,
    pos:      GridPos,

    status:    FacilityStatus,
    batch:     Vec<VisitorId>,
    run_start: Option<Tick>,
    wait_list: WaitList<VisitorId>,

    total_run_time:        u64,
    total_idle_time:       u64,
    total_visitors_served: u64,
    /// `None` until the first `update`; the first observation adds no time.
    last_status_change:    Option<Tick>,

    history:     VecDeque<QueueSample>,
    history_cap: usize,
}

impl Facility {
    /// Create an idle facility.
    ///
    /// The emoji comes from the built-in kind matching `type_tag`, or
    /// [`DEFAULT_EMOJI`] for unknown tags.
    pub fn new(
        name:     impl Into<String>,
        type_tag: impl Into<String>,
        capacity: u32,
        run_time: u64,
        pos:      GridPos,
    ) -> FacilityResult<Self> {
        let name = name.into();
        let type_tag = type_tag.into();

        if name.trim().is_empty() {
            return Err(FacilityError::EmptyName);
        }
        if capacity == 0 {
            return Err(FacilityError::InvalidCapacity { name, capacity });
        }
        if run_time == 0 {
            return Err(FacilityError::InvalidRunTime { name });
        }

        let emoji = FacilityKind::from_tag(&type_tag)
            .map(|k| k.defaults().emoji)
            .unwrap_or(DEFAULT_EMOJI)
            .to_owned();

        Ok(Self {
            name,
            type_tag,
            emoji,
            capacity,
            run_time,
            pos,
            status: FacilityStatus::Idle,
            batch: Vec::with_capacity(capacity as usize),
            run_start: None,
            wait_list: WaitList::new(),
            total_run_time: 0,
            total_idle_time: 0,
            total_visitors_served: 0,
            last_status_change: None,
            history: VecDeque::new(),
            history_cap: DEFAULT_HISTORY_CAP,
        })
    }

    /// Override the display emoji (cosmetic).
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Change how many queue-length samples are retained (minimum 1).
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.set_history_cap(cap);
        self
    }

    pub fn set_history_cap(&mut self, cap: usize) {
        self.history_cap = cap.max(1);
        while self.history.len() > self.history_cap {
            self.history.pop_front();
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The built-in kind, if the type tag names one.
    pub fn kind(&self) -> Option<FacilityKind> {
        FacilityKind::from_tag(&self.type_tag)
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn run_time(&self) -> u64 {
        self.run_time
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    pub fn status(&self) -> FacilityStatus {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == FacilityStatus::Running
    }

    /// Time the current cycle started; `None` while idle.
    pub fn run_start_time(&self) -> Option<Tick> {
        self.run_start
    }

    pub fn current_batch(&self) -> &[VisitorId] {
        &self.batch
    }

    pub fn wait_list(&self) -> &WaitList<VisitorId> {
        &self.wait_list
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.wait_list.len()
    }

    pub fn total_run_time(&self) -> u64 {
        self.total_run_time
    }

    pub fn total_idle_time(&self) -> u64 {
        self.total_idle_time
    }

    pub fn total_visitors_served(&self) -> u64 {
        self.total_visitors_served
    }

    /// Queue-length samples, oldest first.
    pub fn history(&self) -> &VecDeque<QueueSample> {
        &self.history
    }

    pub fn history_cap(&self) -> usize {
        self.history_cap
    }

    // ── State machine ─────────────────────────────────────────────────────

    /// Advance accumulators to `now`, sample the queue, and finish the
    /// current cycle if it has run for `run_time`.
    ///
    /// Returns the visitors released by a finished cycle (empty otherwise).
    /// Moving those visitors on is the caller's job.
    pub fn update(&mut self, now: Tick) -> Vec<VisitorId> {
        let elapsed = self
            .last_status_change
            .map_or(0, |last| now.saturating_since(last));
        match self.status {
            FacilityStatus::Running => self.total_run_time += elapsed,
            FacilityStatus::Idle    => self.total_idle_time += elapsed,
        }
        self.last_status_change = Some(now);

        self.history.push_back(QueueSample { time: now, len: self.wait_list.len() });
        if self.history.len() > self.history_cap {
            self.history.pop_front();
        }

        match self.run_start {
            Some(start) if self.is_running() && now.saturating_since(start) >= self.run_time => {
                self.finish(now)
            }
            _ => Vec::new(),
        }
    }

    /// Running → Idle.  Counts the batch as served and hands it back.
    fn finish(&mut self, now: Tick) -> Vec<VisitorId> {
        let released = std::mem::take(&mut self.batch);
        self.total_visitors_served += released.len() as u64;
        self.status = FacilityStatus::Idle;
        self.run_start = None;
        debug!(
            facility = %self.name,
            %now,
            released = released.len(),
            served = self.total_visitors_served,
            "cycle finished"
        );
        released
    }

    /// Idle → Running.  Admits up to `capacity` visitors from the front of
    /// the wait-list.
    ///
    /// Returns `false` without changing state when already running or when
    /// nobody is waiting.
    pub fn start_run(&mut self, now: Tick) -> bool {
        if self.is_running() {
            return false;
        }

        self.batch.clear();
        while self.batch.len() < self.capacity as usize {
            match self.wait_list.pop() {
                Some(visitor) => self.batch.push(visitor),
                None => break,
            }
        }
        if self.batch.is_empty() {
            return false;
        }

        self.status = FacilityStatus::Running;
        self.run_start = Some(now);
        debug!(
            facility = %self.name,
            %now,
            batch = self.batch.len(),
            still_waiting = self.wait_list.len(),
            "cycle started"
        );
        true
    }

    /// Put `visitor` at the back of the line.  Legal while running; never
    /// starts a cycle by itself.
    pub fn add_visitor(&mut self, visitor: VisitorId) {
        debug_assert!(
            !self.batch.contains(&visitor),
            "{visitor} queued at {} while riding it",
            self.name
        );
        trace!(facility = %self.name, %visitor, queue_len = self.wait_list.len() + 1, "visitor queued");
        self.wait_list.append(visitor);
    }

    /// Send everyone away: empties the wait-list and the current batch
    /// without counting the batch as served, and returns to Idle.
    ///
    /// Returned in batch-then-queue order.  Used when the facility is taken
    /// off the map; the next `update` opens a fresh observation interval, so
    /// time spent off the map counts as neither run nor idle time.
    pub fn evict_all(&mut self) -> Vec<VisitorId> {
        let mut out = std::mem::take(&mut self.batch);
        out.extend(self.wait_list.drain());
        self.status = FacilityStatus::Idle;
        self.run_start = None;
        self.last_status_change = None;
        out
    }

    /// Relocate on the grid.  Queue and cycle are unaffected.
    pub fn move_to(&mut self, pos: GridPos) {
        self.pos = pos;
    }

    // ── Derived statistics ────────────────────────────────────────────────

    /// Share of observed time spent running, in percent.  0 before any time
    /// has been observed.
    pub fn utilization(&self) -> f64 {
        let total = self.total_run_time + self.total_idle_time;
        if total == 0 {
            return 0.0;
        }
        self.total_run_time as f64 / total as f64 * 100.0
    }

    /// Static estimate of the wait for someone joining the back of the
    /// line now: whole batches ahead of them times `run_time`.  Ignores the
    /// progress of a cycle already under way.
    pub fn avg_waiting_time(&self) -> u64 {
        let waiting = self.wait_list.len() as u64;
        if waiting == 0 {
            return 0;
        }
        waiting.div_ceil(self.capacity as u64) * self.run_time
    }

    pub fn stats(&self) -> FacilityStats {
        FacilityStats {
            name:                  self.name.clone(),
            type_tag:              self.type_tag.clone(),
            capacity:              self.capacity,
            run_time:              self.run_time,
            pos:                   self.pos,
            status:                self.status,
            queue_len:             self.wait_list.len(),
            batch_len:             self.batch.len(),
            utilization:           self.utilization(),
            avg_waiting_time:      self.avg_waiting_time(),
            total_run_time:        self.total_run_time,
            total_idle_time:       self.total_idle_time,
            total_visitors_served: self.total_visitors_served,
        }
    }

    /// Test hook: set the accumulators directly.
    #[cfg(test)]
    pub(crate) fn set_totals(&mut self, run: u64, idle: u64) {
        self.total_run_time = run;
        self.total_idle_time = idle;
    }
}
