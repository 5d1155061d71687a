//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tp_core::Tick;
use tp_sim::{Park, SimObserver, TickSummary};
use tracing::warn;

use crate::row::{FacilitySnapshotRow, QueueSampleRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries, periodic facility
/// snapshots, and (at the end of the run) every facility's queue-length
/// history to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; further errors are dropped");
                self.last_error = Some(e);
            }
        }
    }

    fn write_snapshot(&mut self, tick: Tick, park: &Park) {
        let rows: Vec<FacilitySnapshotRow> = park
            .facilities()
            .map(|(id, f)| FacilitySnapshotRow::new(tick, id, &f.stats()))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_facility_stats(&rows);
            self.store_err(result);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, park: &Park) {
        self.write_snapshot(tick, park);
    }

    fn on_sim_end(&mut self, final_tick: Tick, park: &Park) {
        self.write_snapshot(final_tick, park);

        let rows: Vec<QueueSampleRow> = park
            .facilities()
            .flat_map(|(id, f)| f.history().iter().map(move |s| QueueSampleRow::new(id, f.name(), s)))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_queue_history(&rows);
            self.store_err(result);
        }

        let result = self.writer.finish();
        self.store_err(result);
    }
}
