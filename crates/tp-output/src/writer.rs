//! The `OutputWriter` trait implemented by export backends.

use crate::{FacilitySnapshotRow, OutputResult, QueueSampleRow, TickSummaryRow};

/// Sink for run output.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores them instead of interrupting the run.
pub trait OutputWriter {
    /// Write one snapshot row per facility.
    fn write_facility_stats(&mut self, rows: &[FacilitySnapshotRow]) -> OutputResult<()>;

    /// Write queue-length samples.
    fn write_queue_history(&mut self, rows: &[QueueSampleRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
