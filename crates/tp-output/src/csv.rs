//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `facility_stats.csv`
//! - `queue_history.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FacilitySnapshotRow, OutputResult, QueueSampleRow, TickSummaryRow};

pub const FACILITY_STATS_FILE: &str = "facility_stats.csv";
pub const QUEUE_HISTORY_FILE: &str = "queue_history.csv";
pub const TICK_SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes run output to three CSV files.
pub struct CsvWriter {
    stats:     Writer<File>,
    history:   Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stats = Writer::from_path(dir.join(FACILITY_STATS_FILE))?;
        stats.write_record([
            "tick",
            "facility_id",
            "name",
            "type",
            "x",
            "y",
            "status",
            "queue_len",
            "batch_len",
            "utilization",
            "avg_waiting_time",
            "total_visitors_served",
            "total_run_time",
            "total_idle_time",
        ])?;

        let mut history = Writer::from_path(dir.join(QUEUE_HISTORY_FILE))?;
        history.write_record(["facility_id", "name", "tick", "queue_len"])?;

        let mut summaries = Writer::from_path(dir.join(TICK_SUMMARIES_FILE))?;
        summaries.write_record([
            "tick",
            "free",
            "waiting",
            "riding",
            "done",
            "running_facilities",
            "queued",
            "arrivals",
            "cycles_started",
            "released",
        ])?;

        Ok(Self {
            stats,
            history,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_facility_stats(&mut self, rows: &[FacilitySnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.stats.write_record(&[
                row.tick.to_string(),
                row.facility_id.to_string(),
                row.name.clone(),
                row.type_tag.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.status.to_owned(),
                row.queue_len.to_string(),
                row.batch_len.to_string(),
                format!("{:.2}", row.utilization),
                row.avg_waiting_time.to_string(),
                row.total_visitors_served.to_string(),
                row.total_run_time.to_string(),
                row.total_idle_time.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_queue_history(&mut self, rows: &[QueueSampleRow]) -> OutputResult<()> {
        for row in rows {
            self.history.write_record(&[
                row.facility_id.to_string(),
                row.name.clone(),
                row.tick.to_string(),
                row.queue_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.free.to_string(),
            row.waiting.to_string(),
            row.riding.to_string(),
            row.done.to_string(),
            row.running_facilities.to_string(),
            row.queued.to_string(),
            row.arrivals.to_string(),
            row.cycles_started.to_string(),
            row.released.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stats.flush()?;
        self.history.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
