//! Plain data row types written by output backends.

use tp_core::{FacilityId, Tick};
use tp_facility::{FacilityStats, QueueSample};
use tp_sim::TickSummary;

/// One facility's accumulators at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySnapshotRow {
    pub tick:                  u64,
    pub facility_id:           u32,
    pub name:                  String,
    pub type_tag:              String,
    pub x:                     i32,
    pub y:                     i32,
    pub status:                &'static str,
    pub queue_len:             u64,
    pub batch_len:             u64,
    /// Percent of observed time spent running.
    pub utilization:           f64,
    pub avg_waiting_time:      u64,
    pub total_visitors_served: u64,
    pub total_run_time:        u64,
    pub total_idle_time:       u64,
}

impl FacilitySnapshotRow {
    pub fn new(tick: Tick, id: FacilityId, stats: &FacilityStats) -> Self {
        Self {
            tick:                  tick.0,
            facility_id:           id.0,
            name:                  stats.name.clone(),
            type_tag:              stats.type_tag.clone(),
            x:                     stats.pos.x,
            y:                     stats.pos.y,
            status:                stats.status.as_str(),
            queue_len:             stats.queue_len as u64,
            batch_len:             stats.batch_len as u64,
            utilization:           stats.utilization,
            avg_waiting_time:      stats.avg_waiting_time,
            total_visitors_served: stats.total_visitors_served,
            total_run_time:        stats.total_run_time,
            total_idle_time:       stats.total_idle_time,
        }
    }
}

/// One `(time, queue length)` sample of one facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSampleRow {
    pub facility_id: u32,
    pub name:        String,
    pub tick:        u64,
    pub queue_len:   u64,
}

impl QueueSampleRow {
    pub fn new(id: FacilityId, name: &str, sample: &QueueSample) -> Self {
        Self {
            facility_id: id.0,
            name:        name.to_owned(),
            tick:        sample.time.0,
            queue_len:   sample.len as u64,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub free:               u64,
    pub waiting:            u64,
    pub riding:             u64,
    pub done:               u64,
    pub running_facilities: u64,
    pub queued:             u64,
    pub arrivals:           u64,
    pub cycles_started:     u64,
    pub released:           u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:               s.tick.0,
            free:               s.free as u64,
            waiting:            s.waiting as u64,
            riding:             s.riding as u64,
            done:               s.done as u64,
            running_facilities: s.running_facilities as u64,
            queued:             s.queued as u64,
            arrivals:           s.arrivals as u64,
            cycles_started:     s.cycles_started as u64,
            released:           s.released as u64,
        }
    }
}
