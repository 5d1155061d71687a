//! `FacilityRecord` — the persisted form of a facility.
//!
//! Only configuration and placement round-trip; runtime state (queue, batch,
//! accumulators, history) starts fresh when a record is loaded.
//!
//! ```json
//! { "name": "Thunder Run", "x": 3, "y": 3, "capacity": 20,
//!   "run_time": 120, "type": "roller_coaster", "emoji": "🎢" }
//! ```

use serde::{Deserialize, Serialize};

use tp_core::GridPos;

use crate::{DEFAULT_EMOJI, Facility, FacilityResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name:     String,
    pub x:        i32,
    pub y:        i32,
    pub capacity: u32,
    pub run_time: u64,
    #[serde(rename = "type", default = "default_type")]
    pub type_tag: String,
    #[serde(default = "default_emoji")]
    pub emoji:    String,
}

fn default_type() -> String {
    "default".to_owned()
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_owned()
}

impl Facility {
    pub fn to_record(&self) -> FacilityRecord {
        FacilityRecord {
            name:     self.name().to_owned(),
            x:        self.pos().x,
            y:        self.pos().y,
            capacity: self.capacity(),
            run_time: self.run_time(),
            type_tag: self.type_tag().to_owned(),
            emoji:    self.emoji().to_owned(),
        }
    }

    /// Rebuild an idle facility from a record, re-validating its
    /// configuration.  The stored emoji is kept as-is.
    pub fn from_record(record: &FacilityRecord) -> FacilityResult<Facility> {
        Facility::new(
            record.name.clone(),
            record.type_tag.clone(),
            record.capacity,
            record.run_time,
            GridPos::new(record.x, record.y),
        )
        .map(|f| f.with_emoji(record.emoji.clone()))
    }
}
