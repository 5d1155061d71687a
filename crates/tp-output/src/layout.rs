//! Park layout persistence: a JSON array of [`FacilityRecord`]s.
//!
//! ```json
//! [
//!   { "name": "Thunder Coaster", "x": 3, "y": 3, "capacity": 20,
//!     "run_time": 120, "type": "roller_coaster", "emoji": "🎢" }
//! ]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tp_facility::FacilityRecord;
use tracing::{debug, info};

use crate::OutputResult;

/// Write `records` to `path` as pretty-printed JSON, replacing any existing
/// file.
pub fn save_layout(path: &Path, records: &[FacilityRecord]) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush()?;
    info!(path = %path.display(), facilities = records.len(), "layout saved");
    Ok(())
}

/// Read a layout written by [`save_layout`].
///
/// A missing file is an empty layout, not an error.  Records are not
/// validated here; `Facility::from_record` does that.
pub fn load_layout(path: &Path) -> OutputResult<Vec<FacilityRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no layout file; starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let records: Vec<FacilityRecord> = serde_json::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), facilities = records.len(), "layout loaded");
    Ok(records)
}
