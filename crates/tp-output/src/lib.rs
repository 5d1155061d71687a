//! `tp-output` — persistence and export collaborators for the rust_tp
//! simulator.
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`layout`]   | `save_layout` / `load_layout` (JSON array of `FacilityRecord`) |
//! | [`csv`]      | `CsvWriter`                                                 |
//! | [`observer`] | `SimOutputObserver` — drives any `OutputWriter` from a run  |
//!
//! The CSV backend creates three files in the output directory:
//! `facility_stats.csv`, `queue_history.csv`, `tick_summaries.csv`.
//!
//! Nothing in this crate can stall the tick loop: observer write failures
//! are stored and handed back after the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tp_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod layout;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use layout::{load_layout, save_layout};
pub use observer::SimOutputObserver;
pub use row::{FacilitySnapshotRow, QueueSampleRow, TickSummaryRow};
pub use writer::OutputWriter;
