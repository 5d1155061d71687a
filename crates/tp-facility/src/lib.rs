//! `tp-facility` — attractions and their service cycle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`facility`] | `Facility`, `FacilityStatus`, `QueueSample`, `FacilityStats` |
//! | [`kind`]     | `FacilityKind` (closed set of built-in types) + defaults     |
//! | [`record`]   | `FacilityRecord` — the persisted layout row                  |
//! | [`factory`]  | `FacilityFactory`, `default_facilities`, `random_free_position` |
//! | [`error`]    | `FacilityError`, `FacilityResult<T>`                         |
//!
//! # Service cycle (summary)
//!
//! ```text
//!            start_run(now), wait-list non-empty
//!   Idle ───────────────────────────────────────────▶ Running
//!    ▲                                                   │
//!    └──────── update(now), now - run_start ≥ run_time ──┘
//!                    (batch released to the caller)
//! ```
//!
//! `update` also advances the run/idle accumulators by elapsed time and
//! samples the queue length into a capped history ring.

pub mod error;
pub mod facility;
pub mod factory;
pub mod kind;
pub mod record;

#[cfg(test)]
mod tests;

pub use error::{FacilityError, FacilityResult};
pub use facility::{DEFAULT_HISTORY_CAP, Facility, FacilityStats, FacilityStatus, QueueSample};
pub use factory::{FacilityFactory, default_facilities, random_free_position};
pub use kind::{DEFAULT_CAPACITY, DEFAULT_EMOJI, DEFAULT_RUN_TIME, FacilityKind, KindDefaults};
pub use record::FacilityRecord;
