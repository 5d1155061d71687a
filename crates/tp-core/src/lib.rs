//! `tp-core` — foundational types for the `rust_tp` theme-park simulator.
//!
//! This crate is a dependency of every other `tp-*` crate.  It has no `tp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `FacilityId`, `VisitorId`                             |
//! | [`grid`]    | `GridPos`, manhattan distance, single-step movement   |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]     | `SimRng` (seeded, deterministic)                      |
//! | [`error`]   | `TpError`, `TpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TpError, TpResult};
pub use grid::GridPos;
pub use ids::{FacilityId, VisitorId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick, format_hms};
