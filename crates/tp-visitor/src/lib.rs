//! `tp-visitor` — mobile agents walking a personal itinerary of facilities.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`visitor`]   | `Visitor`, `VisitorStatus`                            |
//! | [`generator`] | `VisitorGenerator` (id allocation, itinerary sampling) |
//!
//! # Visitor lifecycle
//!
//! ```text
//!   Free ──arrive──▶ Waiting ──admitted──▶ Riding
//!    ▲                  │                    │
//!    └──── end_ride (stops left) ◀───────────┘
//!                       │
//!                       └── end_ride (no stops left) ──▶ Done
//! ```
//!
//! The visitor never touches a facility.  The orchestrator observes
//! arrival through [`Visitor::move_towards`], registers the visitor on the
//! facility's wait-list, and calls the transition methods as the facility
//! admits and releases batches.

pub mod generator;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use generator::{MAX_PLAN_LEN, MIN_PLAN_LEN, VisitorGenerator};
pub use visitor::{Visitor, VisitorStatus};
