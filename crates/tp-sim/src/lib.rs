//! `tp-sim` — tick loop orchestrator for the rust_tp theme-park simulator.
//!
//! # Tick loop
//!
//! ```text
//! for each tick `now`:
//!   ① Facilities — in creation order:
//!                    update(now); released riders → end_ride(now)
//!                    idle with a queue → start_run(now); admitted → start_ride(now)
//!   ② Visitors   — in id order, Free with a target:
//!                    one grid step towards the target facility
//!                    already there → start_waiting(now) + join its wait-list
//! ```
//!
//! Facilities run before visitors, so a visitor who joins a queue at tick
//! `t` is admitted at `t + 1` at the earliest.
//!
//! # Structural edits
//!
//! Adding, removing, and moving facilities happens between ticks through
//! [`Sim::add_facility`], [`Sim::remove_facility`] and [`Sim::move_facility`].
//! Each edit is recorded as a [`ParkEdit`] on a bounded undo history; the
//! tick loop never touches that history.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tp_core::SimConfig;
//! use tp_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .default_layout()
//!     .visitors(50)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod edit;
pub mod error;
pub mod observer;
pub mod park;
pub mod sim;


pub use builder::SimBuilder;
pub use edit::ParkEdit;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use park::Park;
pub use sim::{Sim, TickSummary};
