//! `tp-queue` — the ordered containers the simulator is built on.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`wait_list`]   | `WaitList<T>` — FIFO service queue owned by one facility  |
//! | [`itinerary`]   | `ItineraryStack<T>` — LIFO list of remaining destinations |
//! | [`event_queue`] | `EventQueue<K, P>` — `(time, seq)`-ordered min-heap       |
//! | [`command`]     | `Command` trait, `CommandStack<C>` (bounded undo/redo)    |
//!
//! # Underflow is not an error
//!
//! Popping an empty wait-list, itinerary, or event queue returns `None`, and
//! undo/redo on an empty history returns `false`.  Callers are expected to
//! check; nothing here panics or aborts the tick loop.

pub mod command;
pub mod event_queue;
pub mod itinerary;
pub mod wait_list;


pub use command::{Command, CommandStack, DEFAULT_UNDO_DEPTH};
pub use event_queue::{EventQueue, ScheduledEvent};
pub use itinerary::ItineraryStack;
pub use wait_list::WaitList;
