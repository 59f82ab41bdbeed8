//! Core simulation engine.
//!
//! ## Submodules
//!
//! - `events` - Event types, logical time and the event queue
//! - `rng` - Seeded random number generation
//! - `timer` - Per-entity single-shot timers built on timeout events
//! - `world` - The owned simulation context

pub mod events;
pub mod rng;
pub mod timer;
pub mod world;

pub use events::{Entity, Event, EventKind, EventQueue, ScheduledEvent, SimTime};
pub use rng::SimRng;
pub use world::SimWorld;
