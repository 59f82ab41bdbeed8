//! # Alternating-Bit Protocol Simulator
//!
//! A closed-world testbed for reliable data transfer over an unreliable
//! channel. A discrete-event emulator drops, corrupts and delays packets
//! while never reordering them; two protocol entities run stop-and-wait ARQ
//! over it with one-bit sequence numbers, checksums and a retransmit timer.
//!
//! ## Components
//!
//! - [`SimWorld`]: the owned simulation context (clock, event queue, seeded RNG, channel)
//! - [`sim::timer`]: per-entity single-shot timers built on timeout events
//! - [`network`]: the lossy, corrupting, order-preserving channel
//! - [`protocol`]: packet format, sender (A) and receiver (B) state machines
//! - [`runner`]: configuration, driver loop and report
//!
//! ```text
//!  application -> Sender (A) -> channel -> event queue -> Receiver (B) -> application
//!                     ^                                        |
//!                     +----------- channel <- acks ------------+
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use abp_sim::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::default()
//!     .with_messages(5)
//!     .with_faults(0.1, 0.1)
//!     .with_drain(true);
//! let report = Simulation::new(config).unwrap().run();
//! assert!(report.delivered.len() as u64 <= report.messages_generated);
//! ```
//!
//! The same seed always yields the same run.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Error types for scheduling, timers and simulation setup.
pub mod error;
pub mod network;
pub mod protocol;
pub mod runner;
pub mod sim;

pub use error::{SchedulerError, SimulationError, SimulationResult, TimerError};
pub use network::{ChannelConfiguration, ChannelStats, DelayRange};
pub use protocol::{
    checksum, ApplicationLayer, Corruption, DeliveryLog, Message, Packet, Payload, Receiver,
    Sender, SenderState,
};
pub use runner::{Simulation, SimulationConfig, SimulationReport};
pub use sim::{Entity, Event, EventKind, EventQueue, ScheduledEvent, SimRng, SimTime, SimWorld};
