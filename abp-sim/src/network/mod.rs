//! Simulated unreliable channel between the two protocol entities.

pub mod channel;
pub mod config;
pub mod stats;

pub use channel::Channel;
pub use config::{ChannelConfiguration, DelayRange};
pub use stats::ChannelStats;
