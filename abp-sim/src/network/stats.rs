//! Channel counters.

use serde::Serialize;

/// Counters kept by the channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    /// Packets handed to the channel, including ones later lost.
    pub transmitted: u64,
    /// Packets dropped by the loss model.
    pub lost: u64,
    /// Packets damaged by the corruption model.
    pub corrupted: u64,
    /// Arrival events scheduled at either side.
    pub scheduled: u64,
}
