//! End-of-run report.

use std::fmt;

use serde::Serialize;

use crate::{
    network::ChannelStats,
    protocol::{Payload, ReceiverStats, SenderStats},
    sim::SimTime,
};

/// Counters and deliveries of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Seed the run used; rerunning with it reproduces the run.
    pub seed: u64,
    /// Logical time of the last processed event.
    pub end_time: SimTime,
    /// Application messages handed to A.
    pub messages_generated: u64,
    /// Events popped from the queue.
    pub events_processed: u64,
    /// Channel counters.
    pub channel: ChannelStats,
    /// Sender counters.
    pub sender: SenderStats,
    /// Receiver counters.
    pub receiver: ReceiverStats,
    /// Payloads delivered to the application at B, in order, byte for byte.
    pub delivered: Vec<Payload>,
}

impl SimulationReport {
    /// Fraction of generated messages that reached B's application.
    pub fn delivery_ratio(&self) -> f64 {
        if self.messages_generated == 0 {
            0.0
        } else {
            self.delivered.len() as f64 / self.messages_generated as f64
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation Report ===")?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(
            f,
            "Simulator terminated at time {} after sending {} msgs from layer5",
            self.end_time, self.messages_generated
        )?;
        writeln!(f, "Events Processed: {}", self.events_processed)?;
        writeln!(f)?;
        writeln!(f, "Channel:")?;
        writeln!(f, "  transmitted: {}", self.channel.transmitted)?;
        writeln!(f, "  lost: {}", self.channel.lost)?;
        writeln!(f, "  corrupted: {}", self.channel.corrupted)?;
        writeln!(f, "  scheduled: {}", self.channel.scheduled)?;
        writeln!(f)?;
        writeln!(f, "Sender (A):")?;
        writeln!(f, "  sent: {}", self.sender.messages_sent)?;
        writeln!(f, "  dropped while awaiting ack: {}", self.sender.messages_dropped)?;
        writeln!(f, "  retransmissions: {}", self.sender.retransmissions)?;
        writeln!(f, "  acks accepted: {}", self.sender.acks_accepted)?;
        writeln!(f, "  acks discarded: {}", self.sender.acks_discarded)?;
        writeln!(f)?;
        writeln!(f, "Receiver (B):")?;
        writeln!(f, "  delivered: {}", self.receiver.delivered)?;
        writeln!(f, "  duplicate acks: {}", self.receiver.duplicate_acks_sent)?;
        writeln!(f, "  corrupt: {}", self.receiver.corrupt_received)?;
        writeln!(f, "  out of order: {}", self.receiver.out_of_order_received)?;
        writeln!(f)?;
        writeln!(f, "Delivery Ratio: {:.2}%", self.delivery_ratio() * 100.0)?;
        if !self.delivered.is_empty() {
            writeln!(f)?;
            writeln!(f, "Delivered:")?;
            for payload in &self.delivered {
                writeln!(f, "  {payload}")?;
            }
        }
        Ok(())
    }
}
