//! Sending entity (A) of the alternating-bit protocol.
//!
//! ```text
//!              output(msg) / send seq, start timer
//!   +-------+ ------------------------------------> +--------------+
//!   | Ready |                                       | AwaitingAck  | --+
//!   +-------+ <------------------------------------ +--------------+   | timeout /
//!              valid ack for seq / stop timer              ^           | resend seq,
//!                                                          +-----------+ restart timer
//! ```
//!
//! Messages handed down while awaiting an ack are dropped: exactly one data
//! packet is ever in flight and nothing is buffered. Bad acks are ignored;
//! only the timer triggers retransmission.

use serde::Serialize;

use crate::{
    protocol::{next_seq, Message, Packet},
    sim::{Entity, SimWorld},
};

/// State of the sending entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SenderState {
    /// Nothing in flight; the next message will be sent.
    Ready,
    /// One data packet is unacknowledged and the timer is running.
    AwaitingAck,
}

/// Counters kept by the sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SenderStats {
    /// New data packets transmitted.
    pub messages_sent: u64,
    /// Messages refused because a packet was already in flight.
    pub messages_dropped: u64,
    /// Data packets re-sent after a timeout.
    pub retransmissions: u64,
    /// Acks that completed an exchange.
    pub acks_accepted: u64,
    /// Acks ignored as corrupt, mismatched or unexpected.
    pub acks_discarded: u64,
}

/// The sending protocol entity.
#[derive(Debug, Clone)]
pub struct Sender {
    entity: Entity,
    timeout: f64,
    awaiting_ack: bool,
    last_sent_packet: Packet,
    last_received_ack_packet: Packet,
    stats: SenderStats,
}

impl Sender {
    /// Creates entity A with the given retransmission timeout.
    ///
    /// The seeded last packet has `seqnum = 1` so the first real one uses 0.
    pub fn new(timeout: f64) -> Self {
        Self {
            entity: Entity::A,
            timeout,
            awaiting_ack: false,
            last_sent_packet: Packet {
                seqnum: 1,
                acknum: 0,
                ..Packet::default()
            },
            last_received_ack_packet: Packet::default(),
            stats: SenderStats::default(),
        }
    }

    /// Returns the entity this sender runs at.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Returns the current state.
    pub fn state(&self) -> SenderState {
        if self.awaiting_ack {
            SenderState::AwaitingAck
        } else {
            SenderState::Ready
        }
    }

    /// Returns the retransmission timeout.
    pub fn timeout(&self) -> f64 {
        self.timeout
    }

    /// Returns the most recent data packet sent.
    pub fn last_sent_packet(&self) -> &Packet {
        &self.last_sent_packet
    }

    /// Returns the most recent ack accepted.
    pub fn last_received_ack_packet(&self) -> &Packet {
        &self.last_received_ack_packet
    }

    /// Returns the counters.
    pub fn stats(&self) -> &SenderStats {
        &self.stats
    }

    /// Sends `message` if nothing is in flight, otherwise drops it.
    ///
    /// Returns `true` if the message was sent.
    pub fn output(&mut self, world: &mut SimWorld, message: Message) -> bool {
        if self.awaiting_ack {
            self.stats.messages_dropped += 1;
            tracing::debug!(entity = %self.entity, data = %message.data, "dropping message: awaiting ack");
            return false;
        }

        let seqnum = next_seq(self.last_sent_packet.seqnum);
        let acknum = self.last_received_ack_packet.seqnum;
        let packet = Packet::new(seqnum, acknum, message.data);

        world.transmit(self.entity, &packet);
        self.last_sent_packet = packet;
        self.awaiting_ack = true;
        self.stats.messages_sent += 1;
        self.restart_timer(world);
        true
    }

    /// Handles a packet arriving from the channel.
    pub fn input(&mut self, world: &mut SimWorld, packet: Packet) {
        if !self.awaiting_ack {
            self.stats.acks_discarded += 1;
            tracing::debug!(entity = %self.entity, %packet, "discarding ack: nothing in flight");
            return;
        }
        if packet.acknum != self.last_sent_packet.seqnum {
            self.stats.acks_discarded += 1;
            tracing::debug!(
                entity = %self.entity,
                %packet,
                expected = self.last_sent_packet.seqnum,
                "discarding ack: unexpected ack number"
            );
            return;
        }
        if !packet.is_intact() {
            self.stats.acks_discarded += 1;
            tracing::debug!(entity = %self.entity, %packet, "discarding ack: checksum mismatch");
            return;
        }

        if let Err(e) = world.stop_timer(self.entity) {
            tracing::warn!("{e}");
        }
        self.awaiting_ack = false;
        self.last_received_ack_packet = packet;
        self.stats.acks_accepted += 1;
        tracing::trace!(entity = %self.entity, acknum = packet.acknum, "ack accepted");
    }

    /// Handles expiry of this entity's timer by re-sending the packet in flight.
    pub fn timer_interrupt(&mut self, world: &mut SimWorld) {
        if !self.awaiting_ack {
            // A live timer implies a packet in flight.
            tracing::error!(entity = %self.entity, "timeout fired with nothing in flight");
            return;
        }

        tracing::debug!(entity = %self.entity, packet = %self.last_sent_packet, "timeout: resending");
        world.transmit(self.entity, &self.last_sent_packet);
        self.stats.retransmissions += 1;
        self.restart_timer(world);
    }

    fn restart_timer(&self, world: &mut SimWorld) {
        if let Err(e) = world.start_timer(self.entity, self.timeout) {
            tracing::warn!("{e}");
        }
    }
}
