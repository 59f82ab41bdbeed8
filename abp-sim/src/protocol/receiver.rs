//! Receiving entity (B) of the alternating-bit protocol.
//!
//! B keeps no explicit state machine. The sequence number it expects next is
//! derived from the last ack it sent, and every arrival either advances that
//! or triggers a resend of the last ack.

use serde::Serialize;

use crate::{
    protocol::{next_seq, ApplicationLayer, Packet},
    sim::{Entity, SimWorld},
};

/// Counters kept by the receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReceiverStats {
    /// Payloads handed to the application.
    pub delivered: u64,
    /// Times the previous ack was re-sent instead of a new one.
    pub duplicate_acks_sent: u64,
    /// Arrivals that failed the checksum.
    pub corrupt_received: u64,
    /// Intact arrivals carrying the wrong sequence number.
    pub out_of_order_received: u64,
}

/// The receiving protocol entity.
#[derive(Debug, Clone)]
pub struct Receiver {
    entity: Entity,
    last_sent_ack_packet: Packet,
    last_accepted_data_packet: Packet,
    stats: ReceiverStats,
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Receiver {
    /// Creates entity B expecting sequence number 0 first.
    pub fn new() -> Self {
        Self {
            entity: Entity::B,
            last_sent_ack_packet: Packet::ack(1, 1),
            last_accepted_data_packet: Packet::ack(1, 1),
            stats: ReceiverStats::default(),
        }
    }

    /// Returns the entity this receiver runs at.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Sequence number of the next data packet to accept.
    pub fn expected_seqnum(&self) -> u32 {
        next_seq(self.last_sent_ack_packet.acknum)
    }

    /// Returns the most recent ack sent.
    pub fn last_sent_ack_packet(&self) -> &Packet {
        &self.last_sent_ack_packet
    }

    /// Returns the most recent data packet accepted.
    pub fn last_accepted_data_packet(&self) -> &Packet {
        &self.last_accepted_data_packet
    }

    /// Returns the counters.
    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }

    /// Handles a data packet arriving from the channel.
    ///
    /// An intact packet with the expected sequence number is delivered once
    /// and acknowledged. Anything else gets the previous ack re-sent.
    pub fn input<A>(&mut self, world: &mut SimWorld, packet: Packet, application: &mut A)
    where
        A: ApplicationLayer + ?Sized,
    {
        let expected = self.expected_seqnum();

        if !packet.is_intact() {
            self.stats.corrupt_received += 1;
            tracing::debug!(entity = %self.entity, %packet, "checksum mismatch: resending last ack");
            self.resend_last_ack(world);
            return;
        }
        if packet.seqnum != expected {
            self.stats.out_of_order_received += 1;
            tracing::debug!(
                entity = %self.entity,
                %packet,
                expected,
                "unexpected sequence number: resending last ack"
            );
            self.resend_last_ack(world);
            return;
        }

        application.notify_delivered(self.entity, packet.payload);
        self.stats.delivered += 1;

        let ack = Packet::ack(next_seq(self.last_sent_ack_packet.seqnum), expected);
        world.transmit(self.entity, &ack);
        self.last_sent_ack_packet = ack;
        self.last_accepted_data_packet = packet;
    }

    fn resend_last_ack(&mut self, world: &mut SimWorld) {
        world.transmit(self.entity, &self.last_sent_ack_packet);
        self.stats.duplicate_acks_sent += 1;
    }
}
