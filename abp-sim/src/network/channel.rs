//! Lossy, corrupting, order-preserving channel.
//!
//! Each packet handed to [`SimWorld::transmit`] goes through the fault model
//! in a fixed order of random draws:
//!
//! 1. loss: the packet vanishes and nothing is scheduled
//! 2. delay: arrival lands `delay` after the later of now and the previous
//!    arrival scheduled toward the same entity, so the medium never reorders
//! 3. corruption: one of payload, seqnum or acknum is overwritten
//!
//! The channel works on its own copy. The caller's packet is never aliased.

use crate::{
    network::{ChannelConfiguration, ChannelStats},
    protocol::{Corruption, Packet},
    sim::{Entity, Event, SimTime, SimWorld},
};

/// Channel state: the model, the counters and the arrival watermark per side.
#[derive(Debug)]
pub struct Channel {
    config: ChannelConfiguration,
    stats: ChannelStats,
    last_arrival: [Option<SimTime>; 2],
}

impl Channel {
    /// Creates an idle channel.
    pub fn new(config: ChannelConfiguration) -> Self {
        Self {
            config,
            stats: ChannelStats::default(),
            last_arrival: [None, None],
        }
    }

    /// Returns the fault model.
    pub fn config(&self) -> &ChannelConfiguration {
        &self.config
    }

    /// Returns the counters.
    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    /// Latest arrival time scheduled toward `destination`.
    pub fn last_arrival(&self, destination: Entity) -> Option<SimTime> {
        self.last_arrival[destination.index()]
    }
}

impl SimWorld {
    /// Hands `packet` from `source` to the channel for delivery at its peer.
    pub fn transmit(&mut self, source: Entity, packet: &Packet) {
        self.channel.stats.transmitted += 1;

        let loss_probability = self.channel.config.loss_probability;
        if self.rng().random_bool(loss_probability) {
            self.channel.stats.lost += 1;
            tracing::info!(%source, "TOLAYER3: packet being lost");
            return;
        }

        let mut copy = *packet;
        tracing::trace!(%source, packet = %copy, "TOLAYER3");

        let destination = source.peer();
        let now = self.current_time();
        let departure = self
            .channel
            .last_arrival(destination)
            .map_or(now, |last| last.max(now));
        let delay = self.channel.config.delay;
        let arrival = departure + delay.sample(self.rng());

        let corrupt_probability = self.channel.config.corrupt_probability;
        if self.rng().random_bool(corrupt_probability) {
            let corruption = Corruption::from_sample(self.rng().random01());
            copy.corrupt(corruption);
            self.channel.stats.corrupted += 1;
            tracing::info!(%source, ?corruption, "TOLAYER3: packet being corrupted");
        }

        tracing::trace!(%destination, at = %arrival, "TOLAYER3: scheduling arrival on other side");
        let event = Event::ChannelArrival {
            entity: destination,
            packet: copy,
        };
        match self.schedule_event_at(event, arrival) {
            Ok(()) => {
                self.channel.last_arrival[destination.index()] = Some(arrival);
                self.channel.stats.scheduled += 1;
            }
            Err(e) => {
                self.channel.stats.lost += 1;
                tracing::error!(%source, "TOLAYER3: unusable delay, packet dropped: {e}");
            }
        }
    }
}
