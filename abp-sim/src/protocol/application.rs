//! Upward delivery from the receiving entity to its application.

use serde::Serialize;

use crate::{protocol::Payload, sim::Entity};

/// Upward interface from a protocol entity to its application.
pub trait ApplicationLayer {
    /// Called exactly once per data packet accepted in order.
    fn notify_delivered(&mut self, entity: Entity, payload: Payload);
}

/// One payload handed to an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Entity whose application received the data.
    pub entity: Entity,
    /// The delivered bytes.
    pub payload: Payload,
}

/// Application sink that records every delivery in order.
#[derive(Debug, Clone, Default)]
pub struct DeliveryLog {
    deliveries: Vec<Delivery>,
}

impl DeliveryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every delivery so far, oldest first.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Returns the delivered payloads, oldest first.
    pub fn payloads(&self) -> Vec<Payload> {
        self.deliveries.iter().map(|d| d.payload).collect()
    }

    /// Returns the number of deliveries.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Returns `true` if nothing was delivered.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

impl ApplicationLayer for DeliveryLog {
    fn notify_delivered(&mut self, entity: Entity, payload: Payload) {
        tracing::trace!(%entity, data = %payload, "TOLAYER5: data received");
        self.deliveries.push(Delivery { entity, payload });
    }
}
