//! Event types and the time-ordered queue that drives the simulation.

use std::{cmp::Ordering, collections::BinaryHeap, fmt, ops::Add};

use serde::{Deserialize, Serialize};

use crate::{error::SchedulerError, protocol::Packet};

/// One of the two protocol endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Entity {
    /// The sending side.
    A,
    /// The receiving side.
    B,
}

impl Entity {
    /// Returns the entity at the other end of the channel.
    pub fn peer(self) -> Entity {
        match self {
            Entity::A => Entity::B,
            Entity::B => Entity::A,
        }
    }

    /// Dense index, usable for per-entity arrays.
    pub fn index(self) -> usize {
        match self {
            Entity::A => 0,
            Entity::B => 1,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::A => write!(f, "A"),
            Entity::B => write!(f, "B"),
        }
    }
}

/// A point on the logical clock, in abstract time units.
///
/// Wraps an `f64` and orders it with [`f64::total_cmp`] so it can key a heap.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    /// The start of every simulation.
    pub const ZERO: SimTime = SimTime(0.0);

    /// Creates a time from raw units.
    pub fn new(units: f64) -> Self {
        Self(units)
    }

    /// Returns the raw time units.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Discriminant of an [`Event`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A protocol timer expired.
    Timeout,
    /// The application layer handed down a new message.
    ApplicationArrival,
    /// A packet popped out of the channel.
    ChannelArrival,
}

/// Events that can be scheduled in the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The timer of `entity` went off.
    Timeout {
        /// Timer owner.
        entity: Entity,
    },
    /// The application at `entity` produced a message to send.
    ApplicationArrival {
        /// Entity whose application produced the message.
        entity: Entity,
    },
    /// A packet arrives at `entity`. The event owns its copy of the packet.
    ChannelArrival {
        /// Destination entity.
        entity: Entity,
        /// The (possibly corrupted) packet.
        packet: Packet,
    },
}

impl Event {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Timeout { .. } => EventKind::Timeout,
            Event::ApplicationArrival { .. } => EventKind::ApplicationArrival,
            Event::ChannelArrival { .. } => EventKind::ChannelArrival,
        }
    }

    /// Returns the entity the event occurs at.
    pub fn entity(&self) -> Entity {
        match self {
            Event::Timeout { entity }
            | Event::ApplicationArrival { entity }
            | Event::ChannelArrival { entity, .. } => *entity,
        }
    }

    /// Returns the carried packet, if any.
    pub fn packet(&self) -> Option<&Packet> {
        match self {
            Event::ChannelArrival { packet, .. } => Some(packet),
            _ => None,
        }
    }

    /// Returns `true` if this is an event of `kind` at `entity`.
    pub fn is(&self, kind: EventKind, entity: Entity) -> bool {
        self.kind() == kind && self.entity() == entity
    }
}

/// An event scheduled for execution at a specific simulation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    time: SimTime,
    event: Event,
    sequence: u64, // insertion order, breaks ties
}

impl ScheduledEvent {
    /// Creates a new scheduled event.
    pub fn new(time: SimTime, event: Event, sequence: u64) -> Self {
        Self {
            time,
            event,
            sequence,
        }
    }

    /// Returns the scheduled execution time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Returns a reference to the event.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Returns the insertion sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Consumes the scheduled event and returns the event.
    pub fn into_event(self) -> Event {
        self.event
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max heap, so both keys are reversed to pop the
        // earliest time first and, among equal times, the earliest insertion.
        match other.time.cmp(&self.time) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            other => other,
        }
    }
}

/// A priority queue for scheduling events in chronological order.
///
/// Events at the same time pop in the order they were scheduled.
#[derive(Debug)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Schedules an event for execution.
    pub fn schedule(&mut self, event: ScheduledEvent) {
        self.heap.push(event);
    }

    /// Removes and returns the earliest scheduled event.
    pub fn pop_earliest(&mut self) -> Result<ScheduledEvent, SchedulerError> {
        self.heap.pop().ok_or(SchedulerError::Empty)
    }

    /// Returns the earliest pending event matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&ScheduledEvent>
    where
        F: FnMut(&ScheduledEvent) -> bool,
    {
        self.heap.iter().filter(|event| predicate(*event)).max()
    }

    /// Removes the earliest pending event matching `predicate`.
    ///
    /// At most one event is removed. The heap is rebuilt afterwards, which is
    /// linear in the queue depth.
    pub fn cancel_if<F>(&mut self, predicate: F) -> Result<ScheduledEvent, SchedulerError>
    where
        F: FnMut(&ScheduledEvent) -> bool,
    {
        let sequence = self
            .find(predicate)
            .map(ScheduledEvent::sequence)
            .ok_or(SchedulerError::NotFound)?;

        let mut events = std::mem::take(&mut self.heap).into_vec();
        let position = events
            .iter()
            .position(|event| event.sequence == sequence)
            .ok_or(SchedulerError::NotFound)?;
        let removed = events.swap_remove(position);
        self.heap = BinaryHeap::from(events);
        Ok(removed)
    }

    /// Returns all pending events in the order they would be popped.
    pub fn snapshot(&self) -> Vec<&ScheduledEvent> {
        let mut events: Vec<&ScheduledEvent> = self.heap.iter().collect();
        events.sort_by(|a, b| b.cmp(a));
        events
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of events in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
