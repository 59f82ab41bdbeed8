//! Owned simulation context: clock, event queue, random source and channel.

use tracing::instrument;

use crate::{
    error::SchedulerError,
    network::{Channel, ChannelConfiguration, ChannelStats},
    sim::{
        events::{Event, EventQueue, ScheduledEvent, SimTime},
        rng::SimRng,
    },
};

/// The single owned simulation context.
///
/// `SimWorld` holds the logical clock, the event queue, the seeded random
/// source and the channel state. Every component receives it by `&mut`
/// reference; nothing lives in globals. Time only moves forward when
/// [`SimWorld::pop_event`] hands out the next event.
#[derive(Debug)]
pub struct SimWorld {
    current_time: SimTime,
    event_queue: EventQueue,
    next_sequence: u64,
    events_processed: u64,
    rng: SimRng,
    pub(crate) channel: Channel,
}

impl SimWorld {
    /// Creates a world with a lossless, corruption-free channel.
    pub fn new(seed: u64) -> Self {
        Self::new_with_channel_config(ChannelConfiguration::default(), seed)
    }

    /// Creates a world with the given channel model and seed.
    pub fn new_with_channel_config(config: ChannelConfiguration, seed: u64) -> Self {
        Self {
            current_time: SimTime::ZERO,
            event_queue: EventQueue::new(),
            next_sequence: 0,
            events_processed: 0,
            rng: SimRng::new(seed),
            channel: Channel::new(config),
        }
    }

    /// Returns the current simulation time.
    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    /// Returns the seeded random source.
    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Schedules an event to execute after `delay` time units.
    ///
    /// `delay` must be finite and non-negative.
    pub fn schedule_event(&mut self, event: Event, delay: f64) -> Result<(), SchedulerError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SchedulerError::InvalidDelay { delay });
        }
        let time = self.current_time + delay;
        self.schedule_event_at(event, time)
    }

    /// Schedules an event to execute at the absolute time `time`.
    ///
    /// Fails if `time` is earlier than the current clock or not finite, so
    /// popped times never decrease.
    pub fn schedule_event_at(
        &mut self,
        event: Event,
        time: SimTime,
    ) -> Result<(), SchedulerError> {
        if !time.as_f64().is_finite() {
            return Err(SchedulerError::InvalidDelay {
                delay: time.as_f64() - self.current_time.as_f64(),
            });
        }
        if time < self.current_time {
            return Err(SchedulerError::InPast {
                at: time,
                now: self.current_time,
            });
        }
        tracing::trace!(now = %self.current_time, at = %time, ?event, "insert event");
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.event_queue
            .schedule(ScheduledEvent::new(time, event, sequence));
        Ok(())
    }

    /// Removes the earliest event and advances the clock to its time.
    #[instrument(skip(self), level = "trace")]
    pub fn pop_event(&mut self) -> Result<ScheduledEvent, SchedulerError> {
        let scheduled = self.event_queue.pop_earliest()?;
        self.current_time = scheduled.time();
        self.events_processed += 1;
        tracing::debug!(
            time = %scheduled.time(),
            kind = ?scheduled.event().kind(),
            entity = %scheduled.event().entity(),
            "EVENT"
        );
        Ok(scheduled)
    }

    /// Cancels the earliest pending event matching `predicate`.
    pub fn cancel_event_if<F>(&mut self, predicate: F) -> Result<ScheduledEvent, SchedulerError>
    where
        F: FnMut(&ScheduledEvent) -> bool,
    {
        self.event_queue.cancel_if(predicate)
    }

    /// Returns the earliest pending event matching `predicate`.
    pub fn find_event<F>(&self, predicate: F) -> Option<&ScheduledEvent>
    where
        F: FnMut(&ScheduledEvent) -> bool,
    {
        self.event_queue.find(predicate)
    }

    /// Returns all pending events in pop order.
    pub fn pending_events(&self) -> Vec<&ScheduledEvent> {
        self.event_queue.snapshot()
    }

    /// Logs the pending event list at trace level.
    pub fn trace_event_list(&self) {
        for scheduled in self.pending_events() {
            tracing::trace!(
                time = %scheduled.time(),
                kind = ?scheduled.event().kind(),
                entity = %scheduled.event().entity(),
                "pending"
            );
        }
    }

    /// Returns `true` if there are events waiting to be processed.
    pub fn has_pending_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Returns the number of events waiting to be processed.
    pub fn pending_event_count(&self) -> usize {
        self.event_queue.len()
    }

    /// Returns how many events have been popped so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Returns the channel model in effect.
    pub fn channel_config(&self) -> &ChannelConfiguration {
        self.channel.config()
    }

    /// Returns the channel counters.
    pub fn channel_stats(&self) -> &ChannelStats {
        self.channel.stats()
    }
}
