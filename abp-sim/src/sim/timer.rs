//! Per-entity single-shot timers.
//!
//! A running timer is nothing more than a pending [`Event::Timeout`] for its
//! entity, so at most one can exist per entity at any time.

use crate::{
    error::TimerError,
    sim::{
        events::{Entity, Event, EventKind, SimTime},
        world::SimWorld,
    },
};

impl SimWorld {
    /// Starts the timer of `entity` to fire `duration` units from now.
    ///
    /// Fails without touching the live timer if one is already running, and
    /// without scheduling anything if `duration` is negative or not finite.
    pub fn start_timer(&mut self, entity: Entity, duration: f64) -> Result<(), TimerError> {
        if let Some(fires_at) = self.timer_deadline(entity) {
            return Err(TimerError::AlreadyRunning { entity, fires_at });
        }
        tracing::trace!(%entity, now = %self.current_time(), duration, "start timer");
        self.schedule_event(Event::Timeout { entity }, duration)
            .map_err(|_| TimerError::InvalidDuration { entity, duration })
    }

    /// Stops the timer of `entity`.
    ///
    /// Fails without side effects if no timer is running.
    pub fn stop_timer(&mut self, entity: Entity) -> Result<(), TimerError> {
        tracing::trace!(%entity, now = %self.current_time(), "stop timer");
        self.cancel_event_if(|scheduled| scheduled.event().is(EventKind::Timeout, entity))
            .map(|_| ())
            .map_err(|_| TimerError::NotRunning { entity })
    }

    /// Returns when the timer of `entity` fires, if it is running.
    pub fn timer_deadline(&self, entity: Entity) -> Option<SimTime> {
        self.find_event(|scheduled| scheduled.event().is(EventKind::Timeout, entity))
            .map(|scheduled| scheduled.time())
    }

    /// Returns `true` if `entity` has a running timer.
    pub fn is_timer_running(&self, entity: Entity) -> bool {
        self.timer_deadline(entity).is_some()
    }
}
