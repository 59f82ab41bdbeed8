use thiserror::Error;

use crate::sim::{Entity, SimTime};

/// Errors returned by the event scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SchedulerError {
    /// No event is pending.
    #[error("event queue is empty")]
    Empty,
    /// No pending event matched the cancellation predicate.
    #[error("no pending event matched")]
    NotFound,
    /// A relative delay was negative, infinite or NaN.
    #[error("invalid scheduling delay {delay}")]
    InvalidDelay {
        /// The rejected delay.
        delay: f64,
    },
    /// An absolute time lies before the current clock.
    #[error("cannot schedule at {at}: clock is already at {now}")]
    InPast {
        /// Requested fire time.
        at: SimTime,
        /// Clock at the time of the request.
        now: SimTime,
    },
}

/// Timer misuse. Never fatal: the caller logs it and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimerError {
    /// A timer was started for an entity that already has one running.
    #[error("attempt to start a timer for {entity} that is already started (fires at {fires_at})")]
    AlreadyRunning {
        /// Entity owning the timer.
        entity: Entity,
        /// Fire time of the live timer, which is left untouched.
        fires_at: SimTime,
    },
    /// A timer was stopped for an entity that has none running.
    #[error("unable to cancel timer for {entity}: it wasn't running")]
    NotRunning {
        /// Entity owning the timer.
        entity: Entity,
    },
    /// A timer was started with a negative, infinite or NaN duration.
    #[error("invalid timer duration {duration} for {entity}")]
    InvalidDuration {
        /// Entity owning the timer.
        entity: Entity,
        /// The rejected duration.
        duration: f64,
    },
}

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The random source failed its startup sanity check.
    #[error(
        "random number generation looks broken: average of 1000 samples is {average:.4}, expected within [0.25, 0.75]"
    )]
    RngSelfTest {
        /// Observed sample average.
        average: f64,
    },
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// An I/O error occurred while loading configuration.
    #[error("I/O error: {0}")]
    Io(String),
}

/// A type alias for `Result<T, SimulationError>`.
pub type SimulationResult<T> = Result<T, SimulationError>;

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::InvalidConfig(err.to_string())
    }
}
