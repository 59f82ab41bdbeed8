//! # Channel Model Configuration
//!
//! | Fault / delay | Config Field | Default | Effect |
//! |---------------|--------------|---------|--------|
//! | Packet loss | `loss_probability` | 0.0 | Packet vanishes, nothing is scheduled |
//! | Corruption | `corrupt_probability` | 0.0 | One of payload / seqnum / acknum is overwritten |
//! | Propagation delay | `delay` | 1.0 + [0, 9) | Arrival lands after the previous one to the same side |
//!
//! The model is fixed for the lifetime of a run.

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimulationError, SimulationResult},
    sim::SimRng,
};

/// Propagation delay: a minimum plus a uniformly drawn span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Smallest possible delay.
    pub min: f64,
    /// Width of the uniform jitter added on top of `min`.
    pub span: f64,
}

impl DelayRange {
    /// Create a new delay range
    pub fn new(min: f64, span: f64) -> Self {
        Self { min, span }
    }

    /// Draws a delay in `[min, min + span)`. Always consumes one sample.
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        self.min + self.span * rng.random01()
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(1.0, 9.0)
    }
}

/// Fault and delay model of the channel between A and B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfiguration {
    /// Probability that a packet is dropped (0.0 - 1.0)
    pub loss_probability: f64,
    /// Probability that a surviving packet is corrupted (0.0 - 1.0)
    pub corrupt_probability: f64,
    /// One-way propagation delay
    pub delay: DelayRange,
}

impl Default for ChannelConfiguration {
    fn default() -> Self {
        Self {
            loss_probability: 0.0,
            corrupt_probability: 0.0,
            delay: DelayRange::default(),
        }
    }
}

impl ChannelConfiguration {
    /// Channel with the given fault probabilities and the default delay.
    pub fn new(loss_probability: f64, corrupt_probability: f64) -> Self {
        Self {
            loss_probability,
            corrupt_probability,
            ..Self::default()
        }
    }

    /// Channel that neither loses nor corrupts.
    pub fn reliable() -> Self {
        Self::default()
    }

    /// Checks that probabilities and delays are in range.
    pub fn validate(&self) -> SimulationResult<()> {
        check_probability("loss probability", self.loss_probability)?;
        check_probability("corruption probability", self.corrupt_probability)?;
        if !(self.delay.min > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "minimum delay must be positive, got {}",
                self.delay.min
            )));
        }
        if !(self.delay.span >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "delay span must not be negative, got {}",
                self.delay.span
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_probability(name: &str, value: f64) -> SimulationResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
